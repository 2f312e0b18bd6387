//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (the Signal K
//! binding, a serial console, tests) that the
//! [`AnchorApp`](super::service::AnchorApp) interprets and acts upon.

use crate::config::SystemConfig;

/// Tri-state manual winch command: `1 = up`, `0 = stop`, `-1 = down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManualCommand {
    Up,
    #[default]
    Stop,
    Down,
}

impl ManualCommand {
    /// Wire value as used by the remote command surface.
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Stop => 0,
            Self::Down => -1,
        }
    }
}

impl From<i32> for ManualCommand {
    /// Anything other than `1` or `-1` means stop.
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Up,
            -1 => Self::Down,
            _ => Self::Stop,
        }
    }
}

/// Tri-state bow thruster command: `-1 = port`, `0 = stop`, `1 = starboard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BowCommand {
    Port,
    #[default]
    Stop,
    Starboard,
}

impl From<i32> for BowCommand {
    fn from(value: i32) -> Self {
        match value {
            -1 => Self::Port,
            1 => Self::Starboard,
            _ => Self::Stop,
        }
    }
}

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Manual winch control.  Always disables automatic mode first.
    Manual(ManualCommand),

    /// Arm a target rode length in metres (`-1` clears).
    SetTarget(f32),

    /// Fire (`true`) or disarm (`false`) automatic mode.
    SetAutoMode(bool),

    /// Arm the home-seek target (`0.0 m`).
    Home,

    /// Activate or clear the emergency stop.
    EmergencyStop(bool),

    /// Zero the pulse counter and rode length, stop the winch, clear the target.
    ResetRode,

    /// Bow thruster control.
    Bow(BowCommand),

    /// Hot-reload configuration (validated before it is applied).
    ///
    /// `control_loop_interval_ms`, `telemetry_interval_ms` and
    /// `bow_thruster_installed` are read once at boot; an update that
    /// changes any of them is rejected as a whole.
    UpdateConfig(SystemConfig),
}
