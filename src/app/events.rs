//! Outbound application events.
//!
//! The [`AnchorApp`](super::service::AnchorApp) and the
//! [`EmergencyStopService`](crate::safety::EmergencyStopService) emit these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them (serial log, Signal K delta).

use crate::control::auto_mode::AutoModeState;

use super::commands::ManualCommand;
use super::ports::{MotorDirection, ThrusterDirection};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The application service has started.
    Started,

    /// Emergency stop was activated or cleared.
    EmergencyStopChanged { active: bool, reason: &'static str },

    /// Automatic mode was enabled or disabled.
    AutoModeChanged { enabled: bool, target_m: f32 },

    /// A new target was armed (`-1` = cleared).
    TargetArmed(f32),

    /// Distance-targeting finished inside the tolerance band.
    TargetReached { length_m: f32 },

    /// The home sensor reported arrival; the pulse counter was re-zeroed.
    HomeReached,

    /// Pulse counter and rode length were zeroed by command.
    RodeReset,

    /// Reported manual control status.
    ManualControl(ManualCommand),

    /// Reported bow thruster status.
    BowThruster(ThrusterDirection),

    /// External command gating changed (link health).
    CommandsAllowed(bool),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub rode_length_m: f32,
    pub pulse_count: i32,
    pub winch: MotorDirection,
    /// `None` when no thruster is installed.
    pub bow: Option<ThrusterDirection>,
    pub auto_mode: AutoModeState,
    pub target_m: f32,
    pub emergency_stop: bool,
    pub commands_allowed: bool,
    pub manual_control: ManualCommand,
    pub at_home: bool,
}
