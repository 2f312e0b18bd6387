//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AnchorApp (domain)
//! ```
//!
//! Driven adapters (relay drivers, GPIO sensors, remote buttons, event sinks)
//! implement these traits.  The controllers and the
//! [`AnchorApp`](super::service::AnchorApp) consume them via generics, so the
//! domain core never touches hardware directly.
//!
//! ## Safety notes
//!
//! - **Motor** and **Thruster** implementations MUST guarantee that the two
//!   opposing outputs are never energised at the same time.  The relay
//!   drivers in [`crate::drivers::relay`] release the opposite relay before
//!   energising their own.
//! - **BinarySensor** edge queries share one "previous state" latch; callers
//!   must keep polling them (see [`crate::sensors::home::HomeSensor`]).

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Winch motor port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Direction of the anchor winch motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotorDirection {
    #[default]
    Stopped,
    /// Retrieving rode.
    Up,
    /// Deploying rode.
    Down,
}

/// Binary directional actuator: stop, up or down, never up and down at once.
pub trait Motor {
    /// Energise the "up" output (retrieve).
    fn move_up(&mut self);

    /// Energise the "down" output (deploy).
    fn move_down(&mut self);

    /// Release both outputs.
    fn stop(&mut self);

    /// Direction last driven onto the outputs.
    fn direction(&self) -> MotorDirection;

    fn is_active(&self) -> bool {
        self.direction() != MotorDirection::Stopped
    }

    fn is_moving_up(&self) -> bool {
        self.direction() == MotorDirection::Up
    }

    fn is_moving_down(&self) -> bool {
        self.direction() == MotorDirection::Down
    }
}

// ───────────────────────────────────────────────────────────────
// Bow thruster port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Direction of the bow thruster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrusterDirection {
    #[default]
    Stopped,
    Port,
    Starboard,
}

/// Bow thruster actuator with mutually exclusive port/starboard outputs.
pub trait Thruster {
    fn turn_port(&mut self);
    fn turn_starboard(&mut self);
    fn stop(&mut self);
    fn direction(&self) -> ThrusterDirection;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// A binary input with edge detection.
///
/// `just_activated` and `just_deactivated` both compare the live reading
/// against the same latched previous state and then update it, so a rising
/// edge is reported exactly once by whichever query runs first.
pub trait BinarySensor {
    /// Live reading.
    fn is_active(&mut self) -> bool;

    /// True if the input went inactive → active since the last edge query.
    fn just_activated(&mut self) -> bool;

    /// True if the input went active → inactive since the last edge query.
    fn just_deactivated(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Remote control port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One sample of the four momentary remote buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoteButtons {
    pub up: bool,
    pub down: bool,
    /// Function button 3, bow thruster to port.
    pub func3: bool,
    /// Function button 4, bow thruster to starboard.
    pub func4: bool,
}

impl RemoteButtons {
    /// True if any tracked button is held.
    pub fn any(&self) -> bool {
        self.up || self.down || self.func3 || self.func4
    }
}

/// Read-side port for the wired remote.
pub trait RemotePort {
    fn read_buttons(&mut self) -> RemoteButtons;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log, Signal K delta, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
