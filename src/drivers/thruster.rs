//! Bow thruster relay driver: side A = port, side B = starboard.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{Thruster, ThrusterDirection};

use super::relay::{RelayPair, RelaySide};

pub struct RelayThruster<P: OutputPin, S: OutputPin> {
    relays: RelayPair<P, S>,
}

impl<P: OutputPin, S: OutputPin> RelayThruster<P, S> {
    pub fn new(port: P, starboard: S) -> Self {
        Self {
            relays: RelayPair::new(port, starboard),
        }
    }
}

impl<P: OutputPin, S: OutputPin> Thruster for RelayThruster<P, S> {
    fn turn_port(&mut self) {
        self.relays.energise_a();
    }

    fn turn_starboard(&mut self) {
        self.relays.energise_b();
    }

    fn stop(&mut self) {
        self.relays.release();
    }

    fn direction(&self) -> ThrusterDirection {
        match self.relays.state() {
            RelaySide::Released => ThrusterDirection::Stopped,
            RelaySide::A => ThrusterDirection::Port,
            RelaySide::B => ThrusterDirection::Starboard,
        }
    }
}
