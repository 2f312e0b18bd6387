//! Bow thruster controller.
//!
//! Independent of the winch.  Mutual exclusion of the two outputs is the
//! [`Thruster`] implementation's job (see [`crate::drivers::relay`]); this
//! layer only exposes the command and read-back surface.

use crate::app::ports::{Thruster, ThrusterDirection};

pub struct BowPropellerController<T: Thruster> {
    thruster: T,
}

impl<T: Thruster> BowPropellerController<T> {
    pub fn new(thruster: T) -> Self {
        Self { thruster }
    }

    pub fn turn_port(&mut self) {
        self.thruster.turn_port();
    }

    pub fn turn_starboard(&mut self) {
        self.thruster.turn_starboard();
    }

    pub fn stop(&mut self) {
        self.thruster.stop();
    }

    pub fn direction(&self) -> ThrusterDirection {
        self.thruster.direction()
    }

    pub fn is_active(&self) -> bool {
        self.direction() != ThrusterDirection::Stopped
    }

    pub fn is_turning_port(&self) -> bool {
        self.direction() == ThrusterDirection::Port
    }

    pub fn is_turning_starboard(&self) -> bool {
        self.direction() == ThrusterDirection::Starboard
    }

    pub fn thruster(&self) -> &T {
        &self.thruster
    }
}
