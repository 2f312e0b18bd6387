//! Winch contactor driver.
//!
//! Two relays on the [`RelayPair`]: side A retrieves (up), side B deploys
//! (down).  The pair's ordering guarantees both contactors are never pulled
//! in together.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{Motor, MotorDirection};

use super::relay::{RelayPair, RelaySide};

pub struct RelayMotor<U: OutputPin, D: OutputPin> {
    relays: RelayPair<U, D>,
}

impl<U: OutputPin, D: OutputPin> RelayMotor<U, D> {
    pub fn new(up: U, down: D) -> Self {
        Self {
            relays: RelayPair::new(up, down),
        }
    }
}

impl<U: OutputPin, D: OutputPin> Motor for RelayMotor<U, D> {
    fn move_up(&mut self) {
        self.relays.energise_a();
    }

    fn move_down(&mut self) {
        self.relays.energise_b();
    }

    fn stop(&mut self) {
        self.relays.release();
    }

    fn direction(&self) -> MotorDirection {
        match self.relays.state() {
            RelaySide::Released => MotorDirection::Stopped,
            RelaySide::A => MotorDirection::Up,
            RelaySide::B => MotorDirection::Down,
        }
    }
}
