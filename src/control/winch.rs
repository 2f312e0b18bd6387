//! Winch controller with the home interlock.
//!
//! The controller owns the motor and the anchor home sensor.  `move_up`
//! never retrieves past home: if the sensor is active the call becomes a
//! `stop`.  Every operation is immediate and idempotent; repeating a move
//! re-issues the same relay levels.

use log::{debug, warn};

use crate::app::ports::{BinarySensor, Motor, MotorDirection};
use crate::sensors::home::HomeSensor;

pub struct WinchController<M: Motor, S: BinarySensor> {
    motor: M,
    home: HomeSensor<S>,
}

impl<M: Motor, S: BinarySensor> WinchController<M, S> {
    pub fn new(motor: M, home: HomeSensor<S>) -> Self {
        Self { motor, home }
    }

    /// Retrieve, unless the anchor is already home.
    pub fn move_up(&mut self) {
        if self.home.is_home() {
            if self.motor.is_active() {
                warn!("Winch up blocked: anchor at home - stopping");
            } else {
                debug!("Winch up ignored: anchor at home");
            }
            self.motor.stop();
            return;
        }
        self.motor.move_up();
    }

    /// Deploy.
    pub fn move_down(&mut self) {
        self.motor.move_down();
    }

    pub fn stop(&mut self) {
        self.motor.stop();
    }

    pub fn is_active(&self) -> bool {
        self.motor.is_active()
    }

    pub fn is_moving_up(&self) -> bool {
        self.motor.is_moving_up()
    }

    pub fn is_moving_down(&self) -> bool {
        self.motor.is_moving_down()
    }

    pub fn direction(&self) -> MotorDirection {
        self.motor.direction()
    }

    /// Live home sensor reading.
    pub fn is_home(&mut self) -> bool {
        self.home.is_home()
    }

    pub fn home(&self) -> &HomeSensor<S> {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut HomeSensor<S> {
        &mut self.home
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }
}
