//! Anchor home position sensor.
//!
//! Semantic wrapper over any [`BinarySensor`]: "active" means the anchor is
//! fully retrieved.  Edge tracking lives in the underlying sensor, so
//! [`just_arrived`](HomeSensor::just_arrived) and
//! [`just_left`](HomeSensor::just_left) share one latch.

use crate::app::ports::BinarySensor;

pub struct HomeSensor<S: BinarySensor> {
    sensor: S,
}

impl<S: BinarySensor> HomeSensor<S> {
    pub fn new(sensor: S) -> Self {
        Self { sensor }
    }

    pub fn is_home(&mut self) -> bool {
        self.sensor.is_active()
    }

    pub fn just_arrived(&mut self) -> bool {
        self.sensor.just_activated()
    }

    pub fn just_left(&mut self) -> bool {
        self.sensor.just_deactivated()
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}
