//! Digital input with edge detection.
//!
//! Wraps any `embedded-hal` [`InputPin`] and implements [`BinarySensor`].
//! The pin's electrical polarity is fixed at construction: the home sensor
//! is a proximity switch pulled up and shorted to ground when the anchor
//! is stowed (active-LOW).
//!
//! A pin read error is treated as "inactive" and logged; the home sensor
//! then simply stops interlocking, which matches a disconnected switch.

use embedded_hal::digital::InputPin;
use log::error;

use crate::app::ports::BinarySensor;

/// Which electrical level means "active".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

pub struct GpioSensor<P: InputPin> {
    pin: P,
    polarity: Polarity,
    was_active: bool,
}

impl<P: InputPin> GpioSensor<P> {
    /// Seeds the edge latch with the current reading so boot state does
    /// not register as an edge.
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut sensor = Self {
            pin,
            polarity,
            was_active: false,
        };
        sensor.was_active = sensor.read();
        sensor
    }

    fn read(&mut self) -> bool {
        let level = match self.polarity {
            Polarity::ActiveHigh => self.pin.is_high(),
            Polarity::ActiveLow => self.pin.is_low(),
        };
        level.unwrap_or_else(|e| {
            error!("gpio sensor read failed: {:?}", e);
            false
        })
    }
}

impl<P: InputPin> BinarySensor for GpioSensor<P> {
    fn is_active(&mut self) -> bool {
        self.read()
    }

    fn just_activated(&mut self) -> bool {
        let current = self.read();
        let edge = current && !self.was_active;
        self.was_active = current;
        edge
    }

    fn just_deactivated(&mut self) -> bool {
        let current = self.read();
        let edge = !current && self.was_active;
        self.was_active = current;
        edge
    }
}
