//! Wired remote: four active-HIGH momentary buttons.
//!
//! A read error on any button is logged and reads as "released", so a
//! broken wire can never hold the deadman switch closed.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::{RemoteButtons, RemotePort};

pub struct GpioRemote<U, D, F3, F4> {
    up: U,
    down: D,
    func3: F3,
    func4: F4,
}

impl<U, D, F3, F4> GpioRemote<U, D, F3, F4>
where
    U: InputPin,
    D: InputPin,
    F3: InputPin,
    F4: InputPin,
{
    pub fn new(up: U, down: D, func3: F3, func4: F4) -> Self {
        Self {
            up,
            down,
            func3,
            func4,
        }
    }
}

fn pressed<P: InputPin>(pin: &mut P, name: &str) -> bool {
    pin.is_high().unwrap_or_else(|e| {
        warn!("remote {} read failed: {:?}", name, e);
        false
    })
}

impl<U, D, F3, F4> RemotePort for GpioRemote<U, D, F3, F4>
where
    U: InputPin,
    D: InputPin,
    F3: InputPin,
    F4: InputPin,
{
    fn read_buttons(&mut self) -> RemoteButtons {
        RemoteButtons {
            up: pressed(&mut self.up, "up"),
            down: pressed(&mut self.down, "down"),
            func3: pressed(&mut self.func3, "func3"),
            func4: pressed(&mut self.func4, "func4"),
        }
    }
}
