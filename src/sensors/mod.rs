//! Sensor drivers: edge-detecting GPIO inputs, the anchor home sensor, and
//! the chain-counter pulse path.

pub mod gpio;
pub mod home;
pub mod pulse;
