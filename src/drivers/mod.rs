//! Actuator and input drivers, and chain-counter interrupt setup.

pub mod hw_init;
pub mod relay;
pub mod remote_inputs;
pub mod thruster;
pub mod winch_motor;
