//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to          |
//! |------------|------------|----------------------|
//! | `log_sink` | EventSink  | Serial log output    |
//! | `time`     |            | ESP32 system timer   |
//!
//! The GPIO-backed `Motor`, `Thruster`, `BinarySensor` and `RemotePort`
//! implementations live in [`crate::drivers`] and [`crate::sensors`].

pub mod log_sink;
pub mod time;
