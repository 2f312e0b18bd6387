//! Unified error types for the windlass firmware.
//!
//! The control core itself is infallible: every state-machine input is a
//! boolean or a number and out-of-range values are normalised.  Errors only
//! exist at the edges: peripheral setup, configuration, and external
//! commands that the core decided not to act on.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible setup operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
    /// A GPIO could not be configured or driven.
    Gpio(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Gpio(pin) => write!(f, "gpio: pin {pin} failed"),
        }
    }
}

impl core::error::Error for Error {}

impl From<crate::config::ConfigError> for Error {
    fn from(e: crate::config::ConfigError) -> Self {
        match e {
            crate::config::ConfigError::Parse => Self::Config("parse error"),
            crate::config::ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

impl From<crate::drivers::hw_init::HwInitError> for Error {
    fn from(e: crate::drivers::hw_init::HwInitError) -> Self {
        use crate::drivers::hw_init::HwInitError;
        match e {
            HwInitError::GpioConfigFailed(_) => Self::Init("pulse input config"),
            HwInitError::IsrInstallFailed(_) => Self::Init("gpio isr service"),
            HwInitError::IsrHandlerFailed(_) => Self::Init("pulse isr handler"),
        }
    }
}

// ---------------------------------------------------------------------------
// Command rejection
// ---------------------------------------------------------------------------

/// Why an externally sourced command was not acted upon.
///
/// Rejection is advisory: the core logs it and carries on.  Motion
/// commands that are rejected report "stop" as their status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRejected {
    /// Emergency stop is latched; only clearing it is accepted.
    EmergencyStopActive,
    /// The link is not healthy (`commands_allowed == false`).
    CommandsBlocked,
    /// The winch is running under manual control.
    ManualControlActive,
    /// Automatic mode cannot be enabled without an armed target.
    NoTarget,
    /// No bow thruster is installed.
    NoThruster,
    /// A configuration update failed validation.
    InvalidConfig(&'static str),
}

impl fmt::Display for CommandRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmergencyStopActive => write!(f, "emergency stop active"),
            Self::CommandsBlocked => write!(f, "commands blocked"),
            Self::ManualControlActive => write!(f, "manual control active"),
            Self::NoTarget => write!(f, "no target armed"),
            Self::NoThruster => write!(f, "no bow thruster installed"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl core::error::Error for CommandRejected {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
