//! System configuration parameters
//!
//! All tunable parameters for the windlass controller.  Loading and
//! persisting them is the job of the external configuration layer; it hands
//! a JSON document to [`SystemConfig::from_json`], which validates it.

use serde::{Deserialize, Serialize};

/// Errors from configuration parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for [`SystemConfig`].
    Parse,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse => write!(f, "config parse error"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Rode calibration ---
    /// Rode length represented by one chain-counter pulse (metres)
    pub meters_per_pulse: f32,
    /// Automatic mode tolerance band, in pulses either side of the target
    pub tolerance_pulses: u16,

    // --- Remote gestures ---
    /// Two presses within this window trigger the emergency stop (ms)
    pub double_press_window_ms: u32,
    /// Holding a button this long clears the emergency stop (ms)
    pub long_press_ms: u32,

    // --- Link ---
    /// Time a freshly established link must stay up before commands are accepted (ms)
    pub link_settle_ms: u32,

    // --- Timing ---
    /// Pulse counter / automatic mode update interval (ms)
    pub pulse_update_interval_ms: u32,
    /// Main control loop interval (ms)
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (ms)
    pub telemetry_interval_ms: u32,

    // --- Hardware ---
    /// Whether a bow thruster is wired to the controller
    pub bow_thruster_installed: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Rode calibration
            meters_per_pulse: 0.01,
            tolerance_pulses: 2,

            // Remote gestures
            double_press_window_ms: 800,
            long_press_ms: 2000,

            // Link
            link_settle_ms: 5000,

            // Timing
            pulse_update_interval_ms: 100, // 10 Hz
            control_loop_interval_ms: 10,  // 100 Hz
            telemetry_interval_ms: 1000,   // 1 Hz

            // Hardware
            bow_thruster_installed: true,
        }
    }
}

impl SystemConfig {
    /// True if `other` keeps every field that is only read at boot: the
    /// control loop period, the telemetry period and the thruster flag.
    pub fn boot_fields_match(&self, other: &Self) -> bool {
        self.control_loop_interval_ms == other.control_loop_interval_ms
            && self.telemetry_interval_ms == other.telemetry_interval_ms
            && self.bow_thruster_installed == other.bow_thruster_installed
    }

    /// Automatic mode tolerance in metres.
    pub fn auto_tolerance_m(&self) -> f32 {
        self.meters_per_pulse * f32::from(self.tolerance_pulses)
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.meters_per_pulse > 0.0 && self.meters_per_pulse <= 1.0) {
            return Err(ConfigError::ValidationFailed(
                "meters_per_pulse must be > 0.0 and <= 1.0",
            ));
        }
        if !(1..=100).contains(&self.tolerance_pulses) {
            return Err(ConfigError::ValidationFailed(
                "tolerance_pulses must be 1–100",
            ));
        }
        if !(100..=5000).contains(&self.double_press_window_ms) {
            return Err(ConfigError::ValidationFailed(
                "double_press_window_ms must be 100–5000",
            ));
        }
        if !(500..=10_000).contains(&self.long_press_ms) {
            return Err(ConfigError::ValidationFailed(
                "long_press_ms must be 500–10000",
            ));
        }
        if self.long_press_ms <= self.double_press_window_ms {
            return Err(ConfigError::ValidationFailed(
                "long_press_ms must be > double_press_window_ms",
            ));
        }
        if self.link_settle_ms > 60_000 {
            return Err(ConfigError::ValidationFailed(
                "link_settle_ms must be 0–60000",
            ));
        }
        if !(10..=1000).contains(&self.pulse_update_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "pulse_update_interval_ms must be 10–1000",
            ));
        }
        if !(1..=100).contains(&self.control_loop_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be 1–100",
            ));
        }
        if !(100..=60_000).contains(&self.telemetry_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_ms must be 100–60000",
            ));
        }
        Ok(())
    }
}
