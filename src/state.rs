//! Shared controller state.
//!
//! [`StateManager`] is the single record of cross-component state.  It is
//! created once by the orchestrator and handed by reference to whichever
//! component currently has authority.  Only the pulse counter is touched
//! from interrupt context; it lives behind an `Arc` so the ISR registration
//! can hold its own handle.

use std::sync::Arc;

use crate::app::commands::ManualCommand;
use crate::control::auto_mode::NO_TARGET;
use crate::sensors::pulse::PulseCounter;

#[derive(Debug)]
pub struct StateManager {
    pulses: Arc<PulseCounter>,
    rode_length_m: f32,
    meters_per_pulse: f32,
    emergency_stop_active: bool,
    auto_mode_enabled: bool,
    auto_mode_target_m: f32,
    commands_allowed: bool,
    manual_control: ManualCommand,
}

impl StateManager {
    pub fn new(meters_per_pulse: f32) -> Self {
        Self {
            pulses: Arc::new(PulseCounter::new()),
            rode_length_m: 0.0,
            meters_per_pulse,
            emergency_stop_active: false,
            auto_mode_enabled: false,
            auto_mode_target_m: NO_TARGET,
            commands_allowed: false,
            manual_control: ManualCommand::Stop,
        }
    }

    // ── Rode ──────────────────────────────────────────────────

    /// The ISR-shared counter.
    pub fn pulses(&self) -> &PulseCounter {
        &self.pulses
    }

    /// A second handle to the counter, for ISR registration.
    pub fn pulse_handle(&self) -> Arc<PulseCounter> {
        Arc::clone(&self.pulses)
    }

    pub fn pulse_count(&self) -> i32 {
        self.pulses.get()
    }

    pub fn set_pulse_count(&mut self, count: i32) {
        self.pulses.set(count);
    }

    /// Last computed rode length in metres.
    pub fn rode_length_m(&self) -> f32 {
        self.rode_length_m
    }

    /// Recompute `rode_length = pulse_count × meters_per_pulse`.
    pub fn refresh_rode_length(&mut self) -> f32 {
        self.rode_length_m = self.pulses.get() as f32 * self.meters_per_pulse;
        self.rode_length_m
    }

    /// Zero both the counter and the derived length.
    pub fn reset_rode(&mut self) {
        self.pulses.reset();
        self.rode_length_m = 0.0;
    }

    // ── Configuration ─────────────────────────────────────────

    pub fn meters_per_pulse(&self) -> f32 {
        self.meters_per_pulse
    }

    /// Calibration is owned by the external config layer.
    pub fn set_meters_per_pulse(&mut self, meters_per_pulse: f32) {
        self.meters_per_pulse = meters_per_pulse;
    }

    // ── Mode flags ────────────────────────────────────────────

    pub fn emergency_stop_active(&self) -> bool {
        self.emergency_stop_active
    }

    pub fn set_emergency_stop_active(&mut self, active: bool) {
        self.emergency_stop_active = active;
    }

    pub fn auto_mode_enabled(&self) -> bool {
        self.auto_mode_enabled
    }

    /// Target rode length, `-1` when unset.
    pub fn auto_mode_target_m(&self) -> f32 {
        self.auto_mode_target_m
    }

    /// Mirror of the automatic mode controller, kept for telemetry readers.
    pub fn set_auto_mode(&mut self, enabled: bool, target_m: f32) {
        self.auto_mode_enabled = enabled;
        self.auto_mode_target_m = target_m;
    }

    pub fn commands_allowed(&self) -> bool {
        self.commands_allowed
    }

    pub fn set_commands_allowed(&mut self, allowed: bool) {
        self.commands_allowed = allowed;
    }

    pub fn manual_control(&self) -> ManualCommand {
        self.manual_control
    }

    pub fn set_manual_control(&mut self, command: ManualCommand) {
        self.manual_control = command;
    }
}
