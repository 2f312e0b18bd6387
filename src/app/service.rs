//! Application service, the hexagonal core.
//!
//! [`AnchorApp`] owns the shared [`StateManager`], the controllers and the
//! periodic services.  It exposes a clean, hardware-agnostic API: the
//! binary feeds it remote button samples, link state and external
//! commands; everything observable leaves through an [`EventSink`].
//!
//! ```text
//!  RemotePort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │          AnchorApp           │
//!  AppCommand ──▶ │ Remote · Pulses · Auto · E-S │ ──▶ Motor / Thruster
//!                 └──────────────────────────────┘
//! ```
//!
//! ## Tick order
//!
//! 1. Link settle deadline.
//! 2. Remote gestures (through the emergency stop service), then deadman
//!    motion.
//! 3. Pulse counter service and automatic mode, at the pulse interval.
//! 4. Completion and auto-mode change events.

use std::sync::Arc;

use log::{debug, info};

use crate::config::{ConfigError, SystemConfig};
use crate::control::auto_mode::{AutomaticModeController, NO_TARGET};
use crate::control::bow::BowPropellerController;
use crate::control::remote::{RemoteControl, RemoteGesture};
use crate::control::winch::WinchController;
use crate::error::CommandRejected;
use crate::safety::EmergencyStopService;
use crate::sensors::pulse::{PulseCounter, PulseCounterService};
use crate::state::StateManager;

use super::commands::{AppCommand, BowCommand, ManualCommand};
use super::events::{AppEvent, TelemetryData};
use super::link::{LinkMonitor, LinkTransition};
use super::ports::{BinarySensor, EventSink, Motor, RemoteButtons, Thruster, ThrusterDirection};

// ───────────────────────────────────────────────────────────────
// AnchorApp
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AnchorApp<M: Motor, S: BinarySensor, T: Thruster> {
    config: SystemConfig,
    state: StateManager,
    winch: WinchController<M, S>,
    bow: Option<BowPropellerController<T>>,
    auto: AutomaticModeController,
    pulse_service: PulseCounterService,
    remote: RemoteControl,
    link: LinkMonitor,
    tick_count: u64,
}

impl<M: Motor, S: BinarySensor, T: Thruster> AnchorApp<M, S, T> {
    /// Construct the service from configuration and the actuators.
    ///
    /// External commands stay blocked until a link is reported and has
    /// settled; the wired remote works immediately.
    pub fn new(
        config: SystemConfig,
        winch: WinchController<M, S>,
        bow: Option<BowPropellerController<T>>,
    ) -> Self {
        Self {
            state: StateManager::new(config.meters_per_pulse),
            auto: AutomaticModeController::new(config.auto_tolerance_m()),
            pulse_service: PulseCounterService::new(config.pulse_update_interval_ms),
            remote: RemoteControl::new(config.double_press_window_ms, config.long_press_ms),
            link: LinkMonitor::new(config.link_settle_ms),
            winch,
            bow,
            config,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put every actuator in its safe state and announce startup.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.winch.stop();
        if let Some(bow) = self.bow.as_mut() {
            bow.stop();
        }
        self.state.refresh_rode_length();
        sink.emit(&AppEvent::Started);
        info!(
            "AnchorApp started ({:.3} m/pulse, tolerance {:.3} m, bow thruster: {})",
            self.state.meters_per_pulse(),
            self.auto.tolerance(),
            self.bow.is_some()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle with the latest remote button sample.
    pub fn tick(&mut self, now_ms: u64, buttons: RemoteButtons, sink: &mut impl EventSink) {
        self.tick_count += 1;

        // 1. Link settle deadline
        if let Some(transition) = self.link.poll(now_ms) {
            self.apply_link_transition(transition, sink);
        }

        // 2. Remote: gestures first so a stop lands before any motion
        let estop = self.state.emergency_stop_active();
        match self.remote.detect_gesture(buttons, now_ms, estop) {
            Some(RemoteGesture::EmergencyStop) => {
                self.emergency_stop()
                    .set_active(true, "remote double press", sink);
            }
            Some(RemoteGesture::ClearEmergencyStop) => {
                self.emergency_stop()
                    .set_active(false, "remote long press", sink);
            }
            None => {}
        }
        self.remote.drive(
            buttons,
            self.state.emergency_stop_active(),
            &mut self.winch,
            self.bow.as_mut(),
            &mut self.auto,
        );

        // 3. Pulse counter service + automatic mode
        if self.pulse_service.is_due(now_ms) {
            let arrived = self.pulse_service.update(
                now_ms,
                &mut self.state,
                &mut self.winch,
                &mut self.auto,
            );
            if arrived {
                sink.emit(&AppEvent::HomeReached);
            }
            if !self.state.emergency_stop_active() {
                self.auto.update(self.state.rode_length_m(), &mut self.winch);
            }
        }

        // 4. Events
        self.publish_auto(sink);
    }

    /// Report the network link state.  Polled every tick by the binary.
    pub fn set_link_connected(&mut self, connected: bool, now_ms: u64, sink: &mut impl EventSink) {
        if let Some(transition) = self.link.observe(connected, now_ms) {
            self.apply_link_transition(transition, sink);
        }
        self.publish_auto(sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.  Rejections are advisory: they are
    /// logged at debug level and returned, never treated as faults.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        sink: &mut impl EventSink,
    ) -> Result<(), CommandRejected> {
        let result = match cmd {
            AppCommand::Manual(command) => self.manual(command, sink),
            AppCommand::SetTarget(meters) => self.set_target(meters, sink),
            AppCommand::SetAutoMode(enabled) => self.set_auto_mode(enabled),
            AppCommand::Home => self.home(sink),
            AppCommand::EmergencyStop(active) => self.command_emergency_stop(active, sink),
            AppCommand::ResetRode => self.reset_rode(sink),
            AppCommand::Bow(command) => self.bow_command(command, sink),
            AppCommand::UpdateConfig(config) => self.update_config(config),
        };
        if let Err(reason) = result {
            debug!("Command rejected: {reason}");
        }
        self.publish_auto(sink);
        result
    }

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&mut self) -> TelemetryData {
        TelemetryData {
            rode_length_m: self.state.rode_length_m(),
            pulse_count: self.state.pulse_count(),
            winch: self.winch.direction(),
            bow: self.bow.as_ref().map(BowPropellerController::direction),
            auto_mode: self.auto.state(),
            target_m: self.auto.target_length(),
            emergency_stop: self.state.emergency_stop_active(),
            commands_allowed: self.state.commands_allowed(),
            manual_control: self.state.manual_control(),
            at_home: self.winch.is_home(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &StateManager {
        &self.state
    }

    pub fn winch(&self) -> &WinchController<M, S> {
        &self.winch
    }

    pub fn bow(&self) -> Option<&BowPropellerController<T>> {
        self.bow.as_ref()
    }

    pub fn auto_mode(&self) -> &AutomaticModeController {
        &self.auto
    }

    /// Mutable access to the home sensor, for simulation and tests.
    pub fn home_sensor_mut(&mut self) -> &mut S {
        self.winch.home_mut().sensor_mut()
    }

    /// Second handle to the ISR-shared pulse counter.
    pub fn pulse_handle(&self) -> Arc<PulseCounter> {
        self.state.pulse_handle()
    }

    pub fn is_emergency_stop_active(&self) -> bool {
        self.state.emergency_stop_active()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> SystemConfig {
        self.config.clone()
    }

    // ── Command implementations ───────────────────────────────

    /// Shared gate for externally sourced commands.
    fn check_gate(&self) -> Result<(), CommandRejected> {
        if self.state.emergency_stop_active() {
            Err(CommandRejected::EmergencyStopActive)
        } else if !self.state.commands_allowed() {
            Err(CommandRejected::CommandsBlocked)
        } else {
            Ok(())
        }
    }

    fn manual(
        &mut self,
        command: ManualCommand,
        sink: &mut impl EventSink,
    ) -> Result<(), CommandRejected> {
        if let Err(reason) = self.check_gate() {
            // Blocked motion reports stop; the outputs are left alone.
            self.state.set_manual_control(ManualCommand::Stop);
            sink.emit(&AppEvent::ManualControl(ManualCommand::Stop));
            return Err(reason);
        }

        if self.auto.is_enabled() {
            self.auto.set_enabled(false, &mut self.winch);
        }
        match command {
            ManualCommand::Up => self.winch.move_up(),
            ManualCommand::Down => self.winch.move_down(),
            ManualCommand::Stop => self.winch.stop(),
        }
        self.state.set_manual_control(command);
        sink.emit(&AppEvent::ManualControl(command));
        Ok(())
    }

    fn set_target(&mut self, meters: f32, sink: &mut impl EventSink) -> Result<(), CommandRejected> {
        self.check_gate()?;
        if self.auto.is_enabled() {
            info!("New target while automatic mode enabled - disabling");
            self.auto.set_enabled(false, &mut self.winch);
        }
        self.auto.set_target_length(meters);
        sink.emit(&AppEvent::TargetArmed(self.auto.target_length()));
        Ok(())
    }

    fn set_auto_mode(&mut self, enabled: bool) -> Result<(), CommandRejected> {
        if !enabled {
            // Disabling only ever stops the winch, so it is never gated.
            self.auto.set_enabled(false, &mut self.winch);
            return Ok(());
        }

        self.check_gate()?;
        if !self.auto.set_enabled(true, &mut self.winch) {
            return Err(CommandRejected::NoTarget);
        }
        let current = self.state.refresh_rode_length();
        self.auto.update(current, &mut self.winch);
        Ok(())
    }

    fn home(&mut self, sink: &mut impl EventSink) -> Result<(), CommandRejected> {
        self.check_gate()?;
        if self.winch.is_active() && !self.auto.is_enabled() {
            return Err(CommandRejected::ManualControlActive);
        }
        if self.auto.is_enabled() {
            self.auto.set_enabled(false, &mut self.winch);
        }
        self.auto.set_target_length(0.0);
        sink.emit(&AppEvent::TargetArmed(0.0));
        Ok(())
    }

    fn command_emergency_stop(
        &mut self,
        active: bool,
        sink: &mut impl EventSink,
    ) -> Result<(), CommandRejected> {
        if active {
            if !self.state.commands_allowed() {
                return Err(CommandRejected::CommandsBlocked);
            }
            self.emergency_stop().set_active(true, "command", sink);
        } else {
            // Clearing is a safety release: accepted whatever the link state.
            self.emergency_stop().set_active(false, "command", sink);
        }
        Ok(())
    }

    fn reset_rode(&mut self, sink: &mut impl EventSink) -> Result<(), CommandRejected> {
        self.check_gate()?;
        self.auto.set_enabled(false, &mut self.winch);
        self.auto.set_target_length(NO_TARGET);
        self.state.reset_rode();
        info!("Rode counter reset");
        sink.emit(&AppEvent::RodeReset);
        Ok(())
    }

    fn bow_command(
        &mut self,
        command: BowCommand,
        sink: &mut impl EventSink,
    ) -> Result<(), CommandRejected> {
        if self.bow.is_none() {
            return Err(CommandRejected::NoThruster);
        }
        if let Err(reason) = self.check_gate() {
            sink.emit(&AppEvent::BowThruster(ThrusterDirection::Stopped));
            return Err(reason);
        }
        let Some(bow) = self.bow.as_mut() else {
            return Err(CommandRejected::NoThruster);
        };
        match command {
            BowCommand::Port => bow.turn_port(),
            BowCommand::Starboard => bow.turn_starboard(),
            BowCommand::Stop => bow.stop(),
        }
        sink.emit(&AppEvent::BowThruster(bow.direction()));
        Ok(())
    }

    fn update_config(&mut self, config: SystemConfig) -> Result<(), CommandRejected> {
        self.check_gate()?;
        config.validate().map_err(|e| match e {
            ConfigError::ValidationFailed(msg) => CommandRejected::InvalidConfig(msg),
            ConfigError::Parse => CommandRejected::InvalidConfig("parse error"),
        })?;
        if !self.config.boot_fields_match(&config) {
            return Err(CommandRejected::InvalidConfig(
                "loop, telemetry and thruster settings apply at boot only",
            ));
        }

        self.state.set_meters_per_pulse(config.meters_per_pulse);
        self.state.refresh_rode_length();
        self.auto.set_tolerance(config.auto_tolerance_m());
        self.remote
            .set_gesture_timing(config.double_press_window_ms, config.long_press_ms);
        self.link.set_settle_ms(config.link_settle_ms);
        self.pulse_service
            .set_interval_ms(config.pulse_update_interval_ms);
        self.config = config;
        info!("Configuration updated at runtime");
        Ok(())
    }

    // ── Internal ──────────────────────────────────────────────

    /// Borrow the actuators as an emergency stop service.
    fn emergency_stop(&mut self) -> EmergencyStopService<'_, M, S, T> {
        EmergencyStopService::new(
            &mut self.state,
            &mut self.winch,
            self.bow.as_mut(),
            &mut self.auto,
        )
    }

    fn apply_link_transition(&mut self, transition: LinkTransition, sink: &mut impl EventSink) {
        match transition {
            LinkTransition::Lost => {
                self.auto.set_enabled(false, &mut self.winch);
                self.winch.stop();
                if let Some(bow) = self.bow.as_mut() {
                    bow.stop();
                }
                self.state.set_commands_allowed(false);
                sink.emit(&AppEvent::CommandsAllowed(false));
            }
            LinkTransition::Settled => {
                self.state.set_commands_allowed(true);
                sink.emit(&AppEvent::CommandsAllowed(true));
            }
        }
    }

    /// Emit the one-shot completion and keep the state mirror current.
    fn publish_auto(&mut self, sink: &mut impl EventSink) {
        if self.auto.consume_target_reached() {
            sink.emit(&AppEvent::TargetReached {
                length_m: self.state.rode_length_m(),
            });
        }

        let enabled = self.auto.is_enabled();
        let target_m = self.auto.target_length();
        if enabled != self.state.auto_mode_enabled() {
            sink.emit(&AppEvent::AutoModeChanged { enabled, target_m });
        }
        self.state.set_auto_mode(enabled, target_m);
    }
}
