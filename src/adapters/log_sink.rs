//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A Signal K or MQTT adapter would implement the same trait.

use log::{error, info};

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::{EventSink, ThrusterDirection};

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn bow_label(bow: Option<ThrusterDirection>) -> &'static str {
    match bow {
        None => "n/a",
        Some(ThrusterDirection::Stopped) => "stop",
        Some(ThrusterDirection::Port) => "port",
        Some(ThrusterDirection::Starboard) => "stbd",
    }
}

fn log_telemetry(t: &TelemetryData) {
    info!(
        "TELEM | rode={:.2}m ({} pulses) | winch={:?} bow={} | auto={:?} target={:.2}m | \
         estop={} cmds={} manual={} | home={}",
        t.rode_length_m,
        t.pulse_count,
        t.winch,
        bow_label(t.bow),
        t.auto_mode,
        t.target_m,
        t.emergency_stop,
        if t.commands_allowed { "OK" } else { "BLOCKED" },
        t.manual_control.as_i32(),
        t.at_home,
    );
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => log_telemetry(t),
            AppEvent::Started => {
                info!("START | windlass controller up");
            }
            AppEvent::EmergencyStopChanged { active: true, reason } => {
                error!("ESTOP | ACTIVE ({})", reason);
            }
            AppEvent::EmergencyStopChanged { active: false, reason } => {
                info!("ESTOP | cleared ({})", reason);
            }
            AppEvent::AutoModeChanged { enabled, target_m } => {
                info!(
                    "AUTO  | {} target={:.2}m",
                    if *enabled { "enabled" } else { "disabled" },
                    target_m
                );
            }
            AppEvent::TargetArmed(target_m) => {
                info!("AUTO  | target armed {:.2}m", target_m);
            }
            AppEvent::TargetReached { length_m } => {
                info!("AUTO  | target reached at {:.2}m", length_m);
            }
            AppEvent::HomeReached => {
                info!("HOME  | anchor home, counter zeroed");
            }
            AppEvent::RodeReset => {
                info!("RODE  | counter reset");
            }
            AppEvent::ManualControl(cmd) => {
                info!("MANUAL| {}", cmd.as_i32());
            }
            AppEvent::BowThruster(dir) => {
                info!("BOW   | {}", bow_label(Some(*dir)));
            }
            AppEvent::CommandsAllowed(allowed) => {
                info!(
                    "LINK  | commands {}",
                    if *allowed { "allowed" } else { "blocked" }
                );
            }
        }
    }
}
