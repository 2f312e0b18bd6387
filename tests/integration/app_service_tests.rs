//! Integration tests for the AnchorApp → controllers → relays pipeline.
//!
//! These run on the host (x86_64) and drive external commands through the
//! full chain down to the mock relay pins.

use windlass::app::commands::{AppCommand, BowCommand, ManualCommand};
use windlass::app::events::AppEvent;
use windlass::app::ports::{MotorDirection, ThrusterDirection};
use windlass::config::SystemConfig;
use windlass::control::auto_mode::AutoModeState;
use windlass::error::CommandRejected;

use crate::mock_hw::{NO_BUTTONS, Rig};

// ── Manual control ────────────────────────────────────────────

#[test]
fn manual_commands_drive_winch_relays() {
    let mut rig = Rig::connected();

    assert_eq!(rig.command(AppCommand::Manual(ManualCommand::Down)), Ok(()));
    assert!(rig.winch_down_energised());
    assert!(!rig.winch_up_energised());
    assert_eq!(rig.app.state().manual_control(), ManualCommand::Down);

    assert_eq!(rig.command(AppCommand::Manual(ManualCommand::Up)), Ok(()));
    assert!(rig.winch_up_energised());
    assert!(!rig.winch_down_energised());

    assert_eq!(rig.command(AppCommand::Manual(ManualCommand::Stop)), Ok(()));
    assert!(!rig.any_relay_energised());
}

#[test]
fn blocked_manual_command_reports_stop_and_leaves_outputs() {
    let mut rig = Rig::new();

    let result = rig.command(AppCommand::Manual(ManualCommand::Down));

    assert_eq!(result, Err(CommandRejected::CommandsBlocked));
    assert!(!rig.any_relay_energised());
    assert_eq!(rig.app.state().manual_control(), ManualCommand::Stop);
    assert!(rig.sink.contains(&AppEvent::ManualControl(ManualCommand::Stop)));
}

#[test]
fn manual_command_disables_automatic_mode() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::SetTarget(20.0)).unwrap();
    rig.command(AppCommand::SetAutoMode(true)).unwrap();
    assert!(rig.app.auto_mode().is_enabled());

    rig.command(AppCommand::Manual(ManualCommand::Stop)).unwrap();

    assert!(!rig.app.auto_mode().is_enabled());
    assert!(!rig.app.state().auto_mode_enabled());
    assert!(!rig.any_relay_energised());
}

#[test]
fn manual_up_at_home_is_interlocked() {
    let mut rig = Rig::connected();
    rig.set_home(true);

    rig.command(AppCommand::Manual(ManualCommand::Up)).unwrap();

    assert!(!rig.winch_up_energised());
    assert_eq!(rig.app.winch().direction(), MotorDirection::Stopped);
}

// ── Automatic mode ────────────────────────────────────────────

#[test]
fn arming_a_target_does_not_move() {
    let mut rig = Rig::connected();

    rig.command(AppCommand::SetTarget(10.0)).unwrap();
    rig.advance(500, NO_BUTTONS);

    assert!(!rig.any_relay_energised());
    assert_eq!(rig.app.auto_mode().state(), AutoModeState::ArmedDisabled);
    assert!(rig.sink.contains(&AppEvent::TargetArmed(10.0)));
}

#[test]
fn auto_mode_deploys_to_target_and_stops() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::SetTarget(1.0)).unwrap();
    rig.command(AppCommand::SetAutoMode(true)).unwrap();

    // Enabling evaluates immediately.
    assert!(rig.winch_down_energised());

    rig.set_pulses(50);
    rig.advance(100, NO_BUTTONS);
    assert!(rig.winch_down_energised());

    // 99 pulses × 0.01 m is inside the 2-pulse tolerance band.
    rig.set_pulses(99);
    rig.advance(100, NO_BUTTONS);

    assert!(!rig.any_relay_energised());
    assert!(!rig.app.auto_mode().is_enabled());
    assert!((rig.app.auto_mode().target_length() - 1.0).abs() < f32::EPSILON);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::TargetReached { .. })),
        1
    );
    assert!(rig.sink.contains(&AppEvent::AutoModeChanged {
        enabled: false,
        target_m: 1.0
    }));
}

#[test]
fn auto_mode_retrieves_when_too_long() {
    let mut rig = Rig::connected();
    rig.set_pulses(1500);
    rig.advance(100, NO_BUTTONS);

    rig.command(AppCommand::SetTarget(5.0)).unwrap();
    rig.command(AppCommand::SetAutoMode(true)).unwrap();

    assert!(rig.winch_up_energised());
}

#[test]
fn enabling_without_target_is_rejected() {
    let mut rig = Rig::connected();
    assert_eq!(
        rig.command(AppCommand::SetAutoMode(true)),
        Err(CommandRejected::NoTarget)
    );
    assert!(!rig.app.auto_mode().is_enabled());
}

#[test]
fn new_target_while_enabled_disables_auto() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::SetTarget(10.0)).unwrap();
    rig.command(AppCommand::SetAutoMode(true)).unwrap();
    assert!(rig.winch_down_energised());

    rig.command(AppCommand::SetTarget(15.0)).unwrap();

    assert!(!rig.app.auto_mode().is_enabled());
    assert!(!rig.any_relay_energised());
    assert!((rig.app.state().auto_mode_target_m() - 15.0).abs() < f32::EPSILON);
}

#[test]
fn disabling_auto_is_accepted_while_blocked() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::SetTarget(10.0)).unwrap();
    rig.command(AppCommand::SetAutoMode(true)).unwrap();
    rig.disconnect();

    assert_eq!(rig.command(AppCommand::SetAutoMode(false)), Ok(()));
    assert!(!rig.any_relay_energised());
}

// ── Home ──────────────────────────────────────────────────────

#[test]
fn home_command_retrieves_until_sensor_and_rezeroes() {
    let mut rig = Rig::connected();
    rig.set_pulses(500);
    rig.advance(100, NO_BUTTONS);

    rig.command(AppCommand::Home).unwrap();
    assert!(rig.app.auto_mode().is_home_target());
    assert!(!rig.any_relay_energised());

    rig.command(AppCommand::SetAutoMode(true)).unwrap();
    assert!(rig.winch_up_energised());

    rig.set_pulses(3);
    rig.advance(200, NO_BUTTONS);
    assert!(rig.winch_up_energised());

    rig.set_home(true);
    rig.advance(100, NO_BUTTONS);

    assert!(!rig.any_relay_energised());
    assert_eq!(rig.app.state().pulse_count(), 0);
    assert_eq!(rig.app.state().rode_length_m(), 0.0);
    assert!(!rig.app.auto_mode().is_enabled());
    assert!(rig.sink.contains(&AppEvent::HomeReached));
}

#[test]
fn home_arrival_rezeroes_once_per_arrival() {
    let mut rig = Rig::connected();
    rig.set_home(true);
    rig.advance(100, NO_BUTTONS);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::HomeReached), 1);

    // Drift while sitting home is not re-zeroed without a new arrival.
    rig.set_pulses(4);
    rig.advance(300, NO_BUTTONS);
    assert_eq!(rig.app.state().pulse_count(), 4);

    rig.set_home(false);
    rig.advance(100, NO_BUTTONS);
    rig.set_home(true);
    rig.advance(100, NO_BUTTONS);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::HomeReached), 2);
    assert_eq!(rig.app.state().pulse_count(), 0);
}

#[test]
fn home_rejected_while_manual_winch_runs() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::Manual(ManualCommand::Down)).unwrap();

    assert_eq!(
        rig.command(AppCommand::Home),
        Err(CommandRejected::ManualControlActive)
    );
    assert!(!rig.app.auto_mode().has_target());
}

// ── Reset ─────────────────────────────────────────────────────

#[test]
fn reset_rode_zeroes_and_clears_target() {
    let mut rig = Rig::connected();
    rig.set_pulses(300);
    rig.advance(100, NO_BUTTONS);
    rig.command(AppCommand::SetTarget(1.0)).unwrap();
    rig.command(AppCommand::SetAutoMode(true)).unwrap();
    assert!(rig.any_relay_energised());

    rig.command(AppCommand::ResetRode).unwrap();

    assert!(!rig.any_relay_energised());
    assert_eq!(rig.app.state().pulse_count(), 0);
    assert_eq!(rig.app.state().rode_length_m(), 0.0);
    assert_eq!(rig.app.auto_mode().state(), AutoModeState::Disarmed);
    assert!(rig.sink.contains(&AppEvent::RodeReset));
}

// ── Bow thruster ──────────────────────────────────────────────

#[test]
fn bow_commands_drive_thruster_relays() {
    let mut rig = Rig::connected();

    rig.command(AppCommand::Bow(BowCommand::Port)).unwrap();
    assert!(rig.bow_port_energised());
    assert!(!rig.bow_starboard_energised());

    rig.command(AppCommand::Bow(BowCommand::Starboard)).unwrap();
    assert!(rig.bow_starboard_energised());
    assert!(!rig.bow_port_energised());

    rig.command(AppCommand::Bow(BowCommand::Stop)).unwrap();
    assert!(!rig.any_relay_energised());
    assert!(rig.sink.contains(&AppEvent::BowThruster(ThrusterDirection::Stopped)));
}

#[test]
fn blocked_bow_command_reports_stop() {
    let mut rig = Rig::new();
    assert_eq!(
        rig.command(AppCommand::Bow(BowCommand::Port)),
        Err(CommandRejected::CommandsBlocked)
    );
    assert!(!rig.bow_port_energised());
    assert!(rig.sink.contains(&AppEvent::BowThruster(ThrusterDirection::Stopped)));
}

#[test]
fn bow_command_without_thruster() {
    let mut rig = Rig::without_bow();
    assert_eq!(
        rig.command(AppCommand::Bow(BowCommand::Port)),
        Err(CommandRejected::NoThruster)
    );
    assert_eq!(rig.app.build_telemetry().bow, None);
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn config_update_recalibrates_rode_length() {
    let mut rig = Rig::connected();
    rig.set_pulses(40);
    rig.advance(100, NO_BUTTONS);

    let cfg = SystemConfig {
        meters_per_pulse: 0.1,
        link_settle_ms: 0,
        ..SystemConfig::default()
    };
    rig.command(AppCommand::UpdateConfig(cfg)).unwrap();

    assert!((rig.app.state().rode_length_m() - 4.0).abs() < 1e-4);
    assert!((rig.app.auto_mode().tolerance() - 0.2).abs() < 1e-6);
    assert!((rig.app.current_config().meters_per_pulse - 0.1).abs() < 1e-6);
}

#[test]
fn invalid_config_is_rejected() {
    let mut rig = Rig::connected();
    let cfg = SystemConfig {
        meters_per_pulse: -1.0,
        ..SystemConfig::default()
    };
    assert!(matches!(
        rig.command(AppCommand::UpdateConfig(cfg)),
        Err(CommandRejected::InvalidConfig(_))
    ));
    assert!((rig.app.current_config().meters_per_pulse - 0.01).abs() < 1e-6);
}

#[test]
fn boot_only_config_changes_are_rejected() {
    let mut rig = Rig::connected();
    let before = rig.app.current_config();

    for cfg in [
        SystemConfig {
            meters_per_pulse: 0.1,
            bow_thruster_installed: false,
            ..before.clone()
        },
        SystemConfig {
            telemetry_interval_ms: 5000,
            ..before.clone()
        },
        SystemConfig {
            control_loop_interval_ms: 20,
            ..before.clone()
        },
    ] {
        assert!(matches!(
            rig.command(AppCommand::UpdateConfig(cfg)),
            Err(CommandRejected::InvalidConfig(_))
        ));
    }

    // Nothing from the rejected updates leaked into the live config.
    assert_eq!(rig.app.current_config(), before);
    assert!(rig.app.bow().is_some());
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_snapshot() {
    let mut rig = Rig::connected();
    rig.set_pulses(1234);
    rig.advance(100, NO_BUTTONS);
    rig.command(AppCommand::SetTarget(8.0)).unwrap();

    let t = rig.app.build_telemetry();

    assert_eq!(t.pulse_count, 1234);
    assert!((t.rode_length_m - 12.34).abs() < 1e-3);
    assert_eq!(t.winch, MotorDirection::Stopped);
    assert_eq!(t.bow, Some(ThrusterDirection::Stopped));
    assert_eq!(t.auto_mode, AutoModeState::ArmedDisabled);
    assert!((t.target_m - 8.0).abs() < f32::EPSILON);
    assert!(t.commands_allowed);
    assert!(!t.emergency_stop);
    assert!(!t.at_home);
}
