//! Link gating: settle time, loss handling and what stays available offline.

use windlass::app::commands::{AppCommand, BowCommand, ManualCommand};
use windlass::app::events::AppEvent;
use windlass::app::ports::RemoteButtons;
use windlass::config::SystemConfig;
use windlass::error::CommandRejected;

use crate::mock_hw::{NO_BUTTONS, Rig};

#[test]
fn commands_wait_for_the_default_settle_time() {
    let mut rig = Rig::with_config(SystemConfig::default());
    rig.connect();
    assert!(!rig.app.state().commands_allowed());

    rig.advance(4990, NO_BUTTONS);
    assert_eq!(
        rig.command(AppCommand::Manual(ManualCommand::Down)),
        Err(CommandRejected::CommandsBlocked)
    );
    assert!(!rig.any_relay_energised());

    rig.advance(10, NO_BUTTONS);
    assert!(rig.app.state().commands_allowed());
    assert!(rig.sink.contains(&AppEvent::CommandsAllowed(true)));
    rig.command(AppCommand::Manual(ManualCommand::Down)).unwrap();
    assert!(rig.winch_down_energised());
}

#[test]
fn dropping_during_settle_restarts_the_wait() {
    let mut rig = Rig::with_config(SystemConfig::default());
    rig.connect();
    rig.advance(3000, NO_BUTTONS);
    rig.disconnect();
    rig.connect();
    rig.advance(3000, NO_BUTTONS);
    assert!(!rig.app.state().commands_allowed());
    rig.advance(2000, NO_BUTTONS);
    assert!(rig.app.state().commands_allowed());
}

#[test]
fn link_loss_halts_automatic_motion() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::SetTarget(25.0)).unwrap();
    rig.command(AppCommand::SetAutoMode(true)).unwrap();
    rig.command(AppCommand::Bow(BowCommand::Port)).unwrap();
    assert!(rig.winch_down_energised());

    rig.disconnect();

    assert!(!rig.any_relay_energised());
    assert!(!rig.app.auto_mode().is_enabled());
    assert!(!rig.app.state().commands_allowed());
    assert!(rig.sink.contains(&AppEvent::CommandsAllowed(false)));
    assert!(rig.sink.contains(&AppEvent::AutoModeChanged {
        enabled: false,
        target_m: 25.0,
    }));

    // Ticking on does not restart anything.
    rig.advance(500, NO_BUTTONS);
    assert!(!rig.any_relay_energised());
}

#[test]
fn every_gated_command_is_refused_offline() {
    let mut rig = Rig::new();
    for cmd in [
        AppCommand::SetTarget(5.0),
        AppCommand::SetAutoMode(true),
        AppCommand::Home,
        AppCommand::ResetRode,
        AppCommand::Bow(BowCommand::Starboard),
        AppCommand::UpdateConfig(SystemConfig::default()),
    ] {
        assert_eq!(rig.command(cmd), Err(CommandRejected::CommandsBlocked));
    }
    assert!(!rig.any_relay_energised());
    assert!(!rig.app.auto_mode().has_target());
}

#[test]
fn blocked_manual_reports_stop_without_touching_outputs() {
    let mut rig = Rig::new();
    rig.advance(50, RemoteButtons { down: true, ..NO_BUTTONS });
    assert!(rig.winch_down_energised());

    assert_eq!(
        rig.command(AppCommand::Manual(ManualCommand::Up)),
        Err(CommandRejected::CommandsBlocked)
    );
    assert_eq!(rig.app.state().manual_control(), ManualCommand::Stop);
    assert!(rig.sink.contains(&AppEvent::ManualControl(ManualCommand::Stop)));
    // The remote still owns the winch.
    assert!(rig.winch_down_energised());
}

#[test]
fn remote_keeps_working_offline() {
    let mut rig = Rig::new();
    rig.advance(100, RemoteButtons { up: true, ..NO_BUTTONS });
    assert!(rig.winch_up_energised());
    rig.advance(10, NO_BUTTONS);
    assert!(!rig.any_relay_energised());
}
