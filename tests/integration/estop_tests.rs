//! Emergency stop: activation fan-out, dominance over every other input,
//! gating of the command itself, and the remote gestures.

use windlass::app::commands::{AppCommand, BowCommand, ManualCommand};
use windlass::app::events::AppEvent;
use windlass::app::ports::RemoteButtons;
use windlass::error::CommandRejected;

use crate::mock_hw::{NO_BUTTONS, Rig};

const UP: RemoteButtons = RemoteButtons {
    up: true,
    ..NO_BUTTONS
};

fn estop_events(rig: &Rig, active: bool) -> usize {
    rig.sink.count(|e| {
        matches!(e, AppEvent::EmergencyStopChanged { active: a, .. } if *a == active)
    })
}

#[test]
fn activation_stops_every_actuator() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::SetTarget(30.0)).unwrap();
    rig.command(AppCommand::SetAutoMode(true)).unwrap();
    rig.command(AppCommand::Bow(BowCommand::Starboard)).unwrap();
    assert!(rig.winch_down_energised());
    assert!(rig.bow_starboard_energised());

    rig.command(AppCommand::EmergencyStop(true)).unwrap();

    assert!(!rig.any_relay_energised());
    assert!(rig.app.is_emergency_stop_active());
    assert!(!rig.app.auto_mode().is_enabled());
    assert!(!rig.app.state().auto_mode_enabled());
    assert_eq!(rig.app.state().manual_control(), ManualCommand::Stop);
    assert_eq!(estop_events(&rig, true), 1);
}

#[test]
fn repeated_activation_is_silent() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::EmergencyStop(true)).unwrap();
    rig.command(AppCommand::EmergencyStop(true)).unwrap();
    assert_eq!(estop_events(&rig, true), 1);
}

#[test]
fn nothing_moves_until_cleared() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::SetTarget(30.0)).unwrap();
    rig.command(AppCommand::EmergencyStop(true)).unwrap();

    for cmd in [
        AppCommand::Manual(ManualCommand::Down),
        AppCommand::Manual(ManualCommand::Up),
        AppCommand::SetAutoMode(true),
        AppCommand::Home,
        AppCommand::Bow(BowCommand::Port),
        AppCommand::SetTarget(5.0),
    ] {
        assert_eq!(
            rig.command(cmd),
            Err(CommandRejected::EmergencyStopActive)
        );
        assert!(!rig.any_relay_energised());
    }

    rig.advance(500, RemoteButtons { down: true, func3: true, ..NO_BUTTONS });
    assert!(!rig.any_relay_energised());
    rig.advance(100, NO_BUTTONS);

    rig.command(AppCommand::EmergencyStop(false)).unwrap();
    rig.command(AppCommand::Manual(ManualCommand::Down)).unwrap();
    assert!(rig.winch_down_energised());
}

#[test]
fn clearing_does_not_resume_motion() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::SetTarget(30.0)).unwrap();
    rig.command(AppCommand::SetAutoMode(true)).unwrap();
    rig.command(AppCommand::EmergencyStop(true)).unwrap();

    rig.command(AppCommand::EmergencyStop(false)).unwrap();
    rig.advance(500, NO_BUTTONS);

    assert!(!rig.app.is_emergency_stop_active());
    assert!(!rig.any_relay_energised());
    assert_eq!(estop_events(&rig, false), 1);
}

#[test]
fn activation_needs_the_link_but_clearing_does_not() {
    let mut rig = Rig::new();
    assert_eq!(
        rig.command(AppCommand::EmergencyStop(true)),
        Err(CommandRejected::CommandsBlocked)
    );
    assert!(!rig.app.is_emergency_stop_active());

    rig.connect();
    rig.command(AppCommand::EmergencyStop(true)).unwrap();
    rig.disconnect();

    assert_eq!(rig.command(AppCommand::EmergencyStop(false)), Ok(()));
    assert!(!rig.app.is_emergency_stop_active());
}

// ── Remote gestures ───────────────────────────────────────────

#[test]
fn remote_double_press_stops_everything() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::Bow(BowCommand::Port)).unwrap();

    rig.advance(100, UP);
    assert!(rig.winch_up_energised());
    rig.advance(200, NO_BUTTONS);
    assert!(!rig.winch_up_energised());
    rig.advance(10, UP);

    assert!(rig.app.is_emergency_stop_active());
    assert!(!rig.any_relay_energised());
    assert!(rig.sink.contains(&AppEvent::EmergencyStopChanged {
        active: true,
        reason: "remote double press",
    }));
}

#[test]
fn slow_presses_are_not_a_gesture() {
    let mut rig = Rig::new();
    rig.advance(100, UP);
    rig.advance(900, NO_BUTTONS);
    rig.advance(100, UP);
    assert!(!rig.app.is_emergency_stop_active());
}

#[test]
fn remote_long_press_clears_once() {
    let mut rig = Rig::connected();
    rig.command(AppCommand::EmergencyStop(true)).unwrap();
    rig.advance(1000, NO_BUTTONS);

    rig.advance(1990, UP);
    assert!(rig.app.is_emergency_stop_active());
    assert!(!rig.any_relay_energised());

    rig.advance(20, UP);
    assert!(!rig.app.is_emergency_stop_active());

    // Still holding: cleared exactly once, and the hold moves nothing.
    rig.advance(3000, UP);
    assert_eq!(estop_events(&rig, false), 1);
    assert!(!rig.any_relay_energised());

    // A fresh press after release drives again.
    rig.advance(1000, NO_BUTTONS);
    rig.advance(50, UP);
    assert!(rig.winch_up_energised());
}

#[test]
fn remote_gestures_work_without_link() {
    let mut rig = Rig::new();
    rig.advance(50, UP);
    rig.advance(50, NO_BUTTONS);
    rig.advance(10, UP);
    assert!(rig.app.is_emergency_stop_active());
}
