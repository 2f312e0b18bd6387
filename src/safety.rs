//! Emergency stop service.
//!
//! The one place where "stop everything" is guaranteed.  The service is a
//! short-lived view over the actuators and the shared state, built by the
//! orchestrator whenever a command or a remote gesture asks for a change.
//!
//! ## Lifecycle
//!
//! 1. Activation stops the winch and the bow thruster, force-disables
//!    automatic mode, resets the manual command to stop and emits
//!    [`AppEvent::EmergencyStopChanged`].
//! 2. While active, every command entry point in the orchestrator rejects
//!    motion and the remote ignores presses.
//! 3. Clearing only drops the flag and notifies.  Nothing resumes; the
//!    operator must re-issue commands.
//!
//! Requests that match the current state are no-ops.

use log::{error, info};

use crate::app::commands::ManualCommand;
use crate::app::events::AppEvent;
use crate::app::ports::{BinarySensor, EventSink, Motor, Thruster};
use crate::control::auto_mode::AutomaticModeController;
use crate::control::bow::BowPropellerController;
use crate::control::winch::WinchController;
use crate::state::StateManager;

pub struct EmergencyStopService<'a, M: Motor, S: BinarySensor, T: Thruster> {
    state: &'a mut StateManager,
    winch: &'a mut WinchController<M, S>,
    bow: Option<&'a mut BowPropellerController<T>>,
    auto: &'a mut AutomaticModeController,
}

impl<'a, M: Motor, S: BinarySensor, T: Thruster> EmergencyStopService<'a, M, S, T> {
    pub fn new(
        state: &'a mut StateManager,
        winch: &'a mut WinchController<M, S>,
        bow: Option<&'a mut BowPropellerController<T>>,
        auto: &'a mut AutomaticModeController,
    ) -> Self {
        Self {
            state,
            winch,
            bow,
            auto,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.emergency_stop_active()
    }

    /// Set or clear the emergency stop.  Returns `true` if the state changed.
    pub fn set_active(
        &mut self,
        active: bool,
        reason: &'static str,
        sink: &mut impl EventSink,
    ) -> bool {
        if self.state.emergency_stop_active() == active {
            return false;
        }

        if active {
            self.winch.stop();
            if let Some(bow) = self.bow.as_deref_mut() {
                bow.stop();
            }

            let was_auto = self.auto.is_enabled();
            self.auto.set_enabled(false, &mut *self.winch);
            self.state.set_auto_mode(false, self.auto.target_length());
            self.state.set_manual_control(ManualCommand::Stop);
            self.state.set_emergency_stop_active(true);

            error!("EMERGENCY STOP ACTIVATED: {reason}");
            if was_auto {
                sink.emit(&AppEvent::AutoModeChanged {
                    enabled: false,
                    target_m: self.auto.target_length(),
                });
            }
        } else {
            self.state.set_emergency_stop_active(false);
            info!("Emergency stop cleared: {reason}");
        }

        sink.emit(&AppEvent::EmergencyStopChanged { active, reason });
        true
    }
}
