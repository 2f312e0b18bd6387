//! Wired remote: deadman-switch manual control and emergency gestures.
//!
//! ## Motion
//!
//! The winch runs only while UP or DOWN is held.  Releasing both stops it,
//! but only if the remote started the motion (`remote_active`), so the
//! remote never stomps on automatic-mode motion it did not initiate.  Any
//! UP/DOWN press while automatic mode is enabled disables it first.
//! FUNC3/FUNC4 drive the bow thruster the same way.
//!
//! ## Gestures
//!
//! | Gesture      | Condition                                         | Result          |
//! |--------------|---------------------------------------------------|-----------------|
//! | Double press | Press edge within the window of the previous one  | Emergency stop  |
//! | Long press   | Held for `long_press_ms` while emergency stop set | Clear, once/hold |
//!
//! While the emergency stop is set, presses are ignored for motion; the
//! long-press clear is the only thing the remote can do.  The hold that
//! cleared it drives nothing until every button is released.

use log::{info, warn};

use crate::app::ports::{BinarySensor, Motor, RemoteButtons, Thruster};

use super::auto_mode::AutomaticModeController;
use super::bow::BowPropellerController;
use super::winch::WinchController;

/// Emergency-stop gestures recognised on the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteGesture {
    EmergencyStop,
    ClearEmergencyStop,
}

pub struct RemoteControl {
    double_press_window_ms: u64,
    long_press_ms: u64,
    prev_any_active: bool,
    last_press_ms: Option<u64>,
    press_start_ms: Option<u64>,
    long_press_fired: bool,
    hold_after_clear: bool,
    remote_active: bool,
    bow_active: bool,
}

impl RemoteControl {
    pub fn new(double_press_window_ms: u32, long_press_ms: u32) -> Self {
        Self {
            double_press_window_ms: u64::from(double_press_window_ms),
            long_press_ms: u64::from(long_press_ms),
            prev_any_active: false,
            last_press_ms: None,
            press_start_ms: None,
            long_press_fired: false,
            hold_after_clear: false,
            remote_active: false,
            bow_active: false,
        }
    }

    pub fn set_gesture_timing(&mut self, double_press_window_ms: u32, long_press_ms: u32) {
        self.double_press_window_ms = u64::from(double_press_window_ms);
        self.long_press_ms = u64::from(long_press_ms);
    }

    /// True while the remote is driving the winch.
    pub fn is_remote_active(&self) -> bool {
        self.remote_active
    }

    /// True while the remote is driving the bow thruster.
    pub fn is_bow_active(&self) -> bool {
        self.bow_active
    }

    /// Run gesture detection on one button sample.
    pub fn detect_gesture(
        &mut self,
        buttons: RemoteButtons,
        now_ms: u64,
        estop_active: bool,
    ) -> Option<RemoteGesture> {
        let any = buttons.any();
        let mut gesture = None;

        if any && !self.prev_any_active {
            let double = self
                .last_press_ms
                .is_some_and(|last| now_ms.saturating_sub(last) <= self.double_press_window_ms);
            self.last_press_ms = Some(now_ms);
            self.press_start_ms = Some(now_ms);
            self.long_press_fired = false;

            if double && !estop_active {
                warn!("Remote double press - emergency stop");
                // The hold that follows the second press must not clear it.
                self.long_press_fired = true;
                gesture = Some(RemoteGesture::EmergencyStop);
            }
        } else if any {
            if let Some(start) = self.press_start_ms {
                if estop_active
                    && !self.long_press_fired
                    && now_ms.saturating_sub(start) >= self.long_press_ms
                {
                    info!("Remote long press - clearing emergency stop");
                    self.long_press_fired = true;
                    self.hold_after_clear = true;
                    gesture = Some(RemoteGesture::ClearEmergencyStop);
                }
            }
        } else {
            self.press_start_ms = None;
            self.long_press_fired = false;
            self.hold_after_clear = false;
        }

        self.prev_any_active = any;
        gesture
    }

    /// Apply deadman-switch motion for one button sample.
    pub fn drive<M, S, T>(
        &mut self,
        buttons: RemoteButtons,
        estop_active: bool,
        winch: &mut WinchController<M, S>,
        bow: Option<&mut BowPropellerController<T>>,
        auto: &mut AutomaticModeController,
    ) where
        M: Motor,
        S: BinarySensor,
        T: Thruster,
    {
        if estop_active {
            if self.remote_active {
                winch.stop();
                self.remote_active = false;
            }
            if self.bow_active {
                if let Some(bow) = bow {
                    bow.stop();
                }
                self.bow_active = false;
            }
            return;
        }

        let buttons = if self.hold_after_clear {
            RemoteButtons::default()
        } else {
            buttons
        };

        if (buttons.up || buttons.down) && auto.is_enabled() {
            info!("Remote override - automatic mode disabled");
            auto.set_enabled(false, winch);
        }

        if buttons.up {
            if !winch.is_moving_up() {
                winch.move_up();
            }
            self.remote_active = true;
        } else if buttons.down {
            if !winch.is_moving_down() {
                winch.move_down();
            }
            self.remote_active = true;
        } else if self.remote_active {
            winch.stop();
            self.remote_active = false;
        }

        let Some(bow) = bow else {
            return;
        };
        if buttons.func3 {
            if !bow.is_turning_port() {
                bow.turn_port();
            }
            self.bow_active = true;
        } else if buttons.func4 {
            if !bow.is_turning_starboard() {
                bow.turn_starboard();
            }
            self.bow_active = true;
        } else if self.bow_active {
            bow.stop();
            self.bow_active = false;
        }
    }
}
