//! Automatic rode positioning.
//!
//! Arm-and-fire state machine: a target length is armed first, then
//! automatic mode is enabled.  Arming never starts motion by itself.
//!
//! ```text
//!                set_target(m ≥ 0)            set_enabled(true)
//!   ┌──────────┐ ─────────────────▶ ┌──────────────┐ ─────────────▶ ┌────────┐
//!   │ DISARMED │                    │ARMED_DISABLED│                │ ACTIVE │
//!   └──────────┘ ◀───────────────── └──────────────┘ ◀───────────── └────────┘
//!                 set_target(-1)        set_enabled(false) / target reached
//! ```
//!
//! Two control regimes run in [`update`](AutomaticModeController::update):
//!
//! - **Home-seeking** (target `0.0`): keep retrieving until the home sensor
//!   is active.  Completion is handled by the pulse counter service on the
//!   home arrival edge, never from inside `update`.
//! - **Distance** (target `> 0`): bang-bang control with a symmetric
//!   tolerance band.  Inside the band (inclusive) the winch stops, the mode
//!   disables itself and a one-shot "reached" flag is latched for
//!   [`consume_target_reached`](AutomaticModeController::consume_target_reached).
//!   The armed target is kept so the last target can still be shown.

use log::{debug, info};

use crate::app::ports::{BinarySensor, Motor};

use super::winch::WinchController;

/// Sentinel for "no target armed".
pub const NO_TARGET: f32 = -1.0;

/// Observable automatic mode state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoModeState {
    #[default]
    Disarmed,
    ArmedDisabled,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    None,
    Home,
    Length(f32),
}

impl Target {
    /// Negative and NaN values mean "no target"; exactly zero is home.
    fn from_meters(meters: f32) -> Self {
        if meters.is_nan() || meters < 0.0 {
            Self::None
        } else if meters <= 0.0 {
            Self::Home
        } else {
            Self::Length(meters)
        }
    }

    fn meters(self) -> f32 {
        match self {
            Self::None => NO_TARGET,
            Self::Home => 0.0,
            Self::Length(m) => m,
        }
    }
}

#[derive(Debug)]
pub struct AutomaticModeController {
    enabled: bool,
    target: Target,
    tolerance_m: f32,
    target_reached: bool,
}

impl AutomaticModeController {
    pub fn new(tolerance_m: f32) -> Self {
        Self {
            enabled: false,
            target: Target::None,
            tolerance_m,
            target_reached: false,
        }
    }

    // ── Arming ────────────────────────────────────────────────

    /// Arm a target length in metres.  Does not change `enabled`.
    pub fn set_target_length(&mut self, meters: f32) {
        self.target = Target::from_meters(meters);
        debug!("Auto target armed: {:.2} m", self.target.meters());
    }

    /// Armed target in metres, [`NO_TARGET`] when none.
    pub fn target_length(&self) -> f32 {
        self.target.meters()
    }

    pub fn is_home_target(&self) -> bool {
        self.target == Target::Home
    }

    pub fn has_target(&self) -> bool {
        self.target != Target::None
    }

    // ── Firing ────────────────────────────────────────────────

    /// Enable or disable automatic mode.  Returns the resulting enabled
    /// flag: enabling without an armed target is refused.
    ///
    /// Disabling always stops the winch, even if the mode was already off.
    pub fn set_enabled<M: Motor, S: BinarySensor>(
        &mut self,
        enabled: bool,
        winch: &mut WinchController<M, S>,
    ) -> bool {
        if enabled {
            if !self.has_target() {
                debug!("Auto mode enable refused: no target");
                return false;
            }
            if !self.enabled {
                info!("Auto mode enabled, target {:.2} m", self.target.meters());
            }
            self.enabled = true;
            self.target_reached = false;
        } else {
            winch.stop();
            if self.enabled {
                info!("Auto mode disabled");
            }
            self.enabled = false;
        }
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> AutoModeState {
        match (self.target, self.enabled) {
            (Target::None, _) => AutoModeState::Disarmed,
            (_, true) => AutoModeState::Active,
            (_, false) => AutoModeState::ArmedDisabled,
        }
    }

    // ── Tuning ────────────────────────────────────────────────

    pub fn set_tolerance(&mut self, tolerance_m: f32) {
        self.tolerance_m = tolerance_m;
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance_m
    }

    /// One-shot completion flag; returns `true` once per reached target.
    pub fn consume_target_reached(&mut self) -> bool {
        core::mem::take(&mut self.target_reached)
    }

    // ── Control loop ──────────────────────────────────────────

    /// Control tick.  No-op unless enabled with an armed target.
    pub fn update<M: Motor, S: BinarySensor>(
        &mut self,
        current_m: f32,
        winch: &mut WinchController<M, S>,
    ) {
        if !self.enabled {
            return;
        }

        match self.target {
            Target::None => {}
            Target::Home => {
                if !winch.is_home() && !winch.is_moving_up() {
                    winch.move_up();
                }
            }
            Target::Length(target) => {
                let error = current_m - target;
                if error.abs() <= self.tolerance_m {
                    if winch.is_active() {
                        winch.stop();
                    }
                    self.enabled = false;
                    self.target_reached = true;
                    info!(
                        "Auto target {:.2} m reached at {:.2} m - auto mode disabled",
                        target, current_m
                    );
                } else if error < 0.0 {
                    if !winch.is_moving_down() {
                        winch.move_down();
                    }
                } else if !winch.is_moving_up() {
                    winch.move_up();
                }
            }
        }
    }
}
