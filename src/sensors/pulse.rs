//! Chain-counter pulse sensing and rode length service.
//!
//! A hall sensor on the gypsy emits one pulse per chain link; a second
//! input tells the direction (HIGH = paying out).  The GPIO ISR adjusts a
//! [`PulseCounter`] by ±1 and does nothing else.  Converting counts to metres, home
//! arrival and departure handling and feeding the automatic mode controller
//! happen in [`PulseCounterService`] on the cooperative control loop.
//!
//! The counter is an `AtomicI32` so the ISR and the main loop can share it
//! lock-free; the read-modify-write uses a CAS loop so the floor-at-zero
//! clamp cannot race with a concurrent reset.

use core::sync::atomic::{AtomicI32, Ordering};

use log::{debug, info};

use crate::app::ports::{BinarySensor, Motor};
use crate::control::auto_mode::AutomaticModeController;
use crate::control::winch::WinchController;
use crate::state::StateManager;

/// Diagnostics line interval for the pulse service.
const DEBUG_LOG_INTERVAL_MS: u64 = 5000;

/// Bidirectional pulse counter, never negative.
#[derive(Debug, Default)]
pub struct PulseCounter {
    count: AtomicI32,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicI32::new(0),
        }
    }

    /// ISR entry point: one pulse in the direction read from the direction pin.
    #[inline]
    pub fn record_pulse(&self, paying_out: bool) {
        if paying_out {
            self.increment();
        } else {
            self.decrement();
        }
    }

    /// Chain out.
    pub fn increment(&self) {
        // Closure never returns None, so fetch_update cannot fail.
        let _ = self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| {
                Some(c.saturating_add(1))
            });
    }

    /// Chain in.  Clamps at zero instead of going negative.
    pub fn decrement(&self) {
        let _ = self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| {
                Some(c.saturating_sub(1).max(0))
            });
    }

    pub fn get(&self) -> i32 {
        self.count.load(Ordering::Acquire)
    }

    /// Overwrite the count; negative values are stored as zero.
    pub fn set(&self, count: i32) {
        self.count.store(count.max(0), Ordering::Release);
    }

    pub fn reset(&self) {
        self.set(0);
    }
}

/// Periodic rode length computation and authoritative home handling.
pub struct PulseCounterService {
    interval_ms: u64,
    last_update_ms: Option<u64>,
    last_debug_ms: u64,
}

impl PulseCounterService {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            last_update_ms: None,
            last_debug_ms: 0,
        }
    }

    pub fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval_ms = u64::from(interval_ms);
    }

    /// True when the configured interval has elapsed since the last update.
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.last_update_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.interval_ms)
    }

    /// Run one service update.  Returns `true` if the home sensor reported
    /// an arrival edge on this update (the counter was re-zeroed).
    pub fn update<M: Motor, S: BinarySensor>(
        &mut self,
        now_ms: u64,
        state: &mut StateManager,
        winch: &mut WinchController<M, S>,
        auto: &mut AutomaticModeController,
    ) -> bool {
        self.last_update_ms = Some(now_ms);
        let mut arrived = false;

        if winch.home_mut().is_home() {
            if winch.is_moving_up() {
                winch.stop();
                info!("Anchor home reached - winch stopped");
            }

            if winch.home_mut().just_arrived() {
                state.pulses().reset();
                arrived = true;
                info!("Anchor at home - pulse counter reset");
            }

            if auto.is_enabled() && auto.is_home_target() {
                auto.set_enabled(false, winch);
                info!("Auto-home reached - automatic mode disabled");
            }
        } else {
            // Keeps the shared edge latch current so the next arrival is seen.
            let _ = winch.home_mut().just_left();
        }

        let meters = state.refresh_rode_length();

        if now_ms.saturating_sub(self.last_debug_ms) >= DEBUG_LOG_INTERVAL_MS {
            debug!("Pulses: {}, Chain: {:.2} m", state.pulse_count(), meters);
            self.last_debug_ms = now_ms;
        }

        arrived
    }
}
