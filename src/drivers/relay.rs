//! Interlocked relay pair.
//!
//! Both the winch contactor and the bow thruster are switched by a pair of
//! active-LOW relays (HIGH = released, the safe boot level).  Energising one
//! side always releases the opposite relay **first**, and only after that
//! release write succeeded.
//!
//! Each coil is tracked from the writes that succeeded.  A failed release
//! leaves its side recorded as energised, so [`RelayPair::state`] keeps
//! reporting motion and the next stop retries the write.
//!
//! ```text
//!   energise(A):  B ← HIGH (release)  ──▶  A ← LOW (energise)
//!   energise(B):  A ← HIGH (release)  ──▶  B ← LOW (energise)
//!   release():    A ← HIGH, B ← HIGH
//! ```

use embedded_hal::digital::OutputPin;
use log::error;

/// Which relay of the pair is energised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelaySide {
    #[default]
    Released,
    A,
    B,
}

pub struct RelayPair<A: OutputPin, B: OutputPin> {
    a: A,
    b: B,
    a_energised: bool,
    b_energised: bool,
}

impl<A: OutputPin, B: OutputPin> RelayPair<A, B> {
    /// Takes ownership of both pins and drives them to the released level.
    pub fn new(a: A, b: B) -> Self {
        let mut pair = Self {
            a,
            b,
            a_energised: false,
            b_energised: false,
        };
        pair.release();
        pair
    }

    pub fn energise_a(&mut self) {
        if !Self::write(&mut self.b, &mut self.b_energised, false, "B") {
            self.release();
            return;
        }
        if !Self::write(&mut self.a, &mut self.a_energised, true, "A") {
            self.release();
        }
    }

    pub fn energise_b(&mut self) {
        if !Self::write(&mut self.a, &mut self.a_energised, false, "A") {
            self.release();
            return;
        }
        if !Self::write(&mut self.b, &mut self.b_energised, true, "B") {
            self.release();
        }
    }

    /// Release both relays.  Both writes are attempted even if the first
    /// one fails.
    pub fn release(&mut self) {
        Self::write(&mut self.a, &mut self.a_energised, false, "A");
        Self::write(&mut self.b, &mut self.b_energised, false, "B");
    }

    /// Observed state.  Both sides energised cannot be reached through the
    /// release-first ordering; it would report `A`.
    pub fn state(&self) -> RelaySide {
        if self.a_energised {
            RelaySide::A
        } else if self.b_energised {
            RelaySide::B
        } else {
            RelaySide::Released
        }
    }

    /// Drive one relay; `energise` maps to LOW.  The tracked level only
    /// changes when the write succeeds.  Returns `false` on failure.
    fn write<P: OutputPin>(pin: &mut P, tracked: &mut bool, energise: bool, side: &str) -> bool {
        let result = if energise {
            pin.set_low()
        } else {
            pin.set_high()
        };
        match result {
            Ok(()) => {
                *tracked = energise;
                true
            }
            Err(e) => {
                error!("relay {} write failed: {:?}", side, e);
                false
            }
        }
    }
}
