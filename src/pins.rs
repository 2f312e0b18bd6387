//! GPIO pin assignments for the windlass controller board.
//!
//! Single source for every pin number: `main.rs` builds its pin drivers
//! from these and the interrupt setup configures the pulse inputs with them.
//! None of them may be an input-only pad (GPIO34-39), since the relay and
//! pulled inputs need the output stage.

// ---------------------------------------------------------------------------
// Chain counter (hall sensor on the gypsy)
// ---------------------------------------------------------------------------

/// Pulse input, one rising edge per chain link.  Pulled up.
pub const PULSE_INPUT_GPIO: i32 = 25;
/// Direction input sampled by the pulse ISR.  HIGH = paying out.
pub const DIRECTION_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// Anchor home sensor
// ---------------------------------------------------------------------------

/// Proximity switch, active-LOW with pull-up: LOW = anchor stowed.
pub const ANCHOR_HOME_GPIO: i32 = 33;

// ---------------------------------------------------------------------------
// Winch contactor relays (active-LOW, HIGH = released)
// ---------------------------------------------------------------------------

pub const WINCH_UP_GPIO: i32 = 27;
pub const WINCH_DOWN_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Bow thruster relays (active-LOW, HIGH = released)
// ---------------------------------------------------------------------------

pub const BOW_PORT_GPIO: i32 = 18;
pub const BOW_STARBOARD_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Wired remote (active-HIGH momentary buttons)
// ---------------------------------------------------------------------------

pub const REMOTE_UP_GPIO: i32 = 12;
pub const REMOTE_DOWN_GPIO: i32 = 13;
/// Function button 3: bow thruster port.
pub const REMOTE_FUNC3_GPIO: i32 = 15;
/// Function button 4: bow thruster starboard.
pub const REMOTE_FUNC4_GPIO: i32 = 16;
