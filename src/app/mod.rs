//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the orchestration rules for the windlass
//! controller: command gating, link health, and the per-tick ordering of
//! the remote, pulse counter and automatic mode.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod link;
pub mod ports;
pub mod service;
