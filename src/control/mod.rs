//! Control layer: winch and bow thruster controllers, automatic rode
//! positioning, and the wired remote.

pub mod auto_mode;
pub mod bow;
pub mod remote;
pub mod winch;
