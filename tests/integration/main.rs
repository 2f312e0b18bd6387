//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! through [`windlass::app::service::AnchorApp`] wired to mock pins.  All
//! tests run on the host (x86_64) with no real hardware required.

mod app_service_tests;
mod estop_tests;
mod link_tests;
