//! Backend test support utilities
//!
//! Shared logging initialisation and unique test-data helpers for the
//! integration suites.

pub mod logging;
pub mod unique_helpers;
