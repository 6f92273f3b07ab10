//! Test utilities for tracekit.
//!
//! - [`TestHarness`] bundles a logger writing to a [`TestConsole`] with a
//!   fresh registry, and hands out interceptors bound to both
//! - [`TestConsole`] is re-exported from `tracekit-console`

mod harness;

pub use harness::TestHarness;
pub use tracekit_console::testing::{SharedBuffer, TestConsole};
