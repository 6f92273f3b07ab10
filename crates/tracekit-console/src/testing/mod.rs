//! Testing utilities for tracekit console output
//!
//! Provides `TestConsole` for capturing and asserting on trace lines in tests.

mod test_console;

pub use test_console::{SharedBuffer, TestConsole};
