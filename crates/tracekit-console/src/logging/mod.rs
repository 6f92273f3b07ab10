//! Logger service and bridges.
//!
//! This module provides everything that ends up calling the console sink:
//! - [`TraceLogger`] - The process-wide logger service (presets, colors, debug flag)
//! - [`LogBridge`] - A `log` crate logger feeding other code's records into it
//! - [`TraceLayer`] / [`TraceSubscriberBuilder`] - The same for `tracing` events
//!
//! # Architecture
//!
//! Every path is gated by the debug flag of the logger it writes through:
//! with the flag off nothing reaches the console, whether the line came from
//! a direct `log` call, an interceptor, a bridged `log` record or a
//! `tracing` event.
//!
//! # Example
//!
//! ```ignore
//! use tracekit_console::{ConsoleMethod, Payload, Preset, logger};
//!
//! logger().set_debug(true);
//! logger().log(Preset::Variable, Payload::slot("count", ["42"]));
//! logger().log(ConsoleMethod::Error, "disk full");
//! ```

mod bridge;
mod service;
mod subscriber;

pub use bridge::{LogBridge, LogBridgeBuilder};
pub use service::{TraceLogger, init_logger, init_logger_with, logger};
pub use subscriber::{TraceLayer, TraceSubscriberBuilder};

use tracekit_core::{Color, ConsoleMethod};

/// Console method a bridged record of this level is written with.
fn method_for(level: log::Level) -> ConsoleMethod {
    match level {
        log::Level::Error => ConsoleMethod::Error,
        log::Level::Warn => ConsoleMethod::Warn,
        log::Level::Info => ConsoleMethod::Info,
        log::Level::Debug | log::Level::Trace => ConsoleMethod::Debug,
    }
}

/// Color a bridged record of this level is painted with.
fn color_for(level: log::Level) -> Option<Color> {
    match level {
        log::Level::Error => Some(Color::Red),
        log::Level::Warn => Some(Color::Yellow),
        _ => None,
    }
}
