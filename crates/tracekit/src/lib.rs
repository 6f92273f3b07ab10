//! tracekit: console tracing for humans.
//!
//! tracekit prints color-coded, preset-prefixed trace lines to the console
//! while a global debug flag is on, and nothing at all while it is off.
//! Beyond direct logging it can trace code declaratively: a method, a field
//! or a constructor is wrapped once and every call, read, write or
//! construction is announced without the code calling the logger itself.
//!
//! # Quick Start
//!
//! ```ignore
//! use tracekit::prelude::*;
//!
//! #[derive(Instrument)]
//! #[instrument(color = "cyan", param(1, redact))]
//! struct Account {
//!     owner: String,
//!     pin: u32,
//! }
//!
//! impl Account {
//!     #[trace_constructor]
//!     fn new(owner: String, pin: u32) -> Self {
//!         Self { owner, pin }
//!     }
//!
//!     #[trace_method]
//!     fn deposit(&mut self, amount: u64) -> u64 {
//!         amount
//!     }
//! }
//!
//! fn main() -> TraceResult<()> {
//!     init_logger(&TraceConfig::from_env())?;
//!     registry().install::<Account>()?;
//!     logger().set_debug(true);
//!
//!     let mut account = Account::new("ada".into(), 1234); // New: Account ["ada", <redacted>]
//!     account.deposit(10);
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! - `tracekit-core`: preset and color tables, request model, metadata registry
//! - `tracekit-console`: console sink, logger service, configuration
//! - `tracekit-macros`: `#[trace_method]`, `#[trace_constructor]`, `#[derive(Instrument)]`

#![forbid(unsafe_code)]

pub mod intercept;
pub mod testing;

// Re-export core types
pub use tracekit_core::render;
pub use tracekit_core::{
    Color, ConsoleMethod, Coordinate, Instrument, LogRequest, LogSpec, Member, MemberStyle,
    MetadataError, MetadataRegistry, Payload, Preset, SLOT_MARKER, Tag, TagKind, TraceError,
    TraceResult, TypeKey, TypeTags, registry,
};

// Re-export console types
pub use tracekit_console::{
    ColorChoice, Console, ConsoleSink, LogBridge, LogBridgeBuilder, TraceConfig, TraceLayer,
    TraceLogger, TraceSubscriberBuilder, console, init_console, init_logger, init_logger_with,
    logger, trace_log,
};

pub use intercept::{
    ArgList, Constructor, ConstructorInterceptor, Invocation, MethodInterceptor, Traced,
};

// Re-export macros
pub use tracekit_macros::{Instrument, trace_constructor, trace_method};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use tracekit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::intercept::{ConstructorInterceptor, MethodInterceptor, Traced};
    pub use crate::{
        Color, ConsoleMethod, Instrument, LogRequest, Payload, Preset, Tag, TraceConfig,
        TraceError, TraceLogger, TraceResult, TypeTags, init_logger, logger, registry,
        trace_constructor, trace_log, trace_method,
    };
}
