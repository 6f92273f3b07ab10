//! `log` crate bridge.
//!
//! Routes records emitted through the [`log`] facade by other code into a
//! [`TraceLogger`], so library diagnostics show up between trace lines.
//!
//! # Usage
//!
//! ```ignore
//! use tracekit_console::logging::LogBridge;
//! use log::Level;
//!
//! // Simple initialization over the global logger
//! LogBridge::init(Level::Info);
//!
//! // Or use the builder for more control
//! LogBridgeBuilder::new()
//!     .level(Level::Debug)
//!     .with_targets(true)
//!     .init();
//! ```
//!
//! Records from tracekit's own targets are never bridged; the logger
//! service logs through the facade itself and would otherwise feed back
//! into the console.

use std::sync::Arc;

use log::{Level, LevelFilter, Log, Metadata, Record};
use tracekit_core::logging::is_internal_target;
use tracekit_core::{LogRequest, Payload};

use super::{TraceLogger, color_for, method_for};

/// `log` facade implementation writing through a [`TraceLogger`].
///
/// `Error` and `Warn` records go to stderr in red and yellow, `Info` to the
/// `info` method and `Debug`/`Trace` to the `debug` method. Nothing is
/// written while the logger's debug flag is off.
pub struct LogBridge {
    logger: Arc<TraceLogger>,
    max_level: LevelFilter,
    show_targets: bool,
}

impl LogBridge {
    /// Create a bridge over the global logger with the given minimum level.
    #[must_use]
    pub fn new(min_level: Level) -> Self {
        Self {
            logger: Arc::clone(super::logger()),
            max_level: min_level.to_level_filter(),
            show_targets: false,
        }
    }

    /// Create a bridge using the builder pattern.
    #[must_use]
    pub fn builder() -> LogBridgeBuilder {
        LogBridgeBuilder::new()
    }

    /// Initialize as the global `log` logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(min_level: Level) -> Result<(), log::SetLoggerError> {
        LogBridgeBuilder::new().level(min_level).init()
    }

    /// Initialize as the global logger, ignoring errors if already set.
    pub fn try_init(min_level: Level) {
        let _ = Self::init(min_level);
    }

    /// Parts printed for a record.
    fn record_parts(&self, record: &Record) -> Vec<String> {
        let mut parts = Vec::with_capacity(2);
        if self.show_targets {
            parts.push(format!("[{}]", record.target()));
        }
        parts.push(record.args().to_string());
        parts
    }
}

/// Builder for configuring the log bridge.
///
/// # Example
///
/// ```ignore
/// use tracekit_console::logging::LogBridgeBuilder;
/// use log::Level;
///
/// LogBridgeBuilder::new()
///     .level(Level::Debug)
///     .with_targets(true)
///     .init()
///     .expect("Failed to initialize log bridge");
/// ```
#[derive(Debug)]
pub struct LogBridgeBuilder {
    logger: Option<Arc<TraceLogger>>,
    max_level: LevelFilter,
    show_targets: bool,
}

impl Default for LogBridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBridgeBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logger: None,
            max_level: LevelFilter::Info,
            show_targets: true,
        }
    }

    /// Write through this logger instead of the global one.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<TraceLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.max_level = level.to_level_filter();
        self
    }

    /// Set the level threshold from a filter, such as `TraceConfig::level`.
    ///
    /// `Off` bridges nothing.
    #[must_use]
    pub fn level_filter(mut self, filter: LevelFilter) -> Self {
        self.max_level = filter;
        self
    }

    /// Set whether to prefix lines with `[target]`.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.show_targets = show;
        self
    }

    /// Build the bridge without installing it.
    #[must_use]
    pub fn build(self) -> LogBridge {
        LogBridge {
            logger: self
                .logger
                .unwrap_or_else(|| Arc::clone(super::logger())),
            max_level: self.max_level,
            show_targets: self.show_targets,
        }
    }

    /// Build and install as the global `log` logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.max_level;
        log::set_boxed_logger(Box::new(self.build()))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Build and install, ignoring errors if already set.
    pub fn try_init(self) {
        let _ = self.init();
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level && !is_internal_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) || !self.logger.is_debug() {
            return;
        }

        let level = record.level();
        let mut request = LogRequest::from(method_for(level));
        request.color = color_for(level);
        self.logger
            .log(request, Payload::Args(self.record_parts(record)));
    }

    fn flush(&self) {}
}
