//! The logger service.
//!
//! A [`TraceLogger`] turns a [`LogRequest`] and a [`Payload`] into the list
//! of parts handed to the console sink. It owns the debug flag: with the
//! flag off every call is a silent no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracekit_core::logging::targets;
use tracekit_core::{Color, ConsoleMethod, LogRequest, Payload, TraceError, TraceResult};

use crate::config::TraceConfig;
use crate::console::{Console, ConsoleSink};

/// Composes trace lines and writes them to a console sink.
pub struct TraceLogger {
    debug: AtomicBool,
    console: Arc<dyn ConsoleSink>,
    accent: Color,
}

impl TraceLogger {
    /// Create a logger writing to `console`, debug off, green accent.
    #[must_use]
    pub fn new(console: Arc<dyn ConsoleSink>) -> Self {
        Self {
            debug: AtomicBool::new(false),
            console,
            accent: Color::Green,
        }
    }

    /// Create a logger from configuration, over a [`Console`] built from it.
    ///
    /// The initial debug flag is taken silently from the config.
    #[must_use]
    pub fn from_config(config: &TraceConfig) -> Self {
        Self::new(Arc::new(Console::from_config(config)))
            .with_accent(config.accent)
            .with_debug(config.debug)
    }

    /// Set the interceptor color.
    #[must_use]
    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Set the initial debug flag without announcing it.
    #[must_use]
    pub fn with_debug(self, debug: bool) -> Self {
        self.debug.store(debug, Ordering::Relaxed);
        self
    }

    /// Default color of interceptor lines.
    pub fn accent(&self) -> Color {
        self.accent
    }

    /// The sink lines are written to.
    pub fn console(&self) -> &Arc<dyn ConsoleSink> {
        &self.console
    }

    // ─────────────────────────────────────────────────
    // Debug Flag
    // ─────────────────────────────────────────────────

    /// Set the debug flag.
    ///
    /// The change is announced on the `log` method whatever the new value,
    /// so disabling output still prints `SET DEBUG:  false`.
    pub fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
        log::debug!(target: targets::LOGGER, "debug flag set to {enabled}");
        self.console.emit(
            ConsoleMethod::Log,
            &["SET DEBUG: ".to_string(), enabled.to_string()],
        );
    }

    /// Read the debug flag.
    pub fn is_debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    // ─────────────────────────────────────────────────
    // Output Methods
    // ─────────────────────────────────────────────────

    /// Compose and write a line.
    ///
    /// ```ignore
    /// logger.log(ConsoleMethod::Error, "disk full");
    /// logger.log(Preset::Variable, Payload::slot("count", ["42"]));
    /// logger.log(LogRequest::new().with_color(Color::Green), ["ok"]);
    /// ```
    pub fn log(&self, request: impl Into<LogRequest>, payload: impl Into<Payload>) {
        if !self.is_debug() {
            return;
        }
        let request = request.into();
        let parts = Self::compose(&request, payload.into());
        self.console.emit(request.method, &parts);
    }

    /// Build the part list for a request without writing it.
    ///
    /// The preset, when present, comes first; a color wraps everything in
    /// its escape and a trailing reset.
    #[must_use]
    pub fn compose(request: &LogRequest, payload: Payload) -> Vec<String> {
        let (mut parts, value) = payload.into_parts();
        if let Some(preset) = request.preset {
            parts.insert(0, preset.render(&value));
        }
        if let Some(color) = request.color {
            parts.insert(0, color.escape().to_string());
            parts.push(Color::Reset.escape().to_string());
        }
        parts
    }

    /// Write `args` painted in `color` on the `log` method.
    ///
    /// The escape is glued to the first argument and the reset to the last;
    /// no argument at all prints the bare escape and reset.
    pub fn paint<I, T>(&self, color: Color, args: I)
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        if !self.is_debug() {
            return;
        }
        let escape = color.escape();
        let reset = Color::Reset.escape();
        let mut parts: Vec<String> = args.into_iter().map(|a| a.to_string()).collect();
        if parts.is_empty() {
            parts.push(format!("{escape}{reset}"));
        } else {
            parts[0].insert_str(0, escape);
            if let Some(last) = parts.last_mut() {
                last.push_str(reset);
            }
        }
        self.console.emit(ConsoleMethod::Log, &parts);
    }

    /// [`paint`](Self::paint) in green.
    pub fn green<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        self.paint(Color::Green, args);
    }

    /// [`paint`](Self::paint) in red.
    pub fn red<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        self.paint(Color::Red, args);
    }

    /// [`paint`](Self::paint) in yellow.
    pub fn yellow<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        self.paint(Color::Yellow, args);
    }

    /// [`paint`](Self::paint) in blue.
    pub fn blue<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        self.paint(Color::Blue, args);
    }

    /// [`paint`](Self::paint) in magenta.
    pub fn magenta<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        self.paint(Color::Magenta, args);
    }

    /// [`paint`](Self::paint) in cyan.
    pub fn cyan<I, T>(&self, args: I)
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        self.paint(Color::Cyan, args);
    }
}

impl std::fmt::Debug for TraceLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceLogger")
            .field("debug", &self.is_debug())
            .field("accent", &self.accent)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────
// Global Logger Accessor
// ─────────────────────────────────────────────────────────

static LOGGER: OnceLock<Arc<TraceLogger>> = OnceLock::new();

/// Get the process-wide logger.
///
/// Created from default configuration on first access unless
/// [`init_logger`] ran before.
#[must_use]
pub fn logger() -> &'static Arc<TraceLogger> {
    LOGGER.get_or_init(|| Arc::new(TraceLogger::from_config(&TraceConfig::default())))
}

/// Create the process-wide logger from configuration.
///
/// Must be called before the first [`logger`] access; returns
/// [`TraceError::AlreadyInitialized`] otherwise.
pub fn init_logger(config: &TraceConfig) -> TraceResult<&'static Arc<TraceLogger>> {
    init_logger_with(TraceLogger::from_config(config))
}

/// Install a ready-made logger as the process-wide one.
pub fn init_logger_with(logger: TraceLogger) -> TraceResult<&'static Arc<TraceLogger>> {
    LOGGER
        .set(Arc::new(logger))
        .map_err(|_| TraceError::AlreadyInitialized)?;
    log::info!(target: targets::LOGGER, "logger initialized");
    Ok(self::logger())
}
