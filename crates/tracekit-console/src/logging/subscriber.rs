//! Tracing subscriber integration.
//!
//! Provides a tracing `Layer` and builder that route events through a
//! [`TraceLogger`], with the same level mapping as the `log` bridge.

use std::fmt;
use std::sync::Arc;

use tracekit_core::logging::is_internal_target;
use tracekit_core::{LogRequest, Payload};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

use super::{TraceLogger, color_for, method_for};

/// A tracing layer writing events through a [`TraceLogger`].
///
/// An event becomes one line: the optional `[target]`, the message, then
/// `key=value` for each field and `span=outer::inner` for the span scope.
pub struct TraceLayer {
    logger: Arc<TraceLogger>,
    show_targets: bool,
}

impl TraceLayer {
    /// Create a layer over `logger`.
    #[must_use]
    pub fn new(logger: Arc<TraceLogger>, show_targets: bool) -> Self {
        Self {
            logger,
            show_targets,
        }
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl FieldCollector {
    fn record_value(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            if self.message.is_none() {
                self.message = Some(value);
            }
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, value.to_string());
    }
}

fn from_log_filter(filter: log::LevelFilter) -> LevelFilter {
    match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

fn to_log_level(level: tracing::Level) -> log::Level {
    match level {
        tracing::Level::ERROR => log::Level::Error,
        tracing::Level::WARN => log::Level::Warn,
        tracing::Level::INFO => log::Level::Info,
        tracing::Level::DEBUG => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

impl<S> Layer<S> for TraceLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_internal_target(metadata.target()) || !self.logger.is_debug() {
            return;
        }

        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<String> = scope.from_root().map(|span| span.name().to_string()).collect();
            if !spans.is_empty() {
                collector
                    .fields
                    .push(("span".to_string(), spans.join("::")));
            }
        }

        let mut parts = Vec::with_capacity(collector.fields.len() + 2);
        if self.show_targets {
            parts.push(format!("[{}]", metadata.target()));
        }
        parts.push(
            collector
                .message
                .unwrap_or_else(|| metadata.name().to_string()),
        );
        for (key, value) in collector.fields {
            parts.push(format!("{key}={value}"));
        }

        let level = to_log_level(*metadata.level());
        let mut request = LogRequest::from(method_for(level));
        request.color = color_for(level);
        self.logger.log(request, Payload::Args(parts));
    }
}

/// Builder for configuring a trace subscriber.
#[derive(Debug)]
pub struct TraceSubscriberBuilder {
    logger: Option<Arc<TraceLogger>>,
    show_targets: bool,
    level_filter: LevelFilter,
}

impl Default for TraceSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSubscriberBuilder {
    /// Create a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logger: None,
            show_targets: false,
            level_filter: LevelFilter::DEBUG,
        }
    }

    /// Write through this logger instead of the global one.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<TraceLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Toggle target/module rendering.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.show_targets = show;
        self
    }

    /// Set the minimum level.
    #[must_use]
    pub fn with_level_filter(mut self, filter: LevelFilter) -> Self {
        self.level_filter = filter;
        self
    }

    /// Set the minimum level from a `log` filter, such as `TraceConfig::level`.
    #[must_use]
    pub fn with_log_level(self, filter: log::LevelFilter) -> Self {
        self.with_level_filter(from_log_filter(filter))
    }

    /// Build the layer alone, for composing with other layers.
    #[must_use]
    pub fn layer(self) -> TraceLayer {
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::clone(super::logger()));
        TraceLayer::new(logger, self.show_targets)
    }

    /// Build the subscriber without installing it.
    #[must_use]
    pub fn build(self) -> impl Subscriber + Send + Sync + 'static {
        let filter = self.level_filter;
        tracing_subscriber::registry().with(filter).with(self.layer())
    }

    /// Build and install as the global subscriber.
    pub fn init(self) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        let subscriber = self.build();
        tracing::subscriber::set_global_default(subscriber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestConsole;
    use tracekit_core::ConsoleMethod;

    fn subscriber(
        debug: bool,
        filter: LevelFilter,
    ) -> (impl Subscriber + Send + Sync + 'static, TestConsole) {
        let console = TestConsole::new();
        let logger = TraceLogger::new(Arc::new(console.clone())).with_debug(debug);
        let subscriber = TraceSubscriberBuilder::new()
            .with_logger(Arc::new(logger))
            .with_level_filter(filter)
            .build();
        (subscriber, console)
    }

    #[test]
    fn test_builder_defaults() {
        let builder = TraceSubscriberBuilder::default();
        assert!(!builder.show_targets);
        assert!(builder.logger.is_none());
        assert_eq!(builder.level_filter, LevelFilter::DEBUG);
    }

    #[test]
    fn test_event_with_fields_and_spans() {
        let (subscriber, console) = subscriber(true, LevelFilter::TRACE);
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("checkout");
            let _guard = span.enter();
            tracing::info!(items = 3, "cart validated");
        });

        let calls = console.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, ConsoleMethod::Info);
        assert_eq!(calls[0].1, vec!["cart validated", "items=3", "span=checkout"]);
    }

    #[test]
    fn test_error_event_is_red_on_stderr_method() {
        let (subscriber, console) = subscriber(true, LevelFilter::TRACE);
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("payment failed");
        });
        let calls = console.calls();
        assert_eq!(calls[0].0, ConsoleMethod::Error);
        assert_eq!(calls[0].1, vec!["\x1b[31m", "payment failed", "\x1b[0m"]);
    }

    #[test]
    fn test_level_filter_applies() {
        let (subscriber, console) = subscriber(true, LevelFilter::WARN);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("too chatty");
            tracing::warn!("kept");
        });
        assert_eq!(console.calls().len(), 1);
        console.assert_contains("kept");
    }

    #[test]
    fn test_log_level_maps_to_tracing_filter() {
        let builder = TraceSubscriberBuilder::new().with_log_level(log::LevelFilter::Warn);
        assert_eq!(builder.level_filter, LevelFilter::WARN);
        let builder = TraceSubscriberBuilder::new().with_log_level(log::LevelFilter::Off);
        assert_eq!(builder.level_filter, LevelFilter::OFF);
        let builder = TraceSubscriberBuilder::new().with_log_level(log::LevelFilter::Trace);
        assert_eq!(builder.level_filter, LevelFilter::TRACE);
    }

    #[test]
    fn test_events_from_crate_modules_are_kept() {
        let (subscriber, console) = subscriber(true, LevelFilter::TRACE);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: module_path!(), "from a test module");
        });
        let calls = console.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, vec!["from a test module"]);
    }

    #[test]
    fn test_debug_flag_off_drops_events() {
        let (subscriber, console) = subscriber(false, LevelFilter::TRACE);
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("hidden");
        });
        assert!(console.calls().is_empty());
    }
}
