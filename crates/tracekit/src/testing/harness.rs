//! Isolated logger and registry for interceptor tests.

use std::borrow::Cow;
use std::sync::Arc;

use tracekit_console::TraceLogger;
use tracekit_console::testing::TestConsole;
use tracekit_core::MetadataRegistry;

use crate::intercept::{ConstructorInterceptor, MethodInterceptor, Traced};

/// Test harness providing a private logger, console and registry.
///
/// The logger starts with debug on and writes to a [`TestConsole`]; the
/// registry starts empty. Nothing touches the process-wide instances, so
/// tests using a harness can run in parallel.
///
/// # Example
///
/// ```ignore
/// let h = TestHarness::new();
/// let mut total = h.property("total", 0);
/// total.set(3);
/// assert_eq!(h.output(), vec!["\t\tSetting value for 'total':\t 3"]);
/// ```
#[derive(Clone)]
pub struct TestHarness {
    console: TestConsole,
    logger: Arc<TraceLogger>,
    registry: Arc<MetadataRegistry>,
}

impl std::fmt::Debug for TestHarness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestHarness")
            .field("debug", &self.logger.is_debug())
            .field("tags", &self.registry.len())
            .field("lines", &self.console.output().len())
            .finish()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Creates a harness with debug on and an empty registry.
    #[must_use]
    pub fn new() -> Self {
        let console = TestConsole::new();
        let logger = TraceLogger::new(Arc::new(console.clone())).with_debug(true);
        Self {
            console,
            logger: Arc::new(logger),
            registry: Arc::new(MetadataRegistry::new()),
        }
    }

    /// Returns the harness logger.
    #[must_use]
    pub fn logger(&self) -> &Arc<TraceLogger> {
        &self.logger
    }

    /// Returns the harness registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<MetadataRegistry> {
        &self.registry
    }

    /// Returns the capturing console.
    #[must_use]
    pub fn console(&self) -> &TestConsole {
        &self.console
    }

    /// Captured lines, ANSI codes stripped.
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        self.console.output()
    }

    /// A method interceptor bound to this harness.
    #[must_use]
    pub fn method<T: ?Sized>(&self, name: impl Into<Cow<'static, str>>) -> MethodInterceptor {
        MethodInterceptor::of::<T>(name)
            .with_logger(Arc::clone(&self.logger))
            .with_registry(Arc::clone(&self.registry))
    }

    /// A traced property bound to this harness.
    #[must_use]
    pub fn property<V>(&self, name: impl Into<Cow<'static, str>>, value: V) -> Traced<V> {
        Traced::new(name, value)
            .with_logger(Arc::clone(&self.logger))
            .with_registry(Arc::clone(&self.registry))
    }

    /// A constructor interceptor bound to this harness.
    #[must_use]
    pub fn constructor<T: ?Sized>(&self) -> ConstructorInterceptor {
        ConstructorInterceptor::of::<T>()
            .with_logger(Arc::clone(&self.logger))
            .with_registry(Arc::clone(&self.registry))
    }
}
