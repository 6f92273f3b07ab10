#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod console;
pub mod detection;
pub mod logging; // Logger service, log bridge, tracing layer
pub mod testing; // Test utilities

pub use config::TraceConfig;
pub use console::{Console, ConsoleSink, console, init_console};
pub use detection::{ColorChoice, should_enable_color};
pub use logging::{
    LogBridge, LogBridgeBuilder, TraceLayer, TraceLogger, TraceSubscriberBuilder, init_logger,
    init_logger_with, logger,
};
pub use tracekit_core::{
    Color, ConsoleMethod, LogRequest, LogSpec, Payload, Preset, TraceError, TraceResult,
};

/// Logs `Display`-formatted arguments through a [`TraceLogger`].
///
/// ```ignore
/// trace_log!(logger(), ConsoleMethod::Error, "disk full");
/// trace_log!(logger(), Preset::Added, "user", id);
/// ```
#[macro_export]
macro_rules! trace_log {
    ($logger:expr, $request:expr $(, $arg:expr)* $(,)?) => {
        $logger.log(
            $request,
            $crate::Payload::Args(::std::vec![$(::std::string::ToString::to_string(&$arg)),*]),
        )
    };
}
