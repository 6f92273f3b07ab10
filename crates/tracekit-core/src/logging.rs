//! Diagnostics of tracekit itself.
//!
//! tracekit's *product* is console trace output, which goes through the
//! logger service and is gated by its debug flag. What tracekit says about
//! its own operation (tags installed, logger initialized, config loaded)
//! goes through the standard [`log`] facade instead, so applications can
//! filter it like any other library.
//!
//! # Log Levels
//!
//! - **warn**: Configuration values that were ignored
//! - **info**: Logger and console lifecycle (initialization)
//! - **debug**: Metadata registration, request conversion
//! - **trace**: Individual interceptor firings
//!
//! # Log Targets
//!
//! - `tracekit`: Root target for all tracekit logs
//! - `tracekit::logger`: Logger service lifecycle
//! - `tracekit::registry`: Metadata registration
//! - `tracekit::intercept`: Interceptor firings
//! - `tracekit::config`: Configuration loading
//!
//! Example filter: `RUST_LOG=tracekit::registry=debug`

// Re-export log macros for ergonomic use
pub use log::{debug, error, info, trace, warn};

// Re-export log level types for programmatic use
pub use log::{Level, LevelFilter};

/// Log targets used by tracekit components.
pub mod targets {
    /// Root target for all tracekit logs.
    pub const TRACEKIT: &str = "tracekit";

    /// Logger service lifecycle.
    pub const LOGGER: &str = "tracekit::logger";

    /// Metadata registration.
    pub const REGISTRY: &str = "tracekit::registry";

    /// Method, property and constructor interceptors.
    pub const INTERCEPT: &str = "tracekit::intercept";

    /// Configuration loading.
    pub const CONFIG: &str = "tracekit::config";
}

/// Returns whether a record with this target was emitted by tracekit.
///
/// The log bridge uses this to avoid feeding tracekit's own diagnostics
/// back into the trace console. Only the `tracekit` hierarchy counts; module
/// paths such as `tracekit_console::...` are ordinary targets.
#[must_use]
pub fn is_internal_target(target: &str) -> bool {
    target == targets::TRACEKIT || target.starts_with("tracekit::")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_targets_are_hierarchical() {
        assert!(targets::LOGGER.starts_with(targets::TRACEKIT));
        assert!(targets::REGISTRY.starts_with(targets::TRACEKIT));
        assert!(targets::INTERCEPT.starts_with(targets::TRACEKIT));
        assert!(targets::CONFIG.starts_with(targets::TRACEKIT));
    }

    #[test]
    fn internal_targets() {
        assert!(is_internal_target("tracekit"));
        assert!(is_internal_target(targets::REGISTRY));
        assert!(!is_internal_target("tracekitten"));
        assert!(!is_internal_target("my_app::db"));
    }

    #[test]
    fn crate_module_paths_are_not_internal() {
        assert!(!is_internal_target("tracekit_console::logging::subscriber::tests"));
        assert!(!is_internal_target("tracekit_console::logging::bridge::tests"));
        assert!(!is_internal_target("tracekit_core::registry"));
    }
}
