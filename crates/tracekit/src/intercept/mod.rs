//! Declarative interceptors.
//!
//! Each interceptor wraps one kind of member and announces what happens to
//! it through a [`TraceLogger`], styled by the tags found in a
//! [`MetadataRegistry`]:
//!
//! | member | interceptor | lines |
//! |--------|-------------|-------|
//! | method | [`MethodInterceptor`] | arguments on entry, return type on success |
//! | field | [`Traced`] | every read and every write, values as JSON |
//! | constructor | [`ConstructorInterceptor`] | type name and arguments |
//!
//! Interceptors use the global [`logger`](tracekit_console::logger) and
//! [`registry`](tracekit_core::registry) unless given others with
//! `with_logger` / `with_registry`. Lines are written in the member's color,
//! the logger's accent color by default, and are gated by the logger's
//! debug flag like any other line.

mod args;
mod constructor;
mod method;
mod property;

use std::sync::Arc;

pub use args::ArgList;
pub use constructor::{Constructor, ConstructorInterceptor};
pub use method::{Invocation, MethodInterceptor};
pub use property::Traced;

use tracekit_console::TraceLogger;
use tracekit_core::{Color, Coordinate, MemberStyle, MetadataRegistry};

/// Logger and registry an interceptor reports through.
#[derive(Clone, Default)]
struct Binding {
    logger: Option<Arc<TraceLogger>>,
    registry: Option<Arc<MetadataRegistry>>,
}

impl Binding {
    fn logger(&self) -> &TraceLogger {
        self.logger
            .as_deref()
            .unwrap_or_else(|| tracekit_console::logger().as_ref())
    }

    fn registry(&self) -> &MetadataRegistry {
        self.registry
            .as_deref()
            .unwrap_or_else(|| tracekit_core::registry().as_ref())
    }

    fn style(&self, coordinate: &Coordinate) -> MemberStyle {
        self.registry().style(coordinate, self.logger().accent())
    }

    fn is_debug(&self) -> bool {
        self.logger().is_debug()
    }

    /// Escapes are glued to the first and last parts, so a plain console
    /// prints the line with no padding around it.
    fn emit(&self, color: Color, parts: Vec<String>) {
        self.logger().paint(color, parts);
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("global_logger", &self.logger.is_none())
            .field("global_registry", &self.registry.is_none())
            .finish()
    }
}
