//! Error types for tracekit.

use std::fmt;

use crate::registry::{Coordinate, TagKind};

/// Result type for tracekit operations.
pub type TraceResult<T> = Result<T, TraceError>;

/// Errors raised while building log requests or configuring the logger.
///
/// Logging itself never fails: a disabled logger is a silent no-op and a
/// console write error is dropped. Everything here is raised while a request
/// or a configuration is *built*, before any line is printed.
#[derive(Debug)]
pub enum TraceError {
    /// A console method name that has no [`ConsoleMethod`](crate::ConsoleMethod).
    UnsupportedSink(String),
    /// A preset index outside the preset table.
    UnknownPreset(usize),
    /// A color name outside the fixed color set.
    UnknownColor(String),
    /// The process-wide logger or console was already created.
    AlreadyInitialized,
    /// Invalid configuration value or file.
    Config(String),
    /// I/O error while reading configuration.
    Io(std::io::Error),
    /// Metadata registration failed.
    Metadata(MetadataError),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::UnsupportedSink(name) => write!(f, "Unsupported console method: {name}"),
            TraceError::UnknownPreset(index) => write!(f, "Unknown preset index: {index}"),
            TraceError::UnknownColor(name) => write!(f, "Unknown color: {name}"),
            TraceError::AlreadyInitialized => write!(f, "Logger already initialized"),
            TraceError::Config(msg) => write!(f, "Configuration error: {msg}"),
            TraceError::Io(e) => write!(f, "I/O error: {e}"),
            TraceError::Metadata(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io(e) => Some(e),
            TraceError::Metadata(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TraceError {
    fn from(err: std::io::Error) -> Self {
        TraceError::Io(err)
    }
}

impl From<MetadataError> for TraceError {
    fn from(err: MetadataError) -> Self {
        TraceError::Metadata(err)
    }
}

/// Errors raised by the metadata registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// A tag of the same kind is already attached at this coordinate.
    Duplicate {
        /// Where the clash happened.
        coordinate: Coordinate,
        /// Kind of the clashing tag.
        kind: TagKind,
    },
    /// The registry lock was poisoned by a panic in another thread.
    Unavailable,
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::Duplicate { coordinate, kind } => {
                write!(f, "Duplicate metadata: {kind} already set on {coordinate}")
            }
            MetadataError::Unavailable => f.write_str("Metadata registry unavailable"),
        }
    }
}

impl std::error::Error for MetadataError {}
