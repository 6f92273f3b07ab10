//! Core types for tracekit.
//!
//! This crate provides the building blocks the console and interceptor
//! layers are made of:
//! - The [`Preset`] and [`Color`] tables used to compose trace lines
//! - The [`LogRequest`] / [`Payload`] model for a single `log` call
//! - The [`MetadataRegistry`] associating tags with a type or one of its members
//! - Error types shared by every tracekit crate
//!
//! # Design Principles
//!
//! - No runtime reflection: members are tagged through explicit registration
//!   (or the derive macro in `tracekit-macros`)
//! - Closed enums wherever the caller used to pass free-form strings
//! - All types support `Send + Sync`

#![forbid(unsafe_code)]

mod error;
pub mod logging;
pub mod presets;
pub mod registry;
pub mod render;
pub mod request;

pub use error::{MetadataError, TraceError, TraceResult};
pub use presets::{Color, Preset, SLOT_MARKER};
pub use registry::{
    Coordinate, Instrument, Member, MemberStyle, MetadataRegistry, Tag, TagKind, TypeKey, TypeTags,
    registry,
};
pub use request::{ConsoleMethod, LogRequest, LogSpec, Payload};
