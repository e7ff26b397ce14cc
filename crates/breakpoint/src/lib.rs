//! Breakpoints with a single canonical identity across views and sessions.
//!
//! A breakpoint belongs to a master file but may be shown by several views at
//! once, each with its own idea of the current line. This crate keeps one live
//! instance per identity and lets each view resolve the line on demand:
//!
//! - [`Breakpoint`] holds identity, kind, best known line, and an opaque payload.
//! - [`BreakpointRegistry`] maps identities to live breakpoints without owning them.
//! - [`Record`] is the flat persisted form; restoring a record whose identity is
//!   already live returns that same instance.
//! - [`LineResolver`] is the capability a view or file layer implements to answer
//!   "where is this breakpoint now".

/// The breakpoint entity.
pub mod breakpoint;
/// TOML configuration.
pub mod config;
/// Line resolution contexts.
pub mod context;
/// Error types.
pub mod error;
/// Kind and flag encoding.
pub mod kind;
/// Persisted record form.
pub mod record;
/// Identity table for live breakpoints.
pub mod registry;
/// Drawing hook.
pub mod render;

pub use breakpoint::{Breakpoint, BreakpointSnapshot};
pub use config::{BreakpointConfig, ConfigError, RegistryConfig, SignConfig};
pub use context::{Line, LineResolver, LineTable, NOT_FOUND};
pub use error::{BreakpointError, RecordError, Result};
pub use kind::{CustomKind, Kind, KindFlags, KindTag};
pub use record::Record;
pub use registry::BreakpointRegistry;
pub use render::{Anchor, BreakpointRenderer, Sign};
pub use waymark_identity::UniqueId;
