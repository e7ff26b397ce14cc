//! Stable identities for long-lived editor entities.
//!
//! - [`UniqueId`] is an opaque identifier that survives persistence verbatim.
//! - [`IdentityRegistry`] maps identifiers to live instances without owning them,
//!   so an entity is dropped as soon as its last holder releases it.

/// Opaque identifier type.
pub mod id;
/// Non-owning identifier-to-instance table.
pub mod registry;

pub use id::{IdError, UniqueId};
pub use registry::{IdentityRegistry, Resolution};
