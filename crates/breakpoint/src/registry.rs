//! Process-wide breakpoint identity table.

use std::convert::Infallible;
use std::sync::{Arc, LazyLock};

use waymark_identity::{IdentityRegistry, UniqueId};

use crate::breakpoint::Breakpoint;
use crate::config::RegistryConfig;
use crate::error::Result;
use crate::record::{Record, RecordFields};

static GLOBAL: LazyLock<BreakpointRegistry> =
	LazyLock::new(|| BreakpointRegistry::new(&RegistryConfig::default()));

/// Maps identities to live breakpoints without keeping them alive.
///
/// Breakpoints register themselves on construction; there is no public
/// register call.
#[derive(Debug)]
pub struct BreakpointRegistry {
	inner: IdentityRegistry<Breakpoint>,
}

impl BreakpointRegistry {
	/// Creates an empty registry.
	pub fn new(config: &RegistryConfig) -> Self {
		Self {
			inner: IdentityRegistry::new("breakpoints", config.sweep_threshold),
		}
	}

	/// Returns the process-wide registry.
	pub fn global() -> &'static Self {
		&GLOBAL
	}

	/// Returns the live breakpoint holding `id`.
	pub fn lookup(&self, id: &UniqueId) -> Option<Arc<Breakpoint>> {
		self.inner.lookup(id)
	}

	/// Returns the live breakpoint for the record's identity, or builds one.
	///
	/// The record is validated in full before the table is consulted. An
	/// existing instance is returned as-is; the record is not merged into it.
	pub fn resolve_or_create(&self, record: &Record) -> Result<Arc<Breakpoint>> {
		let fields = RecordFields::parse(record)?;
		let id = fields.id.clone();
		let Ok((bp, resolution)) = self
			.inner
			.resolve_or_insert_with(&id, || Ok::<_, Infallible>(Arc::new(Breakpoint::from_fields(fields))));
		tracing::debug!(id = %id, ?resolution, "breakpoint restored from record");
		Ok(bp)
	}

	/// Returns the number of live breakpoints.
	pub fn live_count(&self) -> usize {
		self.inner.live_count()
	}

	/// Drops identities whose breakpoint has been released.
	pub fn sweep(&self) -> usize {
		self.inner.sweep()
	}

	/// Registers a newly constructed breakpoint. A live holder of the same
	/// identity is returned as `Err` and stays registered.
	pub(crate) fn register_new(&self, bp: &Arc<Breakpoint>) -> std::result::Result<(), Arc<Breakpoint>> {
		self.inner.register(bp.unique_id().clone(), bp)
	}
}

impl Default for BreakpointRegistry {
	fn default() -> Self {
		Self::new(&RegistryConfig::default())
	}
}
