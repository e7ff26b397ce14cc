//! Non-owning identity table.
//!
//! # Role
//!
//! Maps [`UniqueId`]s to the instances currently alive in the process. The table
//! holds [`Weak`] references only, so it never extends an entity's lifetime.
//!
//! # Invariants
//!
//! - At most one live instance is reachable per identifier.
//! - Check-and-insert in [`IdentityRegistry::resolve_or_insert_with`] runs under a
//!   single lock, so racing resolvers observe the same instance.
//! - Dangling entries are pruned lazily: on a failed lookup, on re-registration,
//!   and in bulk once the table grows past the sweep trigger. After a bulk sweep
//!   the trigger moves to twice the surviving size (never below the configured
//!   threshold), so a table of live entries is not rescanned on every insert.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::UniqueId;


/// How [`IdentityRegistry::resolve_or_insert_with`] produced its instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
	/// A live instance already held the identifier; it was returned unchanged.
	Existing,
	/// No live instance existed; a new one was constructed and registered.
	Created,
}

/// Identifier-to-instance table holding weak references.
pub struct IdentityRegistry<T> {
	label: &'static str,
	sweep_threshold: usize,
	entries: Mutex<Table<T>>,
}

struct Table<T> {
	map: FxHashMap<UniqueId, Weak<T>>,
	next_sweep_at: usize,
}

impl<T> IdentityRegistry<T> {
	/// Creates an empty registry.
	///
	/// `sweep_threshold` is the table size at which a registration triggers a full
	/// sweep of dangling entries. Zero disables automatic sweeps.
	pub fn new(label: &'static str, sweep_threshold: usize) -> Self {
		Self {
			label,
			sweep_threshold,
			entries: Mutex::new(Table {
				map: FxHashMap::default(),
				next_sweep_at: sweep_threshold,
			}),
		}
	}

	/// Returns the label used in log output.
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns the live instance registered under `id`, if any.
	pub fn lookup(&self, id: &UniqueId) -> Option<Arc<T>> {
		let mut entries = self.entries.lock();
		let found = Self::upgrade_or_prune(&mut entries.map, id);
		tracing::trace!(label = self.label, id = %id, hit = found.is_some(), "identity lookup");
		found
	}

	/// Registers `instance` under `id`.
	///
	/// A dangling entry for the same identifier is replaced. If a live instance
	/// already holds `id`, it is kept and returned as `Err` so the caller can
	/// discard its duplicate.
	pub fn register(&self, id: UniqueId, instance: &Arc<T>) -> Result<(), Arc<T>> {
		let mut entries = self.entries.lock();
		if let Some(existing) = Self::upgrade_or_prune(&mut entries.map, &id) {
			return Err(existing);
		}
		tracing::debug!(label = self.label, id = %id, "identity registered");
		entries.map.insert(id, Arc::downgrade(instance));
		self.maybe_sweep(&mut entries);
		Ok(())
	}

	/// Returns the live instance for `id`, or builds and registers one with `make`.
	///
	/// The lock is held while `make` runs; it must not call back into this
	/// registry. If `make` fails the table is left unchanged.
	pub fn resolve_or_insert_with<E>(
		&self,
		id: &UniqueId,
		make: impl FnOnce() -> Result<Arc<T>, E>,
	) -> Result<(Arc<T>, Resolution), E> {
		let mut entries = self.entries.lock();
		if let Some(existing) = Self::upgrade_or_prune(&mut entries.map, id) {
			tracing::trace!(label = self.label, id = %id, "identity resolved to live instance");
			return Ok((existing, Resolution::Existing));
		}

		let instance = make()?;
		tracing::debug!(label = self.label, id = %id, "identity registered");
		entries.map.insert(id.clone(), Arc::downgrade(&instance));
		self.maybe_sweep(&mut entries);
		Ok((instance, Resolution::Created))
	}

	/// Returns the number of identifiers whose instance is still alive.
	pub fn live_count(&self) -> usize {
		self.entries
			.lock()
			.map
			.values()
			.filter(|weak| weak.strong_count() > 0)
			.count()
	}

	/// Drops every dangling entry and returns how many were removed.
	pub fn sweep(&self) -> usize {
		let mut entries = self.entries.lock();
		self.sweep_locked(&mut entries)
	}

	fn upgrade_or_prune(entries: &mut FxHashMap<UniqueId, Weak<T>>, id: &UniqueId) -> Option<Arc<T>> {
		let weak = entries.get(id)?;
		match weak.upgrade() {
			Some(live) => Some(live),
			None => {
				entries.remove(id);
				None
			}
		}
	}

	fn maybe_sweep(&self, table: &mut Table<T>) {
		if self.sweep_threshold != 0 && table.map.len() >= table.next_sweep_at {
			self.sweep_locked(table);
		}
	}

	fn sweep_locked(&self, table: &mut Table<T>) -> usize {
		let before = table.map.len();
		table.map.retain(|_, weak| weak.strong_count() > 0);
		let remaining = table.map.len();
		table.next_sweep_at = self.sweep_threshold.max(remaining.saturating_mul(2));
		let removed = before - remaining;
		if removed > 0 {
			tracing::debug!(label = self.label, removed, remaining, "swept dangling identities");
		}
		removed
	}

	#[cfg(test)]
	pub(crate) fn table_len(&self) -> usize {
		self.entries.lock().map.len()
	}
}

impl<T> std::fmt::Debug for IdentityRegistry<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IdentityRegistry")
			.field("label", &self.label)
			.field("sweep_threshold", &self.sweep_threshold)
			.field("entries", &self.entries.lock().map.len())
			.finish()
	}
}
