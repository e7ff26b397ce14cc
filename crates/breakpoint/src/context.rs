//! Line resolution contexts.
//!
//! A context is anything that can answer "which line does identity X occupy
//! right now": an open editor view tracking edits, or a plain file layer when no
//! view is open. The breakpoint asks the context and never tracks lines itself.

use rustc_hash::FxHashMap;
use waymark_identity::UniqueId;

/// A 1-based line number. [`NOT_FOUND`] is never a real line.
pub type Line = u32;

/// Sentinel line meaning "location unknown".
pub const NOT_FOUND: Line = 0;

/// Capability to locate a breakpoint in some view of its file.
///
/// Implementations may scan buffer content, so calls can be linear in buffer
/// size. They are synchronous and must return [`NOT_FOUND`] when the identity
/// is no longer present (for example, its line was deleted).
pub trait LineResolver {
	/// Returns the current line of `id`, or [`NOT_FOUND`].
	fn locate(&self, id: &UniqueId) -> Line;
}

impl<F> LineResolver for F
where
	F: Fn(&UniqueId) -> Line,
{
	fn locate(&self, id: &UniqueId) -> Line {
		self(id)
	}
}

/// In-memory resolver for a file that has no open view.
#[derive(Debug, Clone, Default)]
pub struct LineTable {
	lines: FxHashMap<UniqueId, Line>,
}

impl LineTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `id` at `line`. Setting [`NOT_FOUND`] removes the entry.
	pub fn set(&mut self, id: UniqueId, line: Line) {
		if line == NOT_FOUND {
			self.lines.remove(&id);
		} else {
			self.lines.insert(id, line);
		}
	}

	/// Forgets `id`, returning its last line if it was tracked.
	pub fn remove(&mut self, id: &UniqueId) -> Option<Line> {
		self.lines.remove(id)
	}

	/// Moves every entry at or after `from` by `delta` lines.
	///
	/// Entries pushed to line zero or below no longer exist in the file and are
	/// dropped.
	pub fn shift_from(&mut self, from: Line, delta: i64) {
		self.lines.retain(|_, line| {
			if *line < from {
				return true;
			}
			let moved = i64::from(*line) + delta;
			match Line::try_from(moved) {
				Ok(next) if next != NOT_FOUND => {
					*line = next;
					true
				}
				_ => false,
			}
		});
	}

	/// Returns the number of tracked identities.
	pub fn len(&self) -> usize {
		self.lines.len()
	}

	/// Returns true if nothing is tracked.
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}
}

impl LineResolver for LineTable {
	fn locate(&self, id: &UniqueId) -> Line {
		self.lines.get(id).copied().unwrap_or(NOT_FOUND)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_identity_is_not_found() {
		let table = LineTable::new();
		assert_eq!(table.locate(&UniqueId::mint()), NOT_FOUND);
	}

	#[test]
	fn shift_moves_trailing_lines_only() {
		let (above, below) = (UniqueId::mint(), UniqueId::mint());
		let mut table = LineTable::new();
		table.set(above.clone(), 3);
		table.set(below.clone(), 10);

		table.shift_from(5, 2);
		assert_eq!(table.locate(&above), 3);
		assert_eq!(table.locate(&below), 12);
	}

	#[test]
	fn shift_past_top_drops_entry() {
		let id = UniqueId::mint();
		let mut table = LineTable::new();
		table.set(id.clone(), 4);

		table.shift_from(1, -4);
		assert_eq!(table.locate(&id), NOT_FOUND);
		assert!(table.is_empty());
	}

	#[test]
	fn closures_are_resolvers() {
		let id = UniqueId::mint();
		let fixed = |_: &UniqueId| -> Line { 17 };
		assert_eq!(fixed.locate(&id), 17);
	}
}
