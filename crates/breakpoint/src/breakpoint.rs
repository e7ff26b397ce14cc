//! The breakpoint entity.
//!
//! A [`Breakpoint`] is shared as `Arc<Breakpoint>` between every view that shows
//! it (editor gutter, debugger panel, disassembly). Identity, master file,
//! project and target are fixed at construction; line, kind and payload are
//! mutable behind a per-entity lock.
//!
//! # Line resolution
//!
//! [`Breakpoint::current_line`] asks the caller's context first. A live view is
//! authoritative, even when it reports [`NOT_FOUND`]. Without a context the
//! best known master-file line is returned.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use waymark_identity::UniqueId;

use crate::config::SignConfig;
use crate::context::{Line, LineResolver, NOT_FOUND};
use crate::error::Result;
use crate::kind::{Kind, KindTag};
use crate::record::{Record, RecordFields, field};
use crate::registry::BreakpointRegistry;
use crate::render::{Anchor, BreakpointRenderer};


#[derive(Debug)]
struct State {
	best_line: Line,
	kind: Kind,
	data: Option<Value>,
}

/// A uniquely identified breakpoint tied to a master file.
#[derive(Debug)]
pub struct Breakpoint {
	id: UniqueId,
	file: UniqueId,
	project: Option<UniqueId>,
	target: Option<String>,
	state: Mutex<State>,
}

/// Plain copy of every breakpoint field, for comparison and display.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointSnapshot {
	/// Breakpoint identity.
	pub id: UniqueId,
	/// Master file identity.
	pub file: UniqueId,
	/// Owning project, if recorded.
	pub project: Option<UniqueId>,
	/// Build target, if recorded.
	pub target: Option<String>,
	/// Best known line in the master file.
	pub best_line: Line,
	/// Kind and flags.
	pub kind: Kind,
	/// Opaque payload.
	pub data: Option<Value>,
}

impl Breakpoint {
	/// Creates a breakpoint with a fresh identity and registers it.
	///
	/// `kind` is the packed kind; its low byte must name a known variant or a
	/// custom kind (`>= 128`).
	pub fn create(
		registry: &BreakpointRegistry,
		kind: impl Into<u64>,
		file: UniqueId,
		line: Line,
	) -> Result<Arc<Self>> {
		Self::create_with_ids(registry, kind, file, line, UniqueId::mint)
	}

	/// Like [`Breakpoint::create`], drawing identities from `mint` until one is
	/// not already live.
	pub(crate) fn create_with_ids(
		registry: &BreakpointRegistry,
		kind: impl Into<u64>,
		file: UniqueId,
		line: Line,
		mut mint: impl FnMut() -> UniqueId,
	) -> Result<Arc<Self>> {
		let kind = Kind::from_raw(kind.into())?;
		loop {
			let bp = Arc::new(Self {
				id: mint(),
				file: file.clone(),
				project: None,
				target: None,
				state: Mutex::new(State {
					best_line: line,
					kind,
					data: None,
				}),
			});
			match registry.register_new(&bp) {
				Ok(()) => return Ok(bp),
				Err(existing) => {
					tracing::warn!(id = %existing.unique_id(), "minted breakpoint identity already live, re-minting");
				}
			}
		}
	}

	/// Restores a breakpoint from its record, reusing the live instance if one
	/// already holds the record's identity.
	pub fn from_record(registry: &BreakpointRegistry, record: &Record) -> Result<Arc<Self>> {
		registry.resolve_or_create(record)
	}

	pub(crate) fn from_fields(fields: RecordFields) -> Self {
		Self {
			id: fields.id,
			file: fields.file,
			project: fields.project,
			target: fields.target,
			state: Mutex::new(State {
				best_line: fields.line,
				kind: fields.kind,
				data: fields.data,
			}),
		}
	}

	/// Serializes every field. Unset optional fields are omitted.
	pub fn to_record(&self) -> Record {
		let state = self.state.lock();
		let mut record = Record::new();
		record.insert(field::UNIQUE_ID, self.id.as_str());
		record.insert(field::FILE, self.file.as_str());
		if let Some(project) = &self.project {
			record.insert(field::PROJECT, project.as_str());
		}
		if let Some(target) = &self.target {
			record.insert(field::TARGET, target.as_str());
		}
		record.insert(field::LINE_NUMBER, state.best_line);
		record.insert(field::KIND, state.kind.raw());
		if let Some(data) = &state.data {
			record.insert(field::DATA, data.clone());
		}
		record
	}

	/// Returns the line this breakpoint occupies in `context`.
	///
	/// With no context, returns the best known master-file line.
	pub fn current_line(&self, context: Option<&dyn LineResolver>) -> Line {
		match context {
			Some(ctx) => {
				let line = ctx.locate(&self.id);
				if line == NOT_FOUND {
					tracing::trace!(id = %self.id, "breakpoint not found in context");
				}
				line
			}
			None => self.best_line(),
		}
	}

	/// Records the durable line in the master file.
	pub fn set_master_line(&self, line: Line) {
		self.state.lock().best_line = line;
	}

	/// Returns the best known master-file line ([`NOT_FOUND`] if unknown).
	pub fn best_line(&self) -> Line {
		self.state.lock().best_line
	}

	/// Returns the decoded kind.
	pub fn kind(&self) -> Kind {
		self.state.lock().kind
	}

	/// Replaces the kind, flags included.
	pub fn set_kind(&self, kind: Kind) {
		self.state.lock().kind = kind;
	}

	/// Returns the packed kind as persisted.
	pub fn raw_kind(&self) -> u64 {
		self.kind().raw()
	}

	/// Returns the variant.
	pub fn tag(&self) -> KindTag {
		self.kind().tag()
	}

	/// Replaces the variant, leaving every flag bit untouched.
	pub fn set_tag(&self, tag: KindTag) {
		let mut state = self.state.lock();
		state.kind = state.kind.with_tag(tag);
	}

	/// Returns true if the disabled flag is set.
	pub fn disabled(&self) -> bool {
		self.kind().is_disabled()
	}

	/// Sets or clears only the disabled flag.
	pub fn set_disabled(&self, disabled: bool) {
		let mut state = self.state.lock();
		state.kind = state.kind.with_disabled(disabled);
	}

	/// Returns a copy of the payload.
	pub fn data(&self) -> Option<Value> {
		self.state.lock().data.clone()
	}

	/// Replaces the payload without inspecting it.
	pub fn set_data(&self, data: Option<Value>) {
		self.state.lock().data = data;
	}

	/// Returns this breakpoint's identity.
	pub fn unique_id(&self) -> &UniqueId {
		&self.id
	}

	/// Returns the master file identity.
	pub fn file_id(&self) -> &UniqueId {
		&self.file
	}

	/// Returns the owning project. Not yet interpreted.
	pub fn project_id(&self) -> Option<&UniqueId> {
		self.project.as_ref()
	}

	/// Returns the build target. Not yet interpreted.
	pub fn target(&self) -> Option<&str> {
		self.target.as_deref()
	}

	/// Copies every field out under one lock acquisition.
	pub fn snapshot(&self) -> BreakpointSnapshot {
		let state = self.state.lock();
		BreakpointSnapshot {
			id: self.id.clone(),
			file: self.file.clone(),
			project: self.project.clone(),
			target: self.target.clone(),
			best_line: state.best_line,
			kind: state.kind,
			data: state.data.clone(),
		}
	}

	/// Draws this breakpoint's sign centered on `anchor`.
	pub fn draw_at(&self, renderer: &dyn BreakpointRenderer, anchor: Anchor, signs: &SignConfig) {
		if let Some(sign) = signs.sign_for(self.kind()) {
			renderer.draw(anchor, &sign);
		}
	}
}
