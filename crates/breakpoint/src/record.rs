//! Flat persisted form of a breakpoint.
//!
//! A [`Record`] is a mapping of field names (see [`field`]) to values, shaped
//! like a property list so an external persistence layer can store it as-is.
//! Optional fields that are unset are omitted rather than written as a
//! placeholder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use waymark_identity::UniqueId;

use crate::context::Line;
use crate::error::RecordError;
use crate::kind::Kind;


/// Record field names.
pub mod field {
	/// Identity of the master file.
	pub const FILE: &str = "file";
	/// Best known line in the master file.
	pub const LINE_NUMBER: &str = "line-number";
	/// Packed kind and flags.
	pub const KIND: &str = "kind";
	/// Opaque payload.
	pub const DATA: &str = "data";
	/// Owning project identity.
	pub const PROJECT: &str = "project";
	/// Build target name.
	pub const TARGET: &str = "target";
	/// Breakpoint identity.
	pub const UNIQUE_ID: &str = "unique-id";
}

/// Persisted breakpoint fields, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
	/// Creates an empty record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the value stored under `name`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	/// Stores `value` under `name`, returning the previous value.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(name.into(), value.into())
	}

	/// Removes the value stored under `name`.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.0.remove(name)
	}

	/// Returns true if `name` is present.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Iterates over every field.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns the number of fields.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the record has no fields.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the underlying map.
	pub fn into_map(self) -> Map<String, Value> {
		self.0
	}
}

impl From<Map<String, Value>> for Record {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}

/// Validated contents of a [`Record`].
#[derive(Debug, Clone)]
pub(crate) struct RecordFields {
	pub id: UniqueId,
	pub file: UniqueId,
	pub project: Option<UniqueId>,
	pub target: Option<String>,
	pub line: Line,
	pub kind: Kind,
	pub data: Option<Value>,
}

impl RecordFields {
	/// Validates every field of `record`.
	///
	/// A missing `line-number` reads as line zero (location unknown); unknown
	/// extra fields are ignored.
	pub fn parse(record: &Record) -> Result<Self, RecordError> {
		let id = required_id(record, field::UNIQUE_ID)?;
		let file = required_id(record, field::FILE)?;
		let project = optional_str(record, field::PROJECT)?
			.map(|s| parse_id(field::PROJECT, s))
			.transpose()?;
		let target = optional_str(record, field::TARGET)?.map(str::to_string);
		let line = match record.get(field::LINE_NUMBER) {
			None => 0,
			Some(v) => v
				.as_u64()
				.and_then(|n| Line::try_from(n).ok())
				.ok_or(RecordError::WrongType {
					field: field::LINE_NUMBER,
					expected: "a non-negative 32-bit integer",
				})?,
		};
		let raw_kind = record
			.get(field::KIND)
			.ok_or(RecordError::Missing(field::KIND))?
			.as_u64()
			.ok_or(RecordError::WrongType {
				field: field::KIND,
				expected: "a non-negative integer",
			})?;
		let kind = Kind::from_raw(raw_kind).map_err(|_| RecordError::InvalidKind { raw: raw_kind })?;
		let data = record.get(field::DATA).cloned();

		Ok(Self {
			id,
			file,
			project,
			target,
			line,
			kind,
			data,
		})
	}
}

fn optional_str<'a>(record: &'a Record, name: &'static str) -> Result<Option<&'a str>, RecordError> {
	match record.get(name) {
		None => Ok(None),
		Some(v) => v.as_str().map(Some).ok_or(RecordError::WrongType {
			field: name,
			expected: "a string",
		}),
	}
}

fn required_id(record: &Record, name: &'static str) -> Result<UniqueId, RecordError> {
	let s = optional_str(record, name)?.ok_or(RecordError::Missing(name))?;
	parse_id(name, s)
}

fn parse_id(name: &'static str, s: &str) -> Result<UniqueId, RecordError> {
	UniqueId::parse(s).map_err(|source| RecordError::InvalidId { field: name, source })
}
