//! Error types for breakpoint construction and restoration.

use thiserror::Error;
use waymark_identity::IdError;

/// Why a persisted record could not be turned into a breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
	/// A mandatory field is absent.
	#[error("missing required field {0:?}")]
	Missing(&'static str),

	/// A field holds a value of the wrong shape.
	#[error("field {field:?} must be {expected}")]
	WrongType {
		/// Name of the offending field.
		field: &'static str,
		/// Human-readable description of the accepted shape.
		expected: &'static str,
	},

	/// An identifier field could not be parsed.
	#[error("field {field:?} holds an invalid identifier: {source}")]
	InvalidId {
		/// Name of the offending field.
		field: &'static str,
		/// Underlying parse failure.
		source: IdError,
	},

	/// The kind's low byte names no known variant.
	#[error("kind {raw:#x} has an unrecognized variant")]
	InvalidKind {
		/// The packed kind value as stored.
		raw: u64,
	},
}

/// Errors surfaced by breakpoint operations.
///
/// Callers typically report both variants as "could not restore breakpoint".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakpointError {
	/// A record was missing or had an invalid mandatory field.
	#[error("malformed breakpoint record: {0}")]
	MalformedRecord(#[from] RecordError),

	/// The kind's low byte is neither a named variant nor a custom kind.
	#[error("invalid breakpoint kind {raw:#x}")]
	InvalidKind {
		/// The packed kind value that was rejected.
		raw: u64,
	},
}

/// Result type for breakpoint operations.
pub type Result<T> = std::result::Result<T, BreakpointError>;
