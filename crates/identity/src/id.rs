use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when parsing a persisted identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
	/// The identifier string was empty.
	#[error("identifier is empty")]
	Empty,
	/// The identifier carried leading or trailing whitespace.
	#[error("identifier {0:?} has surrounding whitespace")]
	Padded(String),
}

/// An opaque, globally comparable identifier.
///
/// Two ids compare equal iff they denote the same logical entity. Freshly
/// minted ids are random v4 UUIDs, but any non-empty string read back from
/// storage is kept byte-for-byte so older identifiers still resolve.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueId(Arc<str>);

impl UniqueId {
	/// Mints a new identifier that has never been handed out before.
	pub fn mint() -> Self {
		Self(Arc::from(Uuid::new_v4().hyphenated().to_string()))
	}

	/// Reconstructs an identifier from its persisted form.
	pub fn parse(s: &str) -> Result<Self, IdError> {
		if s.is_empty() {
			return Err(IdError::Empty);
		}
		if s.trim() != s {
			return Err(IdError::Padded(s.to_string()));
		}
		Ok(Self(Arc::from(s)))
	}

	/// Returns the persisted form of this identifier.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for UniqueId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "UniqueId({})", self.0)
	}
}

impl fmt::Display for UniqueId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for UniqueId {
	type Err = IdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl AsRef<str> for UniqueId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Serialize for UniqueId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for UniqueId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Self::parse(&s).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn minted_ids_are_distinct() {
		let a = UniqueId::mint();
		let b = UniqueId::mint();
		assert_ne!(a, b);
		assert!(Uuid::parse_str(a.as_str()).is_ok());
	}

	#[test]
	fn parse_keeps_text_verbatim() {
		let legacy = UniqueId::parse("BP-0007:Legacy").unwrap();
		assert_eq!(legacy.as_str(), "BP-0007:Legacy");
		assert_eq!(legacy, "BP-0007:Legacy".parse().unwrap());
	}

	#[test]
	fn parse_rejects_empty_and_padded() {
		assert_eq!(UniqueId::parse(""), Err(IdError::Empty));
		assert!(matches!(UniqueId::parse(" abc"), Err(IdError::Padded(_))));
	}

	#[test]
	fn serde_is_a_plain_string() {
		let id = UniqueId::parse("f00d").unwrap();
		let json = serde_json::to_string(&id).unwrap();
		assert_eq!(json, "\"f00d\"");
		let back: UniqueId = serde_json::from_str(&json).unwrap();
		assert_eq!(back, id);
		assert!(serde_json::from_str::<UniqueId>("\"\"").is_err());
	}
}
