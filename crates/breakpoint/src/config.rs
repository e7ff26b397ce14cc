//! Breakpoint configuration.
//!
//! Loaded from TOML; every field has a default so a partial file (or none at
//! all) is valid:
//!
//! ```toml
//! [registry]
//! sweep-threshold = 256
//!
//! [signs]
//! plain = "●"
//! disabled = "○"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kind::{Kind, KindTag};
use crate::render::Sign;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file is not valid TOML or has fields of the wrong type.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreakpointConfig {
	/// Identity table tuning.
	pub registry: RegistryConfig,
	/// Gutter glyphs.
	pub signs: SignConfig,
}

impl BreakpointConfig {
	/// Parses configuration from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a configuration file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml_str(&text)?;
		tracing::debug!(path = %path.display(), "loaded breakpoint config");
		Ok(config)
	}
}

/// Identity table tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistryConfig {
	/// Table size at which dangling identities are swept in bulk (0 disables).
	pub sweep_threshold: usize,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self { sweep_threshold: 256 }
	}
}

/// Gutter glyphs per breakpoint variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SignConfig {
	/// Plain stop.
	pub plain: char,
	/// Trace point.
	pub trace_point: char,
	/// Pause point.
	pub pause_point: char,
	/// Conditional stop.
	pub conditional: char,
	/// Sound point.
	pub sound_point: char,
	/// Skip point.
	pub skip_point: char,
	/// Line past the end of the file.
	pub beyond_end_of_file: char,
	/// Line that cannot hold a breakpoint.
	pub not_possible: char,
	/// Current program counter.
	pub program_counter: char,
	/// Glyph for every custom kind.
	pub custom: char,
	/// Replaces the variant glyph of disabled breakpoints.
	pub disabled: Option<char>,
}

impl Default for SignConfig {
	fn default() -> Self {
		Self {
			plain: '●',
			trace_point: '◆',
			pause_point: '◇',
			conditional: '◐',
			sound_point: '♪',
			skip_point: '↷',
			beyond_end_of_file: '~',
			not_possible: '×',
			program_counter: '▶',
			custom: '◉',
			disabled: Some('○'),
		}
	}
}

impl SignConfig {
	/// Resolves the sign for `kind`. [`KindTag::None`] has no sign.
	pub fn sign_for(&self, kind: Kind) -> Option<Sign> {
		let glyph = match kind.tag() {
			KindTag::None => return None,
			KindTag::Plain => self.plain,
			KindTag::TracePoint => self.trace_point,
			KindTag::PausePoint => self.pause_point,
			KindTag::Conditional => self.conditional,
			KindTag::SoundPoint => self.sound_point,
			KindTag::SkipPoint => self.skip_point,
			KindTag::BeyondEndOfFile => self.beyond_end_of_file,
			KindTag::NotPossible => self.not_possible,
			KindTag::ProgramCounter => self.program_counter,
			KindTag::Custom(_) => self.custom,
		};
		let disabled = kind.is_disabled() && kind.tag().is_breakpoint();
		let glyph = match self.disabled {
			Some(g) if disabled => g,
			_ => glyph,
		};
		Some(Sign {
			glyph,
			tag: kind.tag(),
			disabled,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn empty_text_yields_defaults() {
		let config = BreakpointConfig::from_toml_str("").unwrap();
		assert_eq!(config, BreakpointConfig::default());
	}

	#[test]
	fn partial_sections_keep_other_defaults() {
		let config = BreakpointConfig::from_toml_str(
			r#"
			[registry]
			sweep-threshold = 0

			[signs]
			conditional = "?"
			"#,
		)
		.unwrap();
		assert_eq!(config.registry.sweep_threshold, 0);
		assert_eq!(config.signs.conditional, '?');
		assert_eq!(config.signs.plain, SignConfig::default().plain);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = BreakpointConfig::from_toml_str("[signs]\nbogus = \"x\"\n").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn multi_char_glyph_is_rejected() {
		assert!(BreakpointConfig::from_toml_str("[signs]\nplain = \"ab\"\n").is_err());
	}

	#[test]
	fn load_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[signs]\ndisabled = \"-\"").unwrap();
		let config = BreakpointConfig::load(file.path()).unwrap();
		assert_eq!(config.signs.disabled, Some('-'));
	}

	#[test]
	fn load_missing_file_reports_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.toml");
		let err = BreakpointConfig::load(&path).unwrap_err();
		assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
	}

	#[test]
	fn disabled_glyph_applies_to_breakpoints_only() {
		let signs = SignConfig::default();
		let off = Kind::new(KindTag::Plain).with_disabled(true);
		assert_eq!(signs.sign_for(off).unwrap().glyph, '○');

		let pc = Kind::new(KindTag::ProgramCounter).with_disabled(true);
		let sign = signs.sign_for(pc).unwrap();
		assert_eq!(sign.glyph, '▶');
		assert!(!sign.disabled);

		assert!(signs.sign_for(Kind::new(KindTag::None)).is_none());
	}
}
