//! Breakpoint kind and modifier flags.
//!
//! Persisted breakpoints carry a single packed integer: the low byte selects the
//! variant ([`KindTag`]) and every bit from bit 8 up is a modifier flag
//! ([`KindFlags`]). Only [`KindFlags::DISABLED`] is understood today; all other
//! high bits are carried through untouched so records written by newer builds
//! survive a load/save cycle.

use crate::error::BreakpointError;


/// Mask selecting the variant byte of a packed kind.
pub const KIND_MASK: u64 = 0xff;

/// Behavioral variant of a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
	/// No breakpoint on this line.
	None,
	/// Stop execution.
	Plain,
	/// Print a message and continue.
	TracePoint,
	/// Refresh the debugger display and continue.
	PausePoint,
	/// Stop only when the guard expression holds.
	Conditional,
	/// Play a sound and continue.
	SoundPoint,
	/// Skip over this line.
	SkipPoint,
	/// Line lies past the end of the file.
	BeyondEndOfFile,
	/// Line cannot carry a breakpoint (comment, blank line).
	NotPossible,
	/// Marks the current program counter rather than a stop.
	ProgramCounter,
	/// Debugger-defined kind.
	Custom(CustomKind),
}

/// Variant byte of a debugger-defined kind, always `>= 128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomKind(u8);

impl CustomKind {
	/// Returns `None` for bytes below [`KindTag::FIRST_CUSTOM`].
	pub const fn new(byte: u8) -> Option<Self> {
		if byte >= KindTag::FIRST_CUSTOM {
			Some(Self(byte))
		} else {
			None
		}
	}

	/// Returns the variant byte.
	pub const fn byte(self) -> u8 {
		self.0
	}
}

impl KindTag {
	/// First byte value reserved for custom kinds.
	pub const FIRST_CUSTOM: u8 = 128;

	/// Decodes a variant byte. Returns `None` for unassigned values below 128.
	pub const fn from_byte(byte: u8) -> Option<Self> {
		Some(match byte {
			0 => Self::None,
			1 => Self::Plain,
			2 => Self::TracePoint,
			3 => Self::PausePoint,
			4 => Self::Conditional,
			5 => Self::SoundPoint,
			6 => Self::SkipPoint,
			100 => Self::BeyondEndOfFile,
			101 => Self::NotPossible,
			102 => Self::ProgramCounter,
			b if b >= Self::FIRST_CUSTOM => Self::Custom(CustomKind(b)),
			_ => return None,
		})
	}

	/// Returns the variant byte.
	pub const fn byte(self) -> u8 {
		match self {
			Self::None => 0,
			Self::Plain => 1,
			Self::TracePoint => 2,
			Self::PausePoint => 3,
			Self::Conditional => 4,
			Self::SoundPoint => 5,
			Self::SkipPoint => 6,
			Self::BeyondEndOfFile => 100,
			Self::NotPossible => 101,
			Self::ProgramCounter => 102,
			Self::Custom(c) => c.byte(),
		}
	}

	/// Builds a custom tag, or `None` for bytes below [`Self::FIRST_CUSTOM`].
	pub const fn custom(byte: u8) -> Option<Self> {
		match CustomKind::new(byte) {
			Some(c) => Some(Self::Custom(c)),
			None => None,
		}
	}

	/// Returns true for debugger-defined kinds.
	pub const fn is_custom(self) -> bool {
		matches!(self, Self::Custom(_))
	}

	/// Returns true if this variant makes the debugger act on the line.
	///
	/// Gutter markers such as [`KindTag::ProgramCounter`] share the encoding but
	/// are not breakpoints.
	pub const fn is_breakpoint(self) -> bool {
		!matches!(
			self,
			Self::None | Self::BeyondEndOfFile | Self::NotPossible | Self::ProgramCounter
		)
	}
}

bitflags::bitflags! {
	/// Modifier bits of a packed kind (bit 8 and above).
	///
	/// Values are built with `from_bits_retain` so unknown bits round-trip.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct KindFlags: u64 {
		/// The breakpoint is kept but not acted on.
		const DISABLED = 1 << 8;
	}
}

/// A decoded kind: variant plus modifier flags.
///
/// Flags never overlap the variant byte; bits below bit 8 are dropped on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind {
	tag: KindTag,
	flags: KindFlags,
}

impl Kind {
	/// Creates a kind with no flags set.
	pub const fn new(tag: KindTag) -> Self {
		Self {
			tag,
			flags: KindFlags::empty(),
		}
	}

	/// Creates a kind with the given modifier bits.
	pub const fn with_flags(tag: KindTag, flags: KindFlags) -> Self {
		Self {
			tag,
			flags: KindFlags::from_bits_retain(flags.bits() & !KIND_MASK),
		}
	}

	/// Decodes a packed kind.
	///
	/// Fails with [`BreakpointError::InvalidKind`] when the low byte is an
	/// unassigned value below [`KindTag::FIRST_CUSTOM`].
	pub fn from_raw(raw: u64) -> Result<Self, BreakpointError> {
		let tag = KindTag::from_byte((raw & KIND_MASK) as u8).ok_or(BreakpointError::InvalidKind { raw })?;
		Ok(Self::with_flags(tag, KindFlags::from_bits_retain(raw)))
	}

	/// Packs this kind back into its persisted integer form.
	pub const fn raw(self) -> u64 {
		self.tag.byte() as u64 | (self.flags.bits() & !KIND_MASK)
	}

	/// Returns the variant.
	pub const fn tag(self) -> KindTag {
		self.tag
	}

	/// Returns the modifier bits, including any this build does not understand.
	pub const fn flags(self) -> KindFlags {
		self.flags
	}

	/// Returns a copy with the variant replaced and every flag kept.
	pub const fn with_tag(self, tag: KindTag) -> Self {
		Self { tag, ..self }
	}

	/// Returns true if the disabled flag is set.
	pub const fn is_disabled(self) -> bool {
		self.flags.contains(KindFlags::DISABLED)
	}

	/// Returns a copy with only the disabled flag changed.
	pub fn with_disabled(mut self, disabled: bool) -> Self {
		self.flags.set(KindFlags::DISABLED, disabled);
		self
	}
}

impl From<KindTag> for Kind {
	fn from(tag: KindTag) -> Self {
		Self::new(tag)
	}
}

impl From<Kind> for u64 {
	fn from(kind: Kind) -> Self {
		kind.raw()
	}
}

impl From<KindTag> for u64 {
	fn from(tag: KindTag) -> Self {
		tag.byte() as u64
	}
}
