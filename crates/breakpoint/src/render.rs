//! Drawing hook.
//!
//! Breakpoints do not draw themselves; they hand a [`Sign`] to whatever
//! renderer the caller supplies. Nothing here touches line resolution.

use crate::kind::KindTag;

/// Center point of a sign, in the renderer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
	/// Horizontal center.
	pub x: f32,
	/// Vertical center.
	pub y: f32,
}

impl Anchor {
	/// Creates an anchor at `(x, y)`.
	pub fn new(x: f32, y: f32) -> Self {
		Self { x, y }
	}
}

/// What to draw for one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sign {
	/// Glyph resolved from configuration.
	pub glyph: char,
	/// Variant the glyph was chosen for.
	pub tag: KindTag,
	/// Whether the breakpoint is disabled.
	pub disabled: bool,
}

/// Rendering collaborator (gutter column, debugger panel, ...).
pub trait BreakpointRenderer {
	/// Draws `sign` centered on `anchor`.
	fn draw(&self, anchor: Anchor, sign: &Sign);
}
