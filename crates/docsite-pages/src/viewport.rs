//! Viewport classification.

use std::fmt;

/// Widths at or above this many pixels are desktop.
pub const DEFAULT_BREAKPOINT: u32 = 900;

/// Coarse device-width bucket driving layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
	Desktop,
	Mobile,
}

impl ViewportClass {
	/// Classifies a window width against `breakpoint`.
	///
	/// # Examples
	///
	/// ```
	/// use docsite_pages::viewport::ViewportClass;
	///
	/// assert_eq!(ViewportClass::classify(900, 900), ViewportClass::Desktop);
	/// assert_eq!(ViewportClass::classify(899, 900), ViewportClass::Mobile);
	/// ```
	pub fn classify(width: u32, breakpoint: u32) -> Self {
		if width >= breakpoint {
			ViewportClass::Desktop
		} else {
			ViewportClass::Mobile
		}
	}

	pub fn is_desktop(self) -> bool {
		matches!(self, ViewportClass::Desktop)
	}

	pub fn is_mobile(self) -> bool {
		matches!(self, ViewportClass::Mobile)
	}
}

impl fmt::Display for ViewportClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ViewportClass::Desktop => f.write_str("desktop"),
			ViewportClass::Mobile => f.write_str("mobile"),
		}
	}
}

/// What a width observation means for the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportChange {
	/// Width is at or above the breakpoint.
	Desktop,
	/// Mobile, and the width differs from the last mobile width seen.
	MobileResized,
	/// Mobile with the same width as before. Mobile browsers fire resize when
	/// the address bar hides on scroll; only the height changed.
	MobileHeightOnly,
}

/// Classifier that remembers the last mobile width it saw
///
/// The remembered width is only ever compared against mobile observations;
/// desktop observations leave it untouched.
#[derive(Debug, Clone)]
pub struct Viewport {
	breakpoint: u32,
	class: Option<ViewportClass>,
	last_known_width: Option<u32>,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(DEFAULT_BREAKPOINT)
	}
}

impl Viewport {
	pub fn new(breakpoint: u32) -> Self {
		Self {
			breakpoint,
			class: None,
			last_known_width: None,
		}
	}

	pub fn breakpoint(&self) -> u32 {
		self.breakpoint
	}

	/// `None` until the first observation.
	pub fn class(&self) -> Option<ViewportClass> {
		self.class
	}

	pub fn last_known_width(&self) -> Option<u32> {
		self.last_known_width
	}

	/// Records a window width and reports how the sidebar should react.
	pub fn observe(&mut self, width: u32) -> ViewportChange {
		let class = ViewportClass::classify(width, self.breakpoint);
		self.class = Some(class);

		match class {
			ViewportClass::Desktop => ViewportChange::Desktop,
			ViewportClass::Mobile if self.last_known_width == Some(width) => {
				ViewportChange::MobileHeightOnly
			}
			ViewportClass::Mobile => {
				self.last_known_width = Some(width);
				ViewportChange::MobileResized
			}
		}
	}
}
