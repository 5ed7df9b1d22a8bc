//! Sidebar visibility.

use crate::viewport::{ViewportChange, ViewportClass};

/// Open/closed state of the sidebar
///
/// Starts open. On desktop it is always open; on mobile it closes when the
/// width genuinely changes and otherwise only moves on [`Sidebar::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidebar {
	open: bool,
}

impl Default for Sidebar {
	fn default() -> Self {
		Self { open: true }
	}
}

impl Sidebar {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_open(&self) -> bool {
		self.open
	}

	/// Reacts to a viewport observation.
	pub fn apply(&mut self, change: ViewportChange) {
		match change {
			ViewportChange::Desktop => self.open = true,
			ViewportChange::MobileResized => self.open = false,
			ViewportChange::MobileHeightOnly => {}
		}
	}

	/// Flips the sidebar on mobile. On desktop the sidebar is forced open,
	/// overriding any earlier close.
	pub fn toggle(&mut self, class: ViewportClass) {
		self.open = match class {
			ViewportClass::Mobile => !self.open,
			ViewportClass::Desktop => true,
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_starts_open() {
		assert!(Sidebar::new().is_open());
	}

	#[rstest]
	#[case(ViewportChange::Desktop, false, true)]
	#[case(ViewportChange::Desktop, true, true)]
	#[case(ViewportChange::MobileResized, true, false)]
	#[case(ViewportChange::MobileResized, false, false)]
	#[case(ViewportChange::MobileHeightOnly, true, true)]
	#[case(ViewportChange::MobileHeightOnly, false, false)]
	fn test_apply(#[case] change: ViewportChange, #[case] open: bool, #[case] expected: bool) {
		let mut sidebar = Sidebar { open };
		sidebar.apply(change);
		assert_eq!(sidebar.is_open(), expected);
	}

	#[rstest]
	fn test_toggle_flips_on_mobile() {
		let mut sidebar = Sidebar::new();
		sidebar.toggle(ViewportClass::Mobile);
		assert!(!sidebar.is_open());
		sidebar.toggle(ViewportClass::Mobile);
		assert!(sidebar.is_open());
	}

	#[rstest]
	#[case(true)]
	#[case(false)]
	fn test_toggle_forces_open_on_desktop(#[case] open: bool) {
		let mut sidebar = Sidebar { open };
		sidebar.toggle(ViewportClass::Desktop);
		assert!(sidebar.is_open());
	}
}
