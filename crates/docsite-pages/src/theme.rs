//! Theme preference and its persistence.

use std::fmt;

use crate::storage::PreferenceStore;

/// Storage key used by the Drash Land site.
pub const DEFAULT_DARK_MODE_KEY: &str = "drash_land_dark_mode";

/// Light or dark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemePreference {
	#[default]
	Light,
	Dark,
}

impl ThemePreference {
	/// Reads a stored flag. Only `"true"` selects dark.
	///
	/// # Examples
	///
	/// ```
	/// use docsite_pages::theme::ThemePreference;
	///
	/// assert_eq!(ThemePreference::from_stored("true"), ThemePreference::Dark);
	/// assert_eq!(ThemePreference::from_stored("false"), ThemePreference::Light);
	/// assert_eq!(ThemePreference::from_stored("yes please"), ThemePreference::Light);
	/// ```
	pub fn from_stored(value: &str) -> Self {
		if value == "true" {
			ThemePreference::Dark
		} else {
			ThemePreference::Light
		}
	}

	/// The stored form of this preference.
	pub fn as_stored(self) -> &'static str {
		match self {
			ThemePreference::Light => "false",
			ThemePreference::Dark => "true",
		}
	}

	pub fn is_dark(self) -> bool {
		matches!(self, ThemePreference::Dark)
	}

	pub fn toggled(self) -> Self {
		match self {
			ThemePreference::Light => ThemePreference::Dark,
			ThemePreference::Dark => ThemePreference::Light,
		}
	}
}

impl fmt::Display for ThemePreference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ThemePreference::Light => f.write_str("light"),
			ThemePreference::Dark => f.write_str("dark"),
		}
	}
}

/// Loads, toggles and writes through the dark-mode flag
#[derive(Debug)]
pub struct ThemeController<S> {
	store: S,
	key: String,
	preference: Option<ThemePreference>,
}

impl<S: PreferenceStore> ThemeController<S> {
	pub fn new(store: S, key: impl Into<String>) -> Self {
		Self {
			store,
			key: key.into(),
			preference: None,
		}
	}

	/// `None` until [`ThemeController::load`] has run.
	pub fn preference(&self) -> Option<ThemePreference> {
		self.preference
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn into_store(self) -> S {
		self.store
	}

	/// Reads the stored flag. A missing flag means light and is written back.
	///
	/// # Examples
	///
	/// ```
	/// use docsite_pages::storage::{MemoryStore, PreferenceStore};
	/// use docsite_pages::theme::{ThemeController, ThemePreference};
	///
	/// let mut theme = ThemeController::new(MemoryStore::new(), "dark_mode");
	/// assert_eq!(theme.load(), ThemePreference::Light);
	/// assert_eq!(theme.store().get("dark_mode").as_deref(), Some("false"));
	/// ```
	pub fn load(&mut self) -> ThemePreference {
		let preference = match self.store.get(&self.key) {
			Some(stored) if !stored.is_empty() => ThemePreference::from_stored(&stored),
			_ => {
				let preference = ThemePreference::default();
				self.store.set(&self.key, preference.as_stored());
				preference
			}
		};
		tracing::debug!(key = %self.key, %preference, "theme preference loaded");
		self.preference = Some(preference);
		preference
	}

	/// Flips the preference and persists it immediately.
	///
	/// Toggling before [`ThemeController::load`] starts from light.
	pub fn toggle(&mut self) -> ThemePreference {
		let preference = self.preference.unwrap_or_default().toggled();
		self.store.set(&self.key, preference.as_stored());
		self.preference = Some(preference);
		tracing::debug!(key = %self.key, %preference, "theme toggled");
		preference
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::MemoryStore;
	use rstest::rstest;

	const KEY: &str = DEFAULT_DARK_MODE_KEY;

	#[rstest]
	fn test_first_load_writes_light_back() {
		let mut theme = ThemeController::new(MemoryStore::new(), KEY);
		assert_eq!(theme.preference(), None);

		assert_eq!(theme.load(), ThemePreference::Light);
		assert_eq!(theme.store().get(KEY).as_deref(), Some("false"));
		assert_eq!(theme.store().writes(), 1);
	}

	#[rstest]
	#[case("true", ThemePreference::Dark)]
	#[case("false", ThemePreference::Light)]
	#[case("TRUE", ThemePreference::Light)]
	fn test_load_existing_does_not_write(#[case] stored: &str, #[case] expected: ThemePreference) {
		let mut theme = ThemeController::new(MemoryStore::with_entry(KEY, stored), KEY);
		assert_eq!(theme.load(), expected);
		assert_eq!(theme.store().writes(), 0);
	}

	#[rstest]
	fn test_empty_value_is_treated_as_absent() {
		let mut theme = ThemeController::new(MemoryStore::with_entry(KEY, ""), KEY);
		assert_eq!(theme.load(), ThemePreference::Light);
		assert_eq!(theme.store().get(KEY).as_deref(), Some("false"));
	}

	#[rstest]
	#[case("true")]
	#[case("false")]
	fn test_double_toggle_restores(#[case] stored: &str) {
		let mut theme = ThemeController::new(MemoryStore::with_entry(KEY, stored), KEY);
		let original = theme.load();

		theme.toggle();
		assert_eq!(theme.preference(), Some(original.toggled()));
		assert_eq!(
			theme.store().get(KEY).as_deref(),
			Some(original.toggled().as_stored())
		);

		theme.toggle();
		assert_eq!(theme.preference(), Some(original));
		assert_eq!(theme.store().get(KEY).as_deref(), Some(stored));
	}

	#[rstest]
	fn test_toggle_is_write_through() {
		let mut theme = ThemeController::new(MemoryStore::new(), KEY);
		theme.load();
		theme.toggle();
		theme.toggle();
		theme.toggle();
		assert_eq!(theme.store().writes(), 4);
		assert_eq!(theme.store().get(KEY).as_deref(), Some("true"));
	}
}
