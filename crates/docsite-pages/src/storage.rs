//! Client-side preference storage.
//!
//! Values are strings, as in the browser's `localStorage`. The theme flag is
//! stored as `"true"` or `"false"`.

use std::collections::HashMap;

/// A string key/value store for user preferences
///
/// Reads and writes are assumed to succeed; a store that cannot persist
/// simply forgets.
pub trait PreferenceStore {
	fn get(&self, key: &str) -> Option<String>;

	fn set(&mut self, key: &str, value: &str);
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
	fn get(&self, key: &str) -> Option<String> {
		(**self).get(key)
	}

	fn set(&mut self, key: &str, value: &str) {
		(**self).set(key, value)
	}
}

/// In-memory store
///
/// # Examples
///
/// ```
/// use docsite_pages::storage::{MemoryStore, PreferenceStore};
///
/// let mut store = MemoryStore::new();
/// store.set("drash_land_dark_mode", "true");
/// assert_eq!(store.get("drash_land_dark_mode").as_deref(), Some("true"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
	values: HashMap<String, String>,
	writes: usize,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// A store pre-populated with one entry.
	pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
		let mut values = HashMap::new();
		values.insert(key.into(), value.into());
		Self { values, writes: 0 }
	}

	/// Number of `set` calls so far.
	pub fn writes(&self) -> usize {
		self.writes
	}
}

impl PreferenceStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.values.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) {
		self.writes += 1;
		self.values.insert(key.to_string(), value.to_string());
	}
}

/// Store over `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
	storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
	/// `None` when there is no window or storage access is denied.
	pub fn new() -> Option<Self> {
		let storage = web_sys::window()?.local_storage().ok()??;
		Some(Self { storage })
	}
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStorageStore {
	fn get(&self, key: &str) -> Option<String> {
		self.storage.get_item(key).ok().flatten()
	}

	fn set(&mut self, key: &str, value: &str) {
		if let Err(err) = self.storage.set_item(key, value) {
			tracing::warn!(key, ?err, "failed to write preference to localStorage");
		}
	}
}
