//! Static redirect table.

use std::collections::HashMap;

pub use docsite_conf::normalize_path;
use docsite_conf::RedirectRule;

/// HTTP semantics of a redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectKind {
	/// 301, cached long-term by clients.
	Permanent,
	/// 302.
	Temporary,
}

impl RedirectKind {
	pub fn status_code(self) -> u16 {
		match self {
			RedirectKind::Permanent => 301,
			RedirectKind::Temporary => 302,
		}
	}

	pub fn is_permanent(self) -> bool {
		matches!(self, RedirectKind::Permanent)
	}
}

impl From<bool> for RedirectKind {
	fn from(permanent: bool) -> Self {
		if permanent {
			RedirectKind::Permanent
		} else {
			RedirectKind::Temporary
		}
	}
}

/// A matched redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
	pub destination: String,
	pub kind: RedirectKind,
}

impl Redirect {
	pub fn permanent(destination: impl Into<String>) -> Self {
		Self {
			destination: destination.into(),
			kind: RedirectKind::Permanent,
		}
	}

	pub fn temporary(destination: impl Into<String>) -> Self {
		Self {
			destination: destination.into(),
			kind: RedirectKind::Temporary,
		}
	}
}

/// Lookup table over the configured redirect rules
///
/// Sources are normalized with [`normalize_path`] on insertion and lookup, so
/// `/drash/v1.x/` and `/drash/v1.x?ref=x` both match a `/drash/v1.x` rule.
#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
	entries: HashMap<String, Redirect>,
	// Insertion order, for listing.
	order: Vec<String>,
}

impl RedirectTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table from configured rules. A later rule with the same source
	/// replaces an earlier one.
	pub fn from_rules(rules: &[RedirectRule]) -> Self {
		let mut table = Self::new();
		for rule in rules {
			table.insert(&rule.source, &rule.destination, rule.permanent.into());
		}
		tracing::debug!(count = table.len(), "redirect table built");
		table
	}

	pub fn insert(&mut self, source: &str, destination: impl Into<String>, kind: RedirectKind) {
		let key = normalize_path(source).to_string();
		let redirect = Redirect {
			destination: destination.into(),
			kind,
		};
		if self.entries.insert(key.clone(), redirect).is_none() {
			self.order.push(key);
		}
	}

	/// Finds the redirect for a request path, if any.
	///
	/// # Examples
	///
	/// ```
	/// use docsite_conf::RedirectRule;
	/// use docsite_urls::{RedirectKind, RedirectTable};
	///
	/// let table = RedirectTable::from_rules(&[RedirectRule::permanent("/old", "/new")]);
	/// let redirect = table.lookup("/old/").unwrap();
	///
	/// assert_eq!(redirect.destination, "/new");
	/// assert_eq!(redirect.kind, RedirectKind::Permanent);
	/// assert!(table.lookup("/new").is_none());
	/// ```
	pub fn lookup(&self, path: &str) -> Option<&Redirect> {
		self.entries.get(normalize_path(path))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries in the order they were first inserted.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Redirect)> {
		self.order
			.iter()
			.filter_map(|source| self.entries.get(source).map(|r| (source.as_str(), r)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use docsite_conf::Settings;
	use rstest::{fixture, rstest};

	#[fixture]
	fn table() -> RedirectTable {
		RedirectTable::from_rules(&Settings::bundled().unwrap().redirects)
	}

	#[rstest]
	#[case("/drash/v2.x/tutorials", "/drash/v2.x/tutorials/introduction/add-drash-as-a-dependency", RedirectKind::Temporary)]
	#[case("/drash/v1.x", "/drash/v1.x/index.html", RedirectKind::Temporary)]
	#[case(
		"/drash/v2.x/tutorials/services/introduction",
		"/drash/v2.x/tutorials/services/basics",
		RedirectKind::Permanent
	)]
	fn test_bundled_lookup(
		table: RedirectTable,
		#[case] source: &str,
		#[case] destination: &str,
		#[case] kind: RedirectKind,
	) {
		let redirect = table.lookup(source).unwrap();
		assert_eq!(redirect.destination, destination);
		assert_eq!(redirect.kind, kind);
	}

	#[rstest]
	#[case("/drash/v1.x/")]
	#[case("/drash/v1.x?utm=1")]
	#[case("/drash/v1.x#top")]
	#[case("/drash/v1.x//")]
	fn test_lookup_normalizes(table: RedirectTable, #[case] path: &str) {
		assert_eq!(table.lookup(path).unwrap().destination, "/drash/v1.x/index.html");
	}

	#[rstest]
	fn test_unknown_path_has_no_redirect(table: RedirectTable) {
		assert!(table.lookup("/drash/v2.x/getting-started/introduction").is_none());
		assert!(table.lookup("/").is_none());
	}

	#[rstest]
	fn test_status_codes() {
		assert_eq!(RedirectKind::Permanent.status_code(), 301);
		assert_eq!(RedirectKind::Temporary.status_code(), 302);
		assert_eq!(RedirectKind::from(true), RedirectKind::Permanent);
	}

	#[rstest]
	fn test_iter_keeps_insertion_order() {
		let table = RedirectTable::from_rules(&[
			RedirectRule::temporary("/b", "/x"),
			RedirectRule::temporary("/a", "/y"),
			RedirectRule::permanent("/b/", "/z"),
		]);

		let listed: Vec<_> = table.iter().map(|(s, r)| (s, r.destination.as_str())).collect();
		assert_eq!(listed, vec![("/b", "/z"), ("/a", "/y")]);
		assert_eq!(table.len(), 2);
	}
}
