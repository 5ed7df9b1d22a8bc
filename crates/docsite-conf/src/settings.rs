//! Settings structures.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Bundled default configuration.
pub(crate) const BUNDLED_SITE_TOML: &str = include_str!("../site.toml");

/// Top-level site settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
	pub app: AppSettings,
	pub local_storage_keys: LocalStorageKeys,
	pub layout: LayoutSettings,
	/// Repository of the website itself; issues about pages are filed here.
	pub website_github_url: String,
	pub copyright: String,
	pub modules: Vec<ModuleSettings>,
	pub redirects: Vec<RedirectRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
	pub env: String,
}

impl Default for AppSettings {
	fn default() -> Self {
		Self {
			env: "production".to_string(),
		}
	}
}

/// Keys used for client-side persisted preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalStorageKeys {
	pub dark_mode: String,
}

impl Default for LocalStorageKeys {
	fn default() -> Self {
		Self {
			dark_mode: "drash_land_dark_mode".to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
	/// Widths at or above this are desktop.
	pub breakpoint: u32,
	/// Width assumed on the server when the client sends no viewport hint.
	pub default_viewport_width: u32,
}

impl Default for LayoutSettings {
	fn default() -> Self {
		Self {
			breakpoint: 900,
			default_viewport_width: 1280,
		}
	}
}

/// A documented module and its versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSettings {
	pub name: String,
	/// Oldest first.
	pub versions: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub doc_deno_land_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub github_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub roadmap_url: Option<String>,
	/// Base URL for "edit this page" links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub edit_url_base: Option<String>,
}

impl ModuleSettings {
	/// The newest listed version.
	pub fn latest_version(&self) -> Option<&str> {
		self.versions.last().map(String::as_str)
	}

	pub fn has_version(&self, version: &str) -> bool {
		self.versions.iter().any(|v| v == version)
	}

	/// Link to the source of a page, when the module has an edit base configured.
	///
	/// # Examples
	///
	/// ```
	/// use docsite_conf::ModuleSettings;
	///
	/// let module = ModuleSettings {
	///     name: "drash".into(),
	///     versions: vec!["v2.x".into()],
	///     doc_deno_land_url: None,
	///     github_url: None,
	///     roadmap_url: None,
	///     edit_url_base: Some("https://github.com/drashland/website-v2/edit/main/src/pages/drash/".into()),
	/// };
	///
	/// assert_eq!(
	///     module.edit_url("v2.x", "getting-started/introduction").as_deref(),
	///     Some("https://github.com/drashland/website-v2/edit/main/src/pages/drash/v2.x/getting-started/introduction.md")
	/// );
	/// ```
	pub fn edit_url(&self, version: &str, page: &str) -> Option<String> {
		self.edit_url_base.as_ref().map(|base| {
			format!(
				"{}/{}/{}.md",
				base.trim_end_matches('/'),
				version,
				page.trim_matches('/')
			)
		})
	}
}

/// A `{source, destination, permanent}` redirect entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
	pub source: String,
	pub destination: String,
	#[serde(default)]
	pub permanent: bool,
}

impl RedirectRule {
	pub fn new(source: impl Into<String>, destination: impl Into<String>, permanent: bool) -> Self {
		Self {
			source: source.into(),
			destination: destination.into(),
			permanent,
		}
	}

	pub fn permanent(source: impl Into<String>, destination: impl Into<String>) -> Self {
		Self::new(source, destination, true)
	}

	pub fn temporary(source: impl Into<String>, destination: impl Into<String>) -> Self {
		Self::new(source, destination, false)
	}
}

/// Strips query, fragment and trailing slashes from a request path.
///
/// The root path stays `/`. Redirect sources are matched in this form.
///
/// # Examples
///
/// ```
/// use docsite_conf::normalize_path;
///
/// assert_eq!(normalize_path("/drash/v2.x/?a=1#top"), "/drash/v2.x");
/// assert_eq!(normalize_path("/"), "/");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> &str {
	let end = path.find(['?', '#']).unwrap_or(path.len());
	let trimmed = path[..end].trim_end_matches('/');
	if trimmed.is_empty() { "/" } else { trimmed }
}

impl Settings {
	/// Looks up a module by name.
	pub fn module(&self, name: &str) -> Option<&ModuleSettings> {
		self.modules.iter().find(|m| m.name == name)
	}

	pub fn module_names(&self) -> impl Iterator<Item = &str> {
		self.modules.iter().map(|m| m.name.as_str())
	}

	pub fn is_production(&self) -> bool {
		self.app.env == "production"
	}

	/// URL that opens a new issue about the given page on the website repository.
	///
	/// # Examples
	///
	/// ```
	/// use docsite_conf::Settings;
	///
	/// let settings = Settings {
	///     website_github_url: "https://github.com/drashland/website-v2".into(),
	///     ..Settings::default()
	/// };
	///
	/// assert_eq!(
	///     settings.github_create_issue_url("/drash/v2.x"),
	///     "https://github.com/drashland/website-v2/issues/new?title=Error%20on%20page%3A%20%2Fdrash%2Fv2%2Ex"
	/// );
	/// ```
	pub fn github_create_issue_url(&self, page_uri: &str) -> String {
		let title = format!("Error on page: {}", page_uri);
		format!(
			"{}/issues/new?title={}",
			self.website_github_url.trim_end_matches('/'),
			utf8_percent_encode(&title, NON_ALPHANUMERIC)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn bundled() -> Settings {
		toml::from_str(BUNDLED_SITE_TOML).unwrap()
	}

	#[rstest]
	fn test_bundled_site_parses(bundled: Settings) {
		assert_eq!(bundled.app.env, "production");
		assert_eq!(bundled.layout.breakpoint, 900);
		assert_eq!(
			bundled.module_names().collect::<Vec<_>>(),
			vec!["dmm", "drash", "line", "sinco", "wocket", "rhum", "vital"]
		);
		assert_eq!(bundled.redirects.len(), 16);
	}

	#[rstest]
	#[case("drash", Some("v2.x"))]
	#[case("sinco", Some("v4.x"))]
	#[case("vital", Some("v1.x"))]
	fn test_latest_version(bundled: Settings, #[case] module: &str, #[case] expected: Option<&str>) {
		assert_eq!(bundled.module(module).unwrap().latest_version(), expected);
	}

	#[rstest]
	fn test_permanent_redirects_are_marked(bundled: Settings) {
		let permanent: Vec<_> = bundled
			.redirects
			.iter()
			.filter(|r| r.permanent)
			.map(|r| r.source.as_str())
			.collect();

		assert_eq!(permanent.len(), 4);
		assert!(permanent.iter().all(|s| s.starts_with("/drash/v2.x/tutorials/services/")));
	}

	#[rstest]
	fn test_missing_sections_use_defaults() {
		let settings: Settings = toml::from_str("website_github_url = \"https://x\"").unwrap();

		assert_eq!(settings.local_storage_keys.dark_mode, "drash_land_dark_mode");
		assert_eq!(settings.layout.default_viewport_width, 1280);
		assert!(settings.modules.is_empty());
		assert!(settings.is_production());
	}

	#[rstest]
	fn test_edit_url_absent_without_base(bundled: Settings) {
		assert_eq!(bundled.module("vital").unwrap().edit_url("v1.x", "x"), None);
	}

	#[rstest]
	fn test_issue_url_trims_trailing_slash() {
		let settings = Settings {
			website_github_url: "https://github.com/org/site/".to_string(),
			..Settings::default()
		};
		assert!(
			settings
				.github_create_issue_url("/")
				.starts_with("https://github.com/org/site/issues/new?title=")
		);
	}
}
