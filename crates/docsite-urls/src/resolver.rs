//! Documentation route resolution.
//!
//! Paths have the shape `/{module}/{version}/{page...}`. Shorter paths are
//! sent to the version's introduction page; anything naming an unknown module
//! or version does not resolve.

use docsite_conf::{ModuleSettings, Settings};

use crate::redirects::{Redirect, RedirectTable, normalize_path};

/// Page every version starts at.
pub const DEFAULT_PAGE: &str = "getting-started/introduction";

/// A documentation page location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsRoute {
	pub module: String,
	pub version: String,
	/// Slash-separated page path within the version, never empty.
	pub page: String,
}

impl DocsRoute {
	pub fn new(
		module: impl Into<String>,
		version: impl Into<String>,
		page: impl Into<String>,
	) -> Self {
		Self {
			module: module.into(),
			version: version.into(),
			page: page.into(),
		}
	}

	/// The canonical request path of this page.
	pub fn path(&self) -> String {
		format!("/{}/{}/{}", self.module, self.version, self.page)
	}
}

/// Outcome of resolving a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	/// The site root.
	Home,
	Page(DocsRoute),
	Redirect(Redirect),
	NotFound,
}

/// Resolves request paths against configured modules and redirects
#[derive(Debug, Clone)]
pub struct Resolver {
	modules: Vec<ModuleSettings>,
	redirects: RedirectTable,
}

impl Resolver {
	pub fn new(settings: &Settings) -> Self {
		Self {
			modules: settings.modules.clone(),
			redirects: RedirectTable::from_rules(&settings.redirects),
		}
	}

	pub fn redirects(&self) -> &RedirectTable {
		&self.redirects
	}

	fn module(&self, name: &str) -> Option<&ModuleSettings> {
		self.modules.iter().find(|m| m.name == name)
	}

	/// Resolves a request path. Static redirects win over module routing.
	pub fn resolve(&self, path: &str) -> Resolution {
		if let Some(redirect) = self.redirects.lookup(path) {
			tracing::debug!(path, destination = %redirect.destination, "static redirect");
			return Resolution::Redirect(redirect.clone());
		}

		let path = normalize_path(path);
		if path == "/" {
			return Resolution::Home;
		}

		let mut segments = path.trim_start_matches('/').split('/');
		let Some(module) = segments.next().and_then(|name| self.module(name)) else {
			return Resolution::NotFound;
		};

		let version = match segments.next() {
			None => {
				return match module.latest_version() {
					Some(latest) => Resolution::Redirect(Redirect::temporary(format!(
						"/{}/{}/{}",
						module.name, latest, DEFAULT_PAGE
					))),
					None => Resolution::NotFound,
				};
			}
			Some(version) if module.has_version(version) => version,
			Some(_) => return Resolution::NotFound,
		};

		let page: Vec<&str> = segments.collect();
		if page.is_empty() {
			return Resolution::Redirect(Redirect::temporary(format!(
				"/{}/{}/{}",
				module.name, version, DEFAULT_PAGE
			)));
		}
		if page.iter().any(|s| !is_page_segment(s)) {
			return Resolution::NotFound;
		}

		Resolution::Page(DocsRoute::new(
			module.name.as_str(),
			version,
			page.join("/"),
		))
	}
}

fn is_page_segment(segment: &str) -> bool {
	!segment.is_empty()
		&& segment != "."
		&& segment != ".."
		&& segment
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
