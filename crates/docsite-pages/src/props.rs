//! Inputs the layout receives from routing and content.

use serde::{Deserialize, Serialize};

/// One link in a sidebar category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarLink {
	pub label: String,
	/// Absolute path, or a page path relative to `/{module}/{version}/`.
	pub path: String,
}

impl SidebarLink {
	pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			path: path.into(),
		}
	}

	/// The link target for a given module version.
	pub fn href(&self, module: &str, version: &str) -> String {
		if self.path.starts_with('/') || self.path.contains("://") {
			self.path.clone()
		} else {
			format!("/{}/{}/{}", module, version, self.path.trim_matches('/'))
		}
	}
}

/// A titled group of sidebar links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarCategory {
	pub label: String,
	#[serde(default)]
	pub links: Vec<SidebarLink>,
}

/// Sidebar file layout: `[[categories]]` tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarFile {
	#[serde(default)]
	pub categories: Vec<SidebarCategory>,
}

/// Everything the layout needs about the page it wraps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutProps {
	/// Request path, used for breadcrumbs and the issue link.
	pub page_uri: String,
	/// Module shown in the top bar.
	pub module_name: Option<String>,
	pub module_version: Option<String>,
	pub module_versions: Vec<String>,
	pub sidebar_categories: Vec<SidebarCategory>,
	pub edit_this_page_url: Option<String>,
	/// Destination of a pending client-side redirect.
	pub will_redirect: Option<String>,
}

impl LayoutProps {
	pub fn new(page_uri: impl Into<String>) -> Self {
		Self {
			page_uri: page_uri.into(),
			..Self::default()
		}
	}

	pub fn with_module(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
		self.module_name = Some(name.into());
		self.module_version = Some(version.into());
		self
	}

	pub fn with_versions(mut self, versions: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.module_versions = versions.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_categories(mut self, categories: Vec<SidebarCategory>) -> Self {
		self.sidebar_categories = categories;
		self
	}

	pub fn with_edit_url(mut self, url: Option<String>) -> Self {
		self.edit_this_page_url = url;
		self
	}

	pub fn with_redirect(mut self, destination: Option<String>) -> Self {
		self.will_redirect = destination;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("tutorials/resources/creating-a-resource", "/drash/v2.x/tutorials/resources/creating-a-resource")]
	#[case("/drash/v1.x/index.html", "/drash/v1.x/index.html")]
	#[case("https://deno.land/x/drash", "https://deno.land/x/drash")]
	fn test_href(#[case] path: &str, #[case] expected: &str) {
		assert_eq!(SidebarLink::new("x", path).href("drash", "v2.x"), expected);
	}

	#[rstest]
	fn test_builder() {
		let props = LayoutProps::new("/drash/v2.x/x")
			.with_module("drash", "v2.x")
			.with_versions(["v1.x", "v2.x"])
			.with_redirect(Some("/elsewhere".to_string()));

		assert_eq!(props.module_name.as_deref(), Some("drash"));
		assert_eq!(props.module_versions, vec!["v1.x", "v2.x"]);
		assert_eq!(props.will_redirect.as_deref(), Some("/elsewhere"));
	}
}
