//! Documentation content.
//!
//! Pages are pre-rendered HTML on disk, laid out as
//! `<root>/<module>/<version>/<page>.html`. A sibling `<page>.redirect` file
//! holding a path marks the page as redirecting, and
//! `<root>/<module>/<version>/sidebar.toml` lists the sidebar categories.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use docsite_pages::{SidebarCategory, SidebarFile};
use docsite_urls::DocsRoute;

/// Errors raised while loading content
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: io::Error,
	},

	#[error("invalid sidebar file {path}: {source}")]
	Sidebar {
		path: String,
		#[source]
		source: toml::de::Error,
	},
}

impl From<ContentError> for docsite_core::Error {
	fn from(error: ContentError) -> Self {
		docsite_core::Error::Content(error.to_string())
	}
}

/// A page body and its pending redirect, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
	pub html: String,
	pub redirect: Option<String>,
}

/// Where documentation content comes from
#[async_trait]
pub trait ContentSource: Send + Sync {
	/// `None` when the page does not exist.
	async fn page(&self, route: &DocsRoute) -> Result<Option<PageContent>, ContentError>;

	/// Sidebar categories for a module version. Empty when there are none.
	async fn sidebar(&self, module: &str, version: &str)
	-> Result<Vec<SidebarCategory>, ContentError>;
}

/// Reads content from a directory tree
#[derive(Debug, Clone)]
pub struct FsContentSource {
	root: PathBuf,
}

impl FsContentSource {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	fn version_dir(&self, module: &str, version: &str) -> PathBuf {
		self.root.join(module).join(version)
	}

	fn page_path(&self, route: &DocsRoute, extension: &str) -> PathBuf {
		let mut path = self.version_dir(&route.module, &route.version);
		path.extend(route.page.split('/'));
		let mut file_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
		file_name.push(".");
		file_name.push(extension);
		path.set_file_name(file_name);
		path
	}
}

async fn read_optional(path: &Path) -> Result<Option<String>, ContentError> {
	match tokio::fs::read_to_string(path).await {
		Ok(contents) => Ok(Some(contents)),
		Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(source) => Err(ContentError::Io {
			path: path.display().to_string(),
			source,
		}),
	}
}

#[async_trait]
impl ContentSource for FsContentSource {
	async fn page(&self, route: &DocsRoute) -> Result<Option<PageContent>, ContentError> {
		let html_path = self.page_path(route, "html");
		let html = read_optional(&html_path).await?;
		let redirect = read_optional(&self.page_path(route, "redirect"))
			.await?
			.map(|r| r.trim().to_string())
			.filter(|r| !r.is_empty());

		if html.is_none() && redirect.is_none() {
			tracing::debug!(path = %html_path.display(), "no content for page");
			return Ok(None);
		}

		Ok(Some(PageContent {
			html: html.unwrap_or_default(),
			redirect,
		}))
	}

	async fn sidebar(
		&self,
		module: &str,
		version: &str,
	) -> Result<Vec<SidebarCategory>, ContentError> {
		let path = self.version_dir(module, version).join("sidebar.toml");
		let Some(source) = read_optional(&path).await? else {
			tracing::warn!(path = %path.display(), "no sidebar file");
			return Ok(Vec::new());
		};

		let file: SidebarFile = toml::from_str(&source).map_err(|source| ContentError::Sidebar {
			path: path.display().to_string(),
			source,
		})?;
		Ok(file.categories)
	}
}
