//! # docsite
//!
//! A documentation website for a family of versioned modules, served with a
//! responsive, server-side rendered layout.
//!
//! Each member crate is re-exported under a short name:
//!
//! - [`core`]: error taxonomy and the renderable page tree
//! - [`http`]: request/response types, handlers and middleware
//! - [`conf`]: site settings, loading and validation
//! - [`urls`]: redirect table and documentation route resolution
//! - [`pages`]: layout controller, themes and page views
//! - [`server`]: HTTP server, content loading and the docs handler
//!   (feature `server`, enabled by default)
//!
//! ## Feature Flags
//!
//! - `server` (default) - hyper-based HTTP server; not available on wasm32
//!
//! ## Quick Example
//!
//! ```
//! use docsite::prelude::*;
//!
//! let settings = SettingsLoader::new().with_env(false).load().unwrap();
//! let resolver = Resolver::new(&settings);
//!
//! match resolver.resolve("/drash") {
//!     Resolution::Redirect(redirect) => {
//!         assert_eq!(redirect.destination, "/drash/v2.x/getting-started/introduction");
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub use docsite_conf as conf;
pub use docsite_core as core;
pub use docsite_http as http;
pub use docsite_pages as pages;
#[cfg(all(feature = "server", not(target_arch = "wasm32")))]
pub use docsite_server as server;
pub use docsite_urls as urls;

pub use docsite_core::{Error, Result};

/// Commonly used types
pub mod prelude {
	pub use docsite_conf::{Settings, SettingsLoader};
	pub use docsite_core::page::{IntoPage, Page, PageElement};
	pub use docsite_http::{Handler, Middleware, MiddlewareChain, Request, Response};
	pub use docsite_pages::{
		LayoutController, LayoutState, PreferenceStore, SsrRenderer, ThemePreference,
		ViewportClass,
	};
	pub use docsite_urls::{Redirect, RedirectKind, Resolution, Resolver};

	#[cfg(all(feature = "server", not(target_arch = "wasm32")))]
	pub use docsite_server::{DocsHandler, HttpServer, ShutdownCoordinator, app};
}
