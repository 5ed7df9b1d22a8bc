//! # docsite-server
//!
//! Serves the documentation site over HTTP/1.1.
//!
//! [`DocsHandler`] resolves each path, loads the page from a
//! [`ContentSource`] and renders it inside the responsive layout. [`app`]
//! wraps it with the standard middleware, and [`HttpServer`] runs the accept
//! loop until a [`ShutdownCoordinator`] says stop.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use docsite_conf::SettingsLoader;
//! use docsite_server::{FsContentSource, HttpServer, ShutdownCoordinator, app};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let settings = Arc::new(SettingsLoader::new().load()?);
//! let handler = app(settings, Arc::new(FsContentSource::new("content")));
//! let coordinator = ShutdownCoordinator::new(Duration::from_secs(10));
//!
//! HttpServer::new(handler)
//!     .listen_with_shutdown("127.0.0.1:8000".parse()?, coordinator)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod content;
pub mod handler;
pub mod http;
pub mod middleware;
pub mod preferences;
pub mod shutdown;

use std::sync::Arc;

use docsite_conf::Settings;
use docsite_http::MiddlewareChain;

pub use content::{ContentError, ContentSource, FsContentSource, PageContent};
pub use handler::{DocsHandler, VIEWPORT_WIDTH_HINTS};
pub use http::{HttpServer, serve, serve_with_shutdown};
pub use middleware::{ACCEPT_CH, ClientHintsMiddleware, LoggingMiddleware};
pub use preferences::CookieStore;
pub use shutdown::{ShutdownCoordinator, shutdown_signal};

/// The documentation handler behind logging and client-hint middleware.
pub fn app(settings: Arc<Settings>, content: Arc<dyn ContentSource>) -> MiddlewareChain {
	MiddlewareChain::new(Arc::new(DocsHandler::new(settings, content)))
		.with_middleware(Arc::new(LoggingMiddleware::new()))
		.with_middleware(Arc::new(ClientHintsMiddleware::new()))
}
