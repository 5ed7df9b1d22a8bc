//! The documentation request handler.

use std::sync::Arc;

use async_trait::async_trait;
use docsite_conf::Settings;
use docsite_core::Error;
use docsite_core::page::Page;
use docsite_http::{Handler, Request, Response, Result};
use docsite_pages::{
	LayoutConfig, LayoutController, LayoutProps, SIDEBAR_TOGGLE_QUERY, SsrRenderer,
	THEME_TOGGLE_PATH, ThemeController, home_content, render_layout,
};
use docsite_urls::{DocsRoute, RedirectKind, Resolution, Resolver};
use hyper::Uri;
use hyper::header::REFERER;

use crate::content::ContentSource;
use crate::preferences::CookieStore;

/// Client hints carrying the layout viewport width, most specific first.
pub const VIEWPORT_WIDTH_HINTS: [&str; 2] = ["sec-ch-viewport-width", "viewport-width"];

/// Serves documentation pages inside the responsive layout
///
/// Each request gets its own [`LayoutController`], fed from the theme cookie
/// and the viewport client hint.
pub struct DocsHandler {
	settings: Arc<Settings>,
	resolver: Resolver,
	content: Arc<dyn ContentSource>,
	renderer: SsrRenderer,
}

impl DocsHandler {
	pub fn new(settings: Arc<Settings>, content: Arc<dyn ContentSource>) -> Self {
		let resolver = Resolver::new(&settings);
		Self {
			settings,
			resolver,
			content,
			renderer: SsrRenderer::new(),
		}
	}

	pub fn with_renderer(mut self, renderer: SsrRenderer) -> Self {
		self.renderer = renderer;
		self
	}

	fn dark_mode_key(&self) -> &str {
		&self.settings.local_storage_keys.dark_mode
	}

	fn controller(&self, request: &Request) -> LayoutController<CookieStore> {
		let store = CookieStore::from_request(request, &[self.dark_mode_key()]);
		LayoutController::new(LayoutConfig::from(self.settings.as_ref()), store)
	}

	fn viewport_width(&self, request: &Request) -> u32 {
		VIEWPORT_WIDTH_HINTS
			.iter()
			.find_map(|hint| request.header(*hint).and_then(parse_width))
			.unwrap_or(self.settings.layout.default_viewport_width)
	}

	/// Toggles the theme cookie and sends the visitor back where they came from.
	fn toggle_theme(&self, request: &Request) -> Response {
		let store = CookieStore::from_request(request, &[self.dark_mode_key()]);
		let mut theme = ThemeController::new(store, self.dark_mode_key());
		theme.load();
		theme.toggle();

		let back = request
			.header(REFERER)
			.and_then(local_path)
			.unwrap_or_else(|| "/".to_string());
		theme.store().apply(Response::temporary_redirect(back))
	}

	fn render(&self, request: &Request, props: LayoutProps, content: Page) -> Response {
		let mut layout = self.controller(request);
		layout.mount(self.viewport_width(request));

		if request
			.uri
			.query()
			.is_some_and(|q| q.split('&').any(|pair| pair == SIDEBAR_TOGGLE_QUERY))
		{
			layout.toggle_sidebar();
		}
		if props.will_redirect.is_some() {
			layout.set_redirect_pending(true);
		}

		let state = layout.state();
		tracing::debug!(path = %props.page_uri, %state, "rendering layout");
		let view = render_layout(
			&self.settings,
			state,
			layout.theme_or_default(),
			&props,
			content,
		);
		let html = self.renderer.render_page(view);

		// The theme comes from the cookie, so shared caches must key on it.
		let response = Response::ok().with_html(html).with_header("vary", "Cookie");
		layout.into_store().apply(response)
	}

	async fn page(&self, request: &Request, route: DocsRoute) -> Result<Response> {
		let Some(page) = self.content.page(&route).await? else {
			return Err(Error::NotFound(route.path()));
		};
		let categories = self.content.sidebar(&route.module, &route.version).await?;

		let module = self.settings.module(&route.module);
		let props = LayoutProps::new(request.path())
			.with_module(route.module.as_str(), route.version.as_str())
			.with_versions(module.map(|m| m.versions.clone()).unwrap_or_default())
			.with_categories(categories)
			.with_edit_url(module.and_then(|m| m.edit_url(&route.version, &route.page)))
			.with_redirect(page.redirect);

		Ok(self.render(request, props, Page::trusted_html(page.html)))
	}
}

#[async_trait]
impl Handler for DocsHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		if request.path() == THEME_TOGGLE_PATH {
			return Ok(self.toggle_theme(&request));
		}

		match self.resolver.resolve(request.path()) {
			Resolution::Redirect(redirect) => Ok(match redirect.kind {
				RedirectKind::Permanent => Response::permanent_redirect(&redirect.destination),
				RedirectKind::Temporary => Response::temporary_redirect(&redirect.destination),
			}),
			Resolution::Home => {
				let props = LayoutProps::new(request.path());
				Ok(self.render(&request, props, home_content(&self.settings)))
			}
			Resolution::Page(route) => self.page(&request, route).await,
			Resolution::NotFound => Err(Error::NotFound(request.path().to_string())),
		}
	}
}

/// Parses a client-hint width such as `1280` or `1280.5`.
fn parse_width(value: &str) -> Option<u32> {
	let width: f64 = value.trim().parse().ok()?;
	(width.is_finite() && width >= 0.0).then(|| width.round() as u32)
}

/// The path and query of a referer, so redirects never leave the site.
fn local_path(referer: &str) -> Option<String> {
	let uri: Uri = referer.parse().ok()?;
	let path = uri.path();
	if !path.starts_with('/') || path.starts_with("//") || path == THEME_TOGGLE_PATH {
		return None;
	}
	Some(match uri.query() {
		Some(query) => format!("{}?{}", path, query),
		None => path.to_string(),
	})
}
