//! # docsite-pages
//!
//! The responsive layout of a documentation page.
//!
//! - [`viewport`]: desktop/mobile classification around a width breakpoint
//! - [`sidebar`]: sidebar visibility
//! - [`theme`]: the persisted light/dark preference
//! - [`breadcrumbs`]: display segments of the current path
//! - [`controller`]: ties the above into one [`LayoutState`]
//! - [`storage`] and [`listener`]: preference storage and resize events,
//!   with browser-backed versions on `wasm32`
//! - [`layout`], [`style`] and [`ssr`]: the views and the document renderer
//!
//! ## Example
//!
//! ```
//! use docsite_conf::Settings;
//! use docsite_core::page::Page;
//! use docsite_pages::{LayoutConfig, LayoutController, LayoutProps, SsrRenderer, render_layout};
//! use docsite_pages::storage::MemoryStore;
//!
//! let settings = Settings::bundled().unwrap();
//! let mut layout = LayoutController::new(LayoutConfig::from(&settings), MemoryStore::new());
//! let state = layout.mount(1280);
//!
//! let props = LayoutProps::new("/drash/v2.x/getting-started/introduction")
//!     .with_module("drash", "v2.x");
//! let view = render_layout(&settings, state, layout.theme_or_default(), &props, Page::empty());
//! let html = SsrRenderer::new().render_page(view);
//!
//! assert!(html.contains("main desktop"));
//! ```

pub mod breadcrumbs;
pub mod controller;
pub mod layout;
pub mod listener;
pub mod props;
pub mod sidebar;
pub mod ssr;
pub mod storage;
pub mod style;
pub mod theme;
pub mod viewport;

pub use breadcrumbs::breadcrumbs;
pub use controller::{LayoutConfig, LayoutController, LayoutState, ReadyLayout};
pub use layout::{
	SIDEBAR_TOGGLE_QUERY, THEME_TOGGLE_PATH, home_content, loading_screen, render_layout,
};
pub use props::{LayoutProps, SidebarCategory, SidebarFile, SidebarLink};
pub use ssr::{SsrOptions, SsrRenderer};
pub use storage::{MemoryStore, PreferenceStore};
pub use style::Theme;
pub use theme::{ThemeController, ThemePreference};
pub use viewport::{Viewport, ViewportClass};
