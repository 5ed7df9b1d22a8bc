//! The layout controller.
//!
//! Combines the viewport classifier, the sidebar, the theme and a pending
//! redirect flag into a single [`LayoutState`] that views render from. Every
//! transition happens synchronously inside a method call; there is no
//! background work.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::listener::{ResizeEvents, ResizeSubscription};
use crate::sidebar::Sidebar;
use crate::storage::PreferenceStore;
use crate::theme::{DEFAULT_DARK_MODE_KEY, ThemeController, ThemePreference};
use crate::viewport::{DEFAULT_BREAKPOINT, Viewport, ViewportClass};

/// Everything a view needs once the layout is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyLayout {
	pub viewport: ViewportClass,
	/// Always `true` on desktop.
	pub sidebar_open: bool,
	pub theme: ThemePreference,
}

/// What the layout should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
	/// Viewport or theme not known yet. Render the loading view.
	Initializing,
	Ready(ReadyLayout),
	/// A redirect is pending. Render the loading view.
	Redirecting,
}

impl LayoutState {
	pub fn is_ready(&self) -> bool {
		matches!(self, LayoutState::Ready(_))
	}

	pub fn ready(&self) -> Option<&ReadyLayout> {
		match self {
			LayoutState::Ready(ready) => Some(ready),
			_ => None,
		}
	}
}

impl fmt::Display for LayoutState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LayoutState::Initializing => f.write_str("initializing"),
			LayoutState::Redirecting => f.write_str("redirecting"),
			LayoutState::Ready(ready) => match (ready.viewport, ready.sidebar_open) {
				(ViewportClass::Desktop, _) => f.write_str("ready-desktop"),
				(ViewportClass::Mobile, true) => f.write_str("ready-mobile-open"),
				(ViewportClass::Mobile, false) => f.write_str("ready-mobile-closed"),
			},
		}
	}
}

/// Layout controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
	pub breakpoint: u32,
	pub dark_mode_key: String,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			breakpoint: DEFAULT_BREAKPOINT,
			dark_mode_key: DEFAULT_DARK_MODE_KEY.to_string(),
		}
	}
}

impl From<&docsite_conf::Settings> for LayoutConfig {
	fn from(settings: &docsite_conf::Settings) -> Self {
		Self {
			breakpoint: settings.layout.breakpoint,
			dark_mode_key: settings.local_storage_keys.dark_mode.clone(),
		}
	}
}

/// View-state controller for one page view
///
/// A fresh controller starts in [`LayoutState::Initializing`] and becomes
/// ready after [`LayoutController::mount`]. The remembered mobile width lives
/// here, so two controllers never share it.
///
/// # Examples
///
/// ```
/// use docsite_pages::controller::{LayoutConfig, LayoutController, LayoutState};
/// use docsite_pages::storage::MemoryStore;
/// use docsite_pages::viewport::ViewportClass;
///
/// let mut layout = LayoutController::new(LayoutConfig::default(), MemoryStore::new());
/// assert_eq!(layout.state(), LayoutState::Initializing);
///
/// layout.mount(1280);
/// let ready = *layout.state().ready().unwrap();
/// assert_eq!(ready.viewport, ViewportClass::Desktop);
/// assert!(ready.sidebar_open);
///
/// layout.on_resize(600);
/// assert!(!layout.state().ready().unwrap().sidebar_open);
/// ```
#[derive(Debug)]
pub struct LayoutController<S> {
	viewport: Viewport,
	sidebar: Sidebar,
	theme: ThemeController<S>,
	redirect_pending: bool,
}

impl<S: PreferenceStore> LayoutController<S> {
	pub fn new(config: LayoutConfig, store: S) -> Self {
		Self {
			viewport: Viewport::new(config.breakpoint),
			sidebar: Sidebar::new(),
			theme: ThemeController::new(store, config.dark_mode_key),
			redirect_pending: false,
		}
	}

	/// Loads the theme preference and classifies the initial width.
	pub fn mount(&mut self, width: u32) -> LayoutState {
		self.transition("mount", |this| {
			this.theme.load();
			this.observe(width);
		})
	}

	/// Handles a window resize.
	pub fn on_resize(&mut self, width: u32) -> LayoutState {
		self.transition("resize", |this| this.observe(width))
	}

	/// Flips the sidebar on mobile; forces it open on desktop.
	///
	/// Ignored until the viewport has been classified.
	pub fn toggle_sidebar(&mut self) -> LayoutState {
		self.transition("toggle_sidebar", |this| {
			if let Some(class) = this.viewport.class() {
				this.sidebar.toggle(class);
			}
		})
	}

	/// Flips and persists the theme.
	pub fn toggle_theme(&mut self) -> LayoutState {
		self.transition("toggle_theme", |this| {
			this.theme.toggle();
		})
	}

	/// Signals (or clears) a pending redirect.
	pub fn set_redirect_pending(&mut self, pending: bool) -> LayoutState {
		self.transition("redirect", |this| this.redirect_pending = pending)
	}

	pub fn state(&self) -> LayoutState {
		if self.redirect_pending {
			return LayoutState::Redirecting;
		}
		match (self.viewport.class(), self.theme.preference()) {
			(Some(viewport), Some(theme)) => LayoutState::Ready(ReadyLayout {
				viewport,
				sidebar_open: viewport.is_desktop() || self.sidebar.is_open(),
				theme,
			}),
			_ => LayoutState::Initializing,
		}
	}

	/// Theme to paint with, known or not. The loading view uses this.
	pub fn theme_or_default(&self) -> ThemePreference {
		self.theme.preference().unwrap_or_default()
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn store(&self) -> &S {
		self.theme.store()
	}

	pub fn into_store(self) -> S {
		self.theme.into_store()
	}

	fn observe(&mut self, width: u32) {
		let change = self.viewport.observe(width);
		self.sidebar.apply(change);
	}

	fn transition(&mut self, event: &'static str, apply: impl FnOnce(&mut Self)) -> LayoutState {
		let before = self.state();
		apply(self);
		let after = self.state();
		if before != after {
			tracing::debug!(event, from = %before, to = %after, "layout state changed");
		}
		after
	}
}

impl<S: PreferenceStore + 'static> LayoutController<S> {
	/// Drives a shared controller from resize events.
	///
	/// The subscription holds only a weak reference, so dropping the
	/// controller stops delivery even while the subscription is alive.
	///
	/// # Examples
	///
	/// ```
	/// use std::cell::RefCell;
	/// use std::rc::Rc;
	/// use docsite_pages::controller::{LayoutConfig, LayoutController};
	/// use docsite_pages::listener::ResizeEvents;
	/// use docsite_pages::storage::MemoryStore;
	///
	/// let events = ResizeEvents::new();
	/// let layout = Rc::new(RefCell::new(LayoutController::new(
	///     LayoutConfig::default(),
	///     MemoryStore::new(),
	/// )));
	/// layout.borrow_mut().mount(1280);
	///
	/// let subscription = LayoutController::listen(&layout, &events);
	/// events.emit(500);
	/// assert!(!layout.borrow().state().ready().unwrap().sidebar_open);
	/// drop(subscription);
	/// ```
	pub fn listen(this: &Rc<RefCell<Self>>, events: &ResizeEvents) -> ResizeSubscription {
		let weak = Rc::downgrade(this);
		events.subscribe(move |width| {
			if let Some(controller) = weak.upgrade() {
				controller.borrow_mut().on_resize(width);
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::MemoryStore;
	use rstest::{fixture, rstest};

	const KEY: &str = DEFAULT_DARK_MODE_KEY;

	#[fixture]
	fn layout() -> LayoutController<MemoryStore> {
		LayoutController::new(LayoutConfig::default(), MemoryStore::new())
	}

	fn ready(state: LayoutState) -> ReadyLayout {
		*state.ready().expect("layout should be ready")
	}

	#[rstest]
	fn test_initializing_until_mounted(layout: LayoutController<MemoryStore>) {
		assert_eq!(layout.state(), LayoutState::Initializing);
		assert_eq!(layout.theme_or_default(), ThemePreference::Light);
	}

	#[rstest]
	fn test_resize_before_mount_stays_initializing(mut layout: LayoutController<MemoryStore>) {
		assert_eq!(layout.on_resize(1200), LayoutState::Initializing);
	}

	#[rstest]
	fn test_mount_on_mobile_closes_sidebar(mut layout: LayoutController<MemoryStore>) {
		let state = layout.mount(375);
		assert_eq!(state.to_string(), "ready-mobile-closed");
		assert_eq!(ready(state).viewport, ViewportClass::Mobile);
	}

	#[rstest]
	fn test_mount_writes_theme_back(mut layout: LayoutController<MemoryStore>) {
		layout.mount(1280);
		assert_eq!(layout.store().get(KEY).as_deref(), Some("false"));
	}

	#[rstest]
	fn test_mount_reads_dark_theme() {
		let mut layout =
			LayoutController::new(LayoutConfig::default(), MemoryStore::with_entry(KEY, "true"));
		assert_eq!(ready(layout.mount(1280)).theme, ThemePreference::Dark);
	}

	#[rstest]
	fn test_scroll_on_mobile_keeps_sidebar_open(mut layout: LayoutController<MemoryStore>) {
		layout.mount(400);
		layout.toggle_sidebar();
		assert!(ready(layout.state()).sidebar_open);

		// Address bar hides: height changes, width does not.
		assert!(ready(layout.on_resize(400)).sidebar_open);

		// Rotating the phone changes the width.
		assert!(!ready(layout.on_resize(700)).sidebar_open);
	}

	#[rstest]
	fn test_desktop_forces_open(mut layout: LayoutController<MemoryStore>) {
		layout.mount(400);
		assert!(!ready(layout.state()).sidebar_open);
		assert_eq!(layout.on_resize(1000).to_string(), "ready-desktop");
		assert!(ready(layout.toggle_sidebar()).sidebar_open);
	}

	#[rstest]
	fn test_return_to_same_mobile_width_keeps_sidebar(mut layout: LayoutController<MemoryStore>) {
		layout.mount(400);
		layout.on_resize(1000);
		// Same width as the last mobile observation.
		assert!(ready(layout.on_resize(400)).sidebar_open);
		assert!(!ready(layout.on_resize(420)).sidebar_open);
	}

	#[rstest]
	fn test_redirect_overrides_ready(mut layout: LayoutController<MemoryStore>) {
		layout.mount(1280);
		assert_eq!(layout.set_redirect_pending(true), LayoutState::Redirecting);
		assert_eq!(layout.on_resize(500), LayoutState::Redirecting);
		assert_eq!(layout.set_redirect_pending(false).to_string(), "ready-mobile-closed");
	}

	#[rstest]
	fn test_redirect_before_mount(mut layout: LayoutController<MemoryStore>) {
		assert_eq!(layout.set_redirect_pending(true), LayoutState::Redirecting);
		layout.mount(1280);
		assert_eq!(layout.state(), LayoutState::Redirecting);
	}

	#[rstest]
	fn test_toggle_theme_twice(mut layout: LayoutController<MemoryStore>) {
		layout.mount(1280);
		assert_eq!(ready(layout.toggle_theme()).theme, ThemePreference::Dark);
		assert_eq!(layout.store().get(KEY).as_deref(), Some("true"));
		assert_eq!(ready(layout.toggle_theme()).theme, ThemePreference::Light);
		assert_eq!(layout.store().get(KEY).as_deref(), Some("false"));
	}

	#[rstest]
	fn test_config_from_settings() {
		let mut settings = docsite_conf::Settings::default();
		settings.layout.breakpoint = 700;
		settings.local_storage_keys.dark_mode = "dark".to_string();

		let mut layout = LayoutController::new(LayoutConfig::from(&settings), MemoryStore::new());
		assert_eq!(ready(layout.mount(800)).viewport, ViewportClass::Desktop);
		assert_eq!(layout.store().get("dark").as_deref(), Some("false"));
	}

	#[rstest]
	fn test_listen_stops_after_controller_dropped() {
		let events = ResizeEvents::new();
		let layout = Rc::new(RefCell::new(LayoutController::new(
			LayoutConfig::default(),
			MemoryStore::new(),
		)));
		layout.borrow_mut().mount(1280);

		let _subscription = LayoutController::listen(&layout, &events);
		events.emit(600);
		assert_eq!(layout.borrow().viewport().class(), Some(ViewportClass::Mobile));

		drop(layout);
		events.emit(1200);
	}

	#[rstest]
	fn test_listen_unsubscribes_on_drop() {
		let events = ResizeEvents::new();
		let layout = Rc::new(RefCell::new(LayoutController::new(
			LayoutConfig::default(),
			MemoryStore::new(),
		)));
		layout.borrow_mut().mount(1280);

		let subscription = LayoutController::listen(&layout, &events);
		assert_eq!(events.subscriber_count(), 1);
		drop(subscription);
		assert_eq!(events.subscriber_count(), 0);

		events.emit(400);
		assert_eq!(layout.borrow().viewport().class(), Some(ViewportClass::Desktop));
	}
}
