//! Layout and loading views.

use docsite_conf::{ModuleSettings, Settings};
use docsite_core::page::{Head, IntoPage, Page, PageElement};

use crate::breadcrumbs::breadcrumbs;
use crate::controller::{LayoutState, ReadyLayout};
use crate::props::{LayoutProps, SidebarCategory};
use crate::style::Theme;
use crate::theme::ThemePreference;

/// Endpoint that flips the theme and sends the visitor back.
pub const THEME_TOGGLE_PATH: &str = "/_theme/toggle";

/// Query that asks the server to toggle the sidebar once after mount.
pub const SIDEBAR_TOGGLE_QUERY: &str = "sidebar=toggle";

/// Renders the layout around `content`, or the loading screen when the
/// layout is not ready.
///
/// `theme` paints the loading screen; ready layouts carry their own theme.
pub fn render_layout(
	settings: &Settings,
	state: LayoutState,
	theme: ThemePreference,
	props: &LayoutProps,
	content: Page,
) -> Page {
	match state {
		LayoutState::Ready(ready) => layout(settings, &ready, props, content),
		LayoutState::Initializing | LayoutState::Redirecting => {
			loading_screen(theme, props.will_redirect.as_deref())
		}
	}
}

/// Neutral screen shown while the layout is unresolved.
///
/// With a destination the screen also carries a `meta refresh` to it.
pub fn loading_screen(theme: ThemePreference, redirect_to: Option<&str>) -> Page {
	let palette = Theme::for_preference(theme);
	let mut head = Head::new()
		.title("Loading...")
		.style(palette.loading_stylesheet());
	if let Some(destination) = redirect_to {
		head = head.http_equiv("refresh", format!("0; url={}", destination));
	}

	PageElement::new("div")
		.class("loading-screen")
		.attr("data-theme", palette.name)
		.into_page()
		.with_head(head)
}

fn layout(settings: &Settings, ready: &ReadyLayout, props: &LayoutProps, content: Page) -> Page {
	let palette = Theme::for_preference(ready.theme);
	let crumbs = breadcrumbs(&props.page_uri);
	let title = if crumbs.is_empty() {
		"Documentation".to_string()
	} else {
		crumbs.join(" / ")
	};
	let module = props
		.module_name
		.as_deref()
		.and_then(|name| settings.module(name));

	let container = PageElement::new("div")
		.class("container")
		.attr("data-theme", palette.name)
		.child(ready.viewport.is_mobile().then(|| sidebar_toggle(props, ready.sidebar_open)))
		.child(top_bar(props, ready.theme))
		.child(sidebar(props, module, ready))
		.child(
			PageElement::new("div")
				.class(if ready.viewport.is_desktop() {
					"main desktop"
				} else {
					"main mobile"
				})
				.child(
					PageElement::new("div")
						.class("inner")
						.child(breadcrumb_list(&crumbs))
						.child(content)
						.child(PageElement::new("div").class("horizontal-rule"))
						.child(make_better(settings, props))
						.child(
							PageElement::new("div")
								.class("copyright")
								.child(settings.copyright.clone()),
						),
				),
		);

	container.into_page().with_head(
		Head::new()
			.title(title)
			.style(palette.stylesheet()),
	)
}

fn sidebar_toggle(props: &LayoutProps, open: bool) -> PageElement {
	// Without scripts the button is a link: open links to the plain page
	// (closed on load), closed links to the page with the toggle query.
	let href = if open {
		props.page_uri.clone()
	} else {
		format!("{}?{}", props.page_uri, SIDEBAR_TOGGLE_QUERY)
	};

	PageElement::new("a")
		.class(if open {
			"sidebar-toggle open"
		} else {
			"sidebar-toggle"
		})
		.attr("href", href)
		.attr("aria-label", if open { "Close menu" } else { "Open menu" })
		.child(PageElement::new("div").class("middle-bar"))
}

fn top_bar(props: &LayoutProps, theme: ThemePreference) -> PageElement {
	let home = match &props.module_name {
		Some(name) => PageElement::new("a")
			.class("module-name")
			.attr("href", format!("/{}", name))
			.child(name.clone()),
		None => PageElement::new("a").class("module-name").attr("href", "/").child("Home"),
	};

	PageElement::new("div")
		.class("top-bar")
		.child(home)
		.child(
			PageElement::new("a")
				.class("theme-toggle")
				.attr("href", THEME_TOGGLE_PATH)
				.attr("rel", "nofollow")
				.child(if theme.is_dark() {
					"Light mode"
				} else {
					"Dark mode"
				}),
		)
}

fn sidebar(props: &LayoutProps, module: Option<&ModuleSettings>, ready: &ReadyLayout) -> PageElement {
	let open = ready.viewport.is_desktop() || ready.sidebar_open;
	let mut nav = PageElement::new("nav").class(if open { "sidebar" } else { "sidebar closed" });

	let (Some(name), Some(version)) = (&props.module_name, &props.module_version) else {
		return nav;
	};

	nav = nav.child(PageElement::new("h2").child(name.clone()));

	if !props.module_versions.is_empty() {
		nav = nav.child(
			PageElement::new("ul").class("versions").children(
				props.module_versions.iter().map(|v| {
					PageElement::new("li").child(
						PageElement::new("a")
							.attr("href", format!("/{}/{}", name, v))
							.attr_opt("class", (v == version).then_some("current"))
							.child(v.clone()),
					)
				}),
			),
		);
	}

	nav = nav.children(
		props
			.sidebar_categories
			.iter()
			.map(|category| sidebar_category(category, name, version, &props.page_uri)),
	);

	if let Some(module) = module {
		let links = [
			("API Reference", module.doc_deno_land_url.as_deref()),
			("GitHub", module.github_url.as_deref()),
			("Roadmap", module.roadmap_url.as_deref()),
		];
		nav = nav.child(
			PageElement::new("ul").class("external-links").children(
				links.into_iter().filter_map(|(label, url)| {
					url.map(|url| {
						PageElement::new("li").child(
							PageElement::new("a")
								.attr("href", url.to_string())
								.attr("target", "_BLANK")
								.attr("rel", "noreferrer")
								.child(label),
						)
					})
				}),
			),
		);
	}

	nav
}

fn sidebar_category(
	category: &SidebarCategory,
	module: &str,
	version: &str,
	page_uri: &str,
) -> PageElement {
	PageElement::new("div")
		.child(
			PageElement::new("p")
				.class("category")
				.child(category.label.clone()),
		)
		.child(PageElement::new("ul").children(category.links.iter().map(|link| {
			let href = link.href(module, version);
			let active = href == page_uri;
			PageElement::new("li").child(
				PageElement::new("a")
					.attr_opt("class", active.then_some("active"))
					.attr("href", href)
					.child(link.label.clone()),
			)
		})))
}

fn breadcrumb_list(crumbs: &[&str]) -> PageElement {
	PageElement::new("ul")
		.class("breadcrumbs")
		.children(crumbs.iter().map(|c| PageElement::new("li").child(c.to_string())))
}

fn make_better(settings: &Settings, props: &LayoutProps) -> PageElement {
	let issue = PageElement::new("p")
		.child(
			"If you are having issues with this page (e.g., parts of this page are not \
			 loading, documentation does not make sense, etc.), please let us know by \
			 filing an issue ",
		)
		.child(
			PageElement::new("a")
				.attr("href", settings.github_create_issue_url(&props.page_uri))
				.attr("target", "_BLANK")
				.attr("rel", "noreferrer")
				.child("here"),
		)
		.child(
			". We want to make sure these documentation pages cater the best developer \
			 experience possible.",
		);

	let edit = props.edit_this_page_url.as_ref().map(|url| {
		PageElement::new("p")
			.child("Alternatively, you can ")
			.child(
				PageElement::new("a")
					.attr("href", url.clone())
					.attr("target", "_BLANK")
					.attr("rel", "noreferrer")
					.child("edit this page"),
			)
			.child(".")
	});

	PageElement::new("div")
		.class("make-better")
		.child(PageElement::new("h2").child("Help Improve This Page"))
		.child(issue)
		.child(edit)
}

/// Content of the site root: one link per configured module.
pub fn home_content(settings: &Settings) -> Page {
	PageElement::new("div")
		.class("home")
		.child(PageElement::new("h1").child("Documentation"))
		.child(PageElement::new("ul").class("modules").children(
			settings.modules.iter().map(|module| {
				PageElement::new("li").child(
					PageElement::new("a")
						.attr("href", format!("/{}", module.name))
						.child(module.name.clone()),
				)
			}),
		))
		.into_page()
}
