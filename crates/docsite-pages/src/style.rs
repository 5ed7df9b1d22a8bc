//! Theme palettes and the inline stylesheet built from them.

use crate::theme::ThemePreference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutColors {
	pub background: &'static str,
	pub color: &'static str,
	pub border_radius: &'static str,
	pub make_better_background: &'static str,
	pub horizontal_rule_background: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopBarColors {
	pub background: &'static str,
	pub color: &'static str,
	pub border_bottom: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarColors {
	pub background: &'static str,
	pub color: &'static str,
	pub category_color: &'static str,
	pub link_hover: &'static str,
}

/// Colors handed to every visual part of the layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
	pub name: &'static str,
	pub layout: LayoutColors,
	pub top_bar: TopBarColors,
	pub sidebar: SidebarColors,
	pub loading_background: &'static str,
}

static LIGHT: Theme = Theme {
	name: "light",
	layout: LayoutColors {
		background: "#ffffff",
		color: "#333333",
		border_radius: "1rem",
		make_better_background: "#f4f4f4",
		horizontal_rule_background: "#f4f4f4",
	},
	top_bar: TopBarColors {
		background: "#ffffff",
		color: "#333333",
		border_bottom: "#eeeeee",
	},
	sidebar: SidebarColors {
		background: "#f9f9f9",
		color: "#333333",
		category_color: "#999999",
		link_hover: "#000000",
	},
	loading_background: "#ffffff",
};

static DARK: Theme = Theme {
	name: "dark",
	layout: LayoutColors {
		background: "#1e1e1e",
		color: "#d4d4d4",
		border_radius: "1rem",
		make_better_background: "#2b2b2b",
		horizontal_rule_background: "#2b2b2b",
	},
	top_bar: TopBarColors {
		background: "#161616",
		color: "#d4d4d4",
		border_bottom: "#2b2b2b",
	},
	sidebar: SidebarColors {
		background: "#161616",
		color: "#d4d4d4",
		category_color: "#777777",
		link_hover: "#ffffff",
	},
	loading_background: "#1e1e1e",
};

impl Theme {
	pub fn light() -> &'static Theme {
		&LIGHT
	}

	pub fn dark() -> &'static Theme {
		&DARK
	}

	pub fn for_preference(preference: ThemePreference) -> &'static Theme {
		match preference {
			ThemePreference::Light => Self::light(),
			ThemePreference::Dark => Self::dark(),
		}
	}

	/// Stylesheet for the full layout.
	pub fn stylesheet(&self) -> String {
		format!(
			r#"html, body {{ margin: 0; padding: 0; height: 100%; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; }}
.container {{ background: {bg}; color: {fg}; width: 100%; min-width: 375px; transition-duration: 0.25s; transition-property: background; }}
.top-bar {{ background: {top_bg}; color: {top_fg}; border-bottom: 1px solid {top_border}; display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; }}
.top-bar a {{ color: inherit; text-decoration: none; }}
.sidebar {{ background: {side_bg}; color: {side_fg}; position: fixed; top: 0; left: 0; bottom: 0; width: 420px; overflow-y: auto; z-index: 50; box-sizing: border-box; padding: 2rem; }}
.sidebar.closed {{ display: none; }}
.sidebar a {{ color: inherit; text-decoration: none; }}
.sidebar a:hover {{ color: {side_hover}; }}
.sidebar .category {{ color: {side_category}; font-size: .8rem; text-transform: uppercase; letter-spacing: .1rem; margin-top: 2rem; }}
.main {{ display: flex; justify-content: center; height: 100%; transition-duration: 0.25s; transition-property: padding; }}
.main.desktop {{ padding-left: 420px; }}
.main.mobile {{ padding-left: 0; }}
.inner {{ max-width: 800px; width: 100%; padding: 2rem; box-sizing: border-box; }}
.breadcrumbs {{ list-style: none; padding: 0; display: flex; gap: .5rem; font-size: .8rem; }}
.breadcrumbs li + li:before {{ content: "/"; padding-right: .5rem; }}
.horizontal-rule {{ background: {hr}; height: .25rem; width: 100%; margin-top: 4rem; margin-bottom: 4rem; }}
.make-better {{ background-color: {better}; border-radius: {radius}; padding: 2rem; }}
.make-better h2 {{ font-weight: bold; font-size: 1.5rem; margin-bottom: 1.5rem; }}
.copyright {{ padding: 6rem 0 4rem 0; font-size: .7rem; text-transform: uppercase; letter-spacing: .1rem; text-align: center; }}
.sidebar-toggle {{ display: block; position: fixed; bottom: 2rem; right: 2rem; background: #000000; border-radius: 50%; height: 65px; width: 65px; box-shadow: 0 0 20px rgba(0, 0, 0, 0.35); z-index: 100; overflow: hidden; }}
.sidebar-toggle:before, .sidebar-toggle:after, .sidebar-toggle .middle-bar {{ content: ""; background: #ffffff; clip-path: polygon(100% 35%,100% 60%,0% 60%,0% 35%); position: absolute; height: 15px; width: 25px; left: 20px; transition-duration: .25s; }}
.sidebar-toggle:before {{ top: 17px; }}
.sidebar-toggle:after {{ top: 35px; }}
.sidebar-toggle .middle-bar {{ top: 26px; }}
.sidebar-toggle.open:before {{ top: 25px; transform: rotate(-45deg); }}
.sidebar-toggle.open:after {{ top: 25px; transform: rotate(45deg); }}
.sidebar-toggle.open .middle-bar {{ left: 50px; opacity: 0; }}
"#,
			bg = self.layout.background,
			fg = self.layout.color,
			top_bg = self.top_bar.background,
			top_fg = self.top_bar.color,
			top_border = self.top_bar.border_bottom,
			side_bg = self.sidebar.background,
			side_fg = self.sidebar.color,
			side_hover = self.sidebar.link_hover,
			side_category = self.sidebar.category_color,
			hr = self.layout.horizontal_rule_background,
			better = self.layout.make_better_background,
			radius = self.layout.border_radius,
		)
	}

	/// Stylesheet for the loading screen.
	pub fn loading_stylesheet(&self) -> String {
		format!(
			"html, body {{ margin: 0; height: 100%; }}\n.loading-screen {{ background: {}; height: 100%; width: 100%; }}\n",
			self.loading_background
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(ThemePreference::Light, "light")]
	#[case(ThemePreference::Dark, "dark")]
	fn test_for_preference(#[case] preference: ThemePreference, #[case] name: &str) {
		assert_eq!(Theme::for_preference(preference).name, name);
	}

	#[rstest]
	fn test_stylesheet_uses_palette() {
		let css = Theme::dark().stylesheet();
		assert!(css.contains(".container { background: #1e1e1e; color: #d4d4d4;"));
		assert!(css.contains(".main.desktop { padding-left: 420px; }"));
		assert!(!css.contains("{bg}"));
	}

	#[rstest]
	fn test_loading_stylesheet() {
		assert!(Theme::light().loading_stylesheet().contains("background: #ffffff"));
	}
}
