//! `<head>` section declared by a page.

use super::util::html_escape;

/// A `<meta>` tag keyed either by `name` or by `http-equiv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaTag {
	Name { name: String, content: String },
	HttpEquiv { http_equiv: String, content: String },
}

impl MetaTag {
	/// Renders the tag to HTML.
	pub fn to_html(&self) -> String {
		match self {
			MetaTag::Name { name, content } => format!(
				"<meta name=\"{}\" content=\"{}\">\n",
				html_escape(name),
				html_escape(content)
			),
			MetaTag::HttpEquiv {
				http_equiv,
				content,
			} => format!(
				"<meta http-equiv=\"{}\" content=\"{}\">\n",
				html_escape(http_equiv),
				html_escape(content)
			),
		}
	}
}

/// Head metadata collected during SSR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Head {
	pub title: Option<String>,
	pub meta_tags: Vec<MetaTag>,
	/// Inline stylesheets, emitted as `<style>` blocks in order.
	pub styles: Vec<String>,
}

impl Head {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the document title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Adds a `<meta name=... content=...>` tag.
	pub fn meta(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
		self.meta_tags.push(MetaTag::Name {
			name: name.into(),
			content: content.into(),
		});
		self
	}

	/// Adds a `<meta http-equiv=... content=...>` tag.
	pub fn http_equiv(mut self, http_equiv: impl Into<String>, content: impl Into<String>) -> Self {
		self.meta_tags.push(MetaTag::HttpEquiv {
			http_equiv: http_equiv.into(),
			content: content.into(),
		});
		self
	}

	/// Adds an inline stylesheet.
	pub fn style(mut self, css: impl Into<String>) -> Self {
		self.styles.push(css.into());
		self
	}

	pub fn title_text(&self) -> Option<&str> {
		self.title.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_meta_tags_render() {
		let head = Head::new()
			.meta("description", "Docs & guides")
			.http_equiv("refresh", "0; url=/drash");

		assert_eq!(
			head.meta_tags[0].to_html(),
			"<meta name=\"description\" content=\"Docs &amp; guides\">\n"
		);
		assert_eq!(
			head.meta_tags[1].to_html(),
			"<meta http-equiv=\"refresh\" content=\"0; url=/drash\">\n"
		);
	}

	#[rstest]
	fn test_builder_accumulates_styles() {
		let head = Head::new().style("a{}").style("b{}");
		assert_eq!(head.styles, vec!["a{}".to_string(), "b{}".to_string()]);
		assert_eq!(head.title_text(), None);
	}
}
