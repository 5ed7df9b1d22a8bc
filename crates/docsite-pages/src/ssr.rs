//! Server-side rendering of a page tree into a full HTML document.

use docsite_core::page::{Head, IntoPage, Page, html_escape};

/// Options for SSR rendering.
#[derive(Debug, Clone)]
pub struct SsrOptions {
	/// Language attribute for the `html` element.
	pub lang: String,
	/// Whether to collapse whitespace in the output.
	pub minify: bool,
}

impl Default for SsrOptions {
	fn default() -> Self {
		Self {
			lang: "en".to_string(),
			minify: false,
		}
	}
}

impl SsrOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the language.
	pub fn lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = lang.into();
		self
	}

	/// Enables minification.
	pub fn minify(mut self) -> Self {
		self.minify = true;
		self
	}
}

/// Renders page trees into complete documents
///
/// # Examples
///
/// ```
/// use docsite_core::page::{Head, IntoPage, PageElement};
/// use docsite_pages::ssr::SsrRenderer;
///
/// let view = PageElement::new("p")
///     .child("Hello")
///     .into_page()
///     .with_head(Head::new().title("Greeting"));
///
/// let html = SsrRenderer::new().render_page(view);
/// assert!(html.starts_with("<!DOCTYPE html>"));
/// assert!(html.contains("<title>Greeting</title>"));
/// assert!(html.contains("<div id=\"app\"><p>Hello</p></div>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SsrRenderer {
	options: SsrOptions,
}

impl SsrRenderer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_options(options: SsrOptions) -> Self {
		Self { options }
	}

	/// Renders a view to an HTML fragment.
	pub fn render_view(&self, view: &Page) -> String {
		view.render_to_string()
	}

	/// Renders a view to a full document, using the view's topmost head.
	pub fn render_page(&self, view: impl IntoPage) -> String {
		let view = view.into_page();
		let content = self.render_view(&view);
		self.wrap_in_html_with_head(&content, view.find_topmost_head())
	}

	fn wrap_in_html_with_head(&self, content: &str, head: Option<&Head>) -> String {
		let mut html = String::with_capacity(content.len() + 1024);

		html.push_str("<!DOCTYPE html>\n");
		html.push_str(&format!("<html lang=\"{}\">\n", html_escape(&self.options.lang)));

		html.push_str("<head>\n");
		html.push_str("<meta charset=\"UTF-8\">\n");
		html.push_str(
			"<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
		);

		if let Some(head) = head {
			if let Some(title) = head.title_text() {
				html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
			}
			for meta in &head.meta_tags {
				html.push_str(&meta.to_html());
			}
			for style in &head.styles {
				html.push_str("<style>\n");
				// A stylesheet must not be able to close its own tag.
				html.push_str(&style.replace("</", "<\\/"));
				html.push_str("</style>\n");
			}
		}

		html.push_str("</head>\n");
		html.push_str("<body>\n");
		html.push_str("<div id=\"app\">");
		html.push_str(content);
		html.push_str("</div>\n");
		html.push_str("</body>\n");
		html.push_str("</html>");

		if self.options.minify {
			minify_html(&html)
		} else {
			html
		}
	}
}

/// Collapses runs of whitespace outside `<pre>` blocks.
fn minify_html(html: &str) -> String {
	let mut result = String::with_capacity(html.len());
	let mut prev_was_whitespace = false;
	let mut in_pre = false;
	let mut chars = html.char_indices().peekable();

	while let Some((byte_pos, c)) = chars.next() {
		let remaining = &html[byte_pos..];

		if !in_pre
			&& c == '<'
			&& remaining.strip_prefix("<pre").is_some_and(|after| {
				after.starts_with(|ch: char| ch == '>' || ch.is_ascii_whitespace())
			}) {
			in_pre = true;
		}

		if in_pre && c == '<' && remaining.starts_with("</pre>") {
			result.push_str("</pre>");
			for _ in 0..5 {
				chars.next();
			}
			in_pre = false;
			prev_was_whitespace = false;
			continue;
		}

		if in_pre {
			result.push(c);
		} else if c.is_whitespace() {
			if !prev_was_whitespace {
				result.push(' ');
				prev_was_whitespace = true;
			}
		} else {
			result.push(c);
			prev_was_whitespace = false;
		}
	}

	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use docsite_core::page::PageElement;
	use rstest::rstest;

	#[rstest]
	fn test_document_without_head() {
		let html = SsrRenderer::new().render_page(PageElement::new("main"));
		assert!(html.contains("<html lang=\"en\">"));
		assert!(html.contains("<meta charset=\"UTF-8\">"));
		assert!(!html.contains("<title>"));
		assert!(html.ends_with("</html>"));
	}

	#[rstest]
	fn test_head_parts_are_emitted() {
		let view = Page::empty().with_head(
			Head::new()
				.title("A <b> title")
				.http_equiv("refresh", "0; url=/next")
				.style("body { color: red; }"),
		);
		let html = SsrRenderer::new().render_page(view);

		assert!(html.contains("<title>A &lt;b&gt; title</title>"));
		assert!(html.contains("<meta http-equiv=\"refresh\" content=\"0; url=/next\">"));
		assert!(html.contains("<style>\nbody { color: red; }</style>"));
	}

	#[rstest]
	fn test_style_cannot_close_itself() {
		let view = Page::empty().with_head(Head::new().style("</style><script>"));
		let html = SsrRenderer::new().render_page(view);
		assert!(!html.contains("</style><script>"));
	}

	#[rstest]
	fn test_lang_option() {
		let html = SsrRenderer::with_options(SsrOptions::new().lang("de")).render_page(Page::empty());
		assert!(html.contains("<html lang=\"de\">"));
	}

	#[rstest]
	fn test_minify_preserves_pre() {
		let view = Page::trusted_html("<p>a   b</p><pre>x\n   y</pre>");
		let html = SsrRenderer::with_options(SsrOptions::new().minify()).render_page(view);
		assert!(html.contains("<p>a b</p>"));
		assert!(html.contains("<pre>x\n   y</pre>"));
		assert!(html.starts_with("<!DOCTYPE html> <html"));
	}
}
