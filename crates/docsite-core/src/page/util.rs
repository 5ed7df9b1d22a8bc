//! Utility functions for page rendering.

use std::borrow::Cow;

/// Escapes HTML special characters in a string.
///
/// Returns a borrowed reference if no escaping is needed.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// HTML boolean attributes that are only set when the value is truthy.
pub const BOOLEAN_ATTRS: &[&str] = &[
	"async", "autofocus", "checked", "defer", "disabled", "hidden", "open", "readonly",
	"required", "selected",
];

/// Returns `true` if the value is non-empty and not "false" or "0".
pub fn is_boolean_attr_truthy(value: &str) -> bool {
	!value.is_empty() && value != "false" && value != "0"
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_html_escape_no_special_chars() {
		assert_eq!(html_escape("Hello World"), Cow::Borrowed("Hello World"));
	}

	#[rstest]
	#[case("a & b", "a &amp; b")]
	#[case("<div>", "&lt;div&gt;")]
	#[case("\"test\" 'value'", "&quot;test&quot; &#x27;value&#x27;")]
	fn test_html_escape_special_chars(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(html_escape(input), Cow::<str>::Owned(expected.to_string()));
	}

	#[rstest]
	fn test_is_boolean_attr_truthy() {
		assert!(is_boolean_attr_truthy("true"));
		assert!(is_boolean_attr_truthy("hidden"));

		assert!(!is_boolean_attr_truthy(""));
		assert!(!is_boolean_attr_truthy("false"));
		assert!(!is_boolean_attr_truthy("0"));
	}
}
