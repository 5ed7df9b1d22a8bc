//! Breadcrumbs derived from the current path.

/// Splits a path into display segments.
///
/// Anything after `#` is dropped, and so are the empty segments a leading or
/// trailing slash produces. Trailing and doubled slashes never yield an empty
/// crumb, so `/rhum/v2.x/` and `/rhum/v2.x` render the same trail.
///
/// # Examples
///
/// ```
/// use docsite_pages::breadcrumbs::breadcrumbs;
///
/// assert_eq!(breadcrumbs("/drash/v2.x/tutorials#section"), ["drash", "v2.x", "tutorials"]);
/// assert!(breadcrumbs("/").is_empty());
/// ```
pub fn breadcrumbs(path: &str) -> Vec<&str> {
	let path = path.split('#').next().unwrap_or_default();
	path.split('/').filter(|segment| !segment.is_empty()).collect()
}
