//! Cookie-backed preference storage.
//!
//! On the server the dark-mode flag travels in a cookie named after the same
//! storage key the browser uses. Writes are collected and sent back as
//! `Set-Cookie` headers.

use docsite_http::{Request, Response};
use docsite_pages::PreferenceStore;

/// One year.
const COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

/// Preferences read from request cookies
///
/// Only keys listed at construction are read from the request.
#[derive(Debug, Clone, Default)]
pub struct CookieStore {
	values: Vec<(String, String)>,
	written: Vec<String>,
}

impl CookieStore {
	pub fn from_request(request: &Request, keys: &[&str]) -> Self {
		let values = keys
			.iter()
			.filter_map(|key| {
				request
					.cookie(key)
					.map(|value| (key.to_string(), value.to_string()))
			})
			.collect();
		Self {
			values,
			written: Vec::new(),
		}
	}

	/// Keys written since construction, in first-write order.
	pub fn written_keys(&self) -> &[String] {
		&self.written
	}

	/// Adds a `Set-Cookie` header for every written key.
	pub fn apply(&self, mut response: Response) -> Response {
		for key in &self.written {
			if let Some(value) = self.get(key) {
				response = response.with_cookie(&format!(
					"{}={}; Path=/; Max-Age={}; SameSite=Lax",
					key, value, COOKIE_MAX_AGE
				));
			}
		}
		response
	}
}

impl PreferenceStore for CookieStore {
	fn get(&self, key: &str) -> Option<String> {
		self.values
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.clone())
	}

	fn set(&mut self, key: &str, value: &str) {
		match self.values.iter_mut().find(|(k, _)| k == key) {
			Some((_, v)) => *v = value.to_string(),
			None => self.values.push((key.to_string(), value.to_string())),
		}
		if !self.written.iter().any(|k| k == key) {
			self.written.push(key.to_string());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use hyper::header::SET_COOKIE;
	use rstest::rstest;

	const KEY: &str = "drash_land_dark_mode";

	fn request(cookie: Option<&str>) -> Request {
		let mut builder = Request::builder().uri("/");
		if let Some(cookie) = cookie {
			builder = builder.header("cookie", cookie);
		}
		builder.build().unwrap()
	}

	#[rstest]
	fn test_reads_listed_keys_only() {
		let store = CookieStore::from_request(&request(Some("other=1; drash_land_dark_mode=true")), &[KEY]);
		assert_eq!(store.get(KEY).as_deref(), Some("true"));
		assert_eq!(store.get("other"), None);
	}

	#[rstest]
	fn test_untouched_store_sets_no_cookie() {
		let store = CookieStore::from_request(&request(Some("drash_land_dark_mode=false")), &[KEY]);
		let response = store.apply(Response::ok());
		assert!(response.headers.get(SET_COOKIE).is_none());
	}

	#[rstest]
	fn test_written_value_is_sent_once() {
		let mut store = CookieStore::from_request(&request(None), &[KEY]);
		store.set(KEY, "false");
		store.set(KEY, "true");

		let response = store.apply(Response::ok());
		let cookies: Vec<_> = response.headers.get_all(SET_COOKIE).iter().collect();
		assert_eq!(cookies.len(), 1);
		assert_eq!(
			cookies[0].to_str().unwrap(),
			"drash_land_dark_mode=true; Path=/; Max-Age=31536000; SameSite=Lax"
		);
		assert_eq!(store.written_keys(), [KEY.to_string()]);
	}
}
