use bytes::Bytes;
use hyper::header::{COOKIE, HeaderName};
use hyper::{HeaderMap, Method, Uri, Version};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::net::SocketAddr;

use crate::{Error, Result};

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub query_params: HashMap<String, String>,
	pub remote_addr: Option<SocketAddr>,
}

impl Request {
	/// Create a new request from its parts
	pub fn new(method: Method, uri: Uri, version: Version, headers: HeaderMap, body: Bytes) -> Self {
		let query_params = Self::parse_query_params(&uri);
		Self {
			method,
			uri,
			version,
			headers,
			body,
			query_params,
			remote_addr: None,
		}
	}

	/// Start building a request
	///
	/// # Examples
	///
	/// ```
	/// use docsite_http::Request;
	///
	/// let request = Request::builder()
	///     .uri("/drash/v2.x/getting-started/introduction")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.path(), "/drash/v2.x/getting-started/introduction");
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.map(|q| {
				q.split('&')
					.filter(|pair| !pair.is_empty())
					.filter_map(|pair| {
						let mut parts = pair.splitn(2, '=');
						let key = percent_decode_str(parts.next()?).decode_utf8_lossy();
						let value = percent_decode_str(parts.next().unwrap_or(""))
							.decode_utf8_lossy();
						Some((key.into_owned(), value.into_owned()))
					})
					.collect()
			})
			.unwrap_or_default()
	}

	/// Get the request path
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Get the path and query as sent by the client
	pub fn path_and_query(&self) -> &str {
		self.uri
			.path_and_query()
			.map(|pq| pq.as_str())
			.unwrap_or_else(|| self.uri.path())
	}

	/// Get a decoded query parameter
	pub fn query_param(&self, name: &str) -> Option<&str> {
		self.query_params.get(name).map(String::as_str)
	}

	/// Get a header value as a string, ignoring non-UTF-8 values
	pub fn header(&self, name: impl TryInto<HeaderName>) -> Option<&str> {
		let name = name.try_into().ok()?;
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	/// Get a cookie value by name
	///
	/// # Examples
	///
	/// ```
	/// use docsite_http::Request;
	///
	/// let request = Request::builder()
	///     .uri("/")
	///     .header("cookie", "a=1; drash_land_dark_mode=true")
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(request.cookie("drash_land_dark_mode"), Some("true"));
	/// assert_eq!(request.cookie("missing"), None);
	/// ```
	pub fn cookie(&self, cookie_name: &str) -> Option<&str> {
		self.headers
			.get_all(COOKIE)
			.iter()
			.filter_map(|h| h.to_str().ok())
			.flat_map(|h| h.split(';'))
			.filter_map(|cookie| {
				let mut parts = cookie.trim().splitn(2, '=');
				let name = parts.next()?.trim();
				let value = parts.next()?.trim();
				(!name.is_empty()).then_some((name, value))
			})
			.find_map(|(name, value)| (name == cookie_name).then_some(value))
	}
}

/// Builder for [`Request`], mostly used by tests and the server boundary
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: Option<String>,
	headers: Vec<(String, String)>,
	body: Bytes,
	remote_addr: Option<SocketAddr>,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn remote_addr(mut self, addr: SocketAddr) -> Self {
		self.remote_addr = Some(addr);
		self
	}

	pub fn build(self) -> Result<Request> {
		let uri: Uri = self
			.uri
			.as_deref()
			.unwrap_or("/")
			.parse()
			.map_err(|e| Error::BadRequest(format!("invalid uri: {e}")))?;

		let mut headers = HeaderMap::new();
		for (name, value) in self.headers {
			let name = HeaderName::from_bytes(name.as_bytes())
				.map_err(|e| Error::BadRequest(format!("invalid header name: {e}")))?;
			let value = value
				.parse()
				.map_err(|e| Error::BadRequest(format!("invalid header value: {e}")))?;
			headers.append(name, value);
		}

		let mut request = Request::new(
			self.method.unwrap_or(Method::GET),
			uri,
			Version::HTTP_11,
			headers,
			self.body,
		);
		request.remote_addr = self.remote_addr;
		Ok(request)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_query_params_are_decoded() {
		let request = Request::builder()
			.uri("/drash?sidebar=toggle&title=Hello%20World&flag")
			.build()
			.unwrap();

		assert_eq!(request.query_param("sidebar"), Some("toggle"));
		assert_eq!(request.query_param("title"), Some("Hello World"));
		assert_eq!(request.query_param("flag"), Some(""));
		assert_eq!(request.query_param("missing"), None);
	}

	#[rstest]
	fn test_path_and_query() {
		let request = Request::builder().uri("/a/b?c=d").build().unwrap();
		assert_eq!(request.path(), "/a/b");
		assert_eq!(request.path_and_query(), "/a/b?c=d");
	}

	#[rstest]
	fn test_cookie_across_multiple_headers() {
		let request = Request::builder()
			.header("cookie", "first=1")
			.header("cookie", "malformed; second=2")
			.build()
			.unwrap();

		assert_eq!(request.cookie("first"), Some("1"));
		assert_eq!(request.cookie("second"), Some("2"));
		assert_eq!(request.cookie("malformed"), None);
	}

	#[rstest]
	fn test_header_lookup() {
		let request = Request::builder()
			.header("Sec-CH-Viewport-Width", "412")
			.build()
			.unwrap();

		assert_eq!(request.header("sec-ch-viewport-width"), Some("412"));
		assert_eq!(request.header("viewport-width"), None);
	}

	#[rstest]
	fn test_invalid_uri_is_bad_request() {
		let result = Request::builder().uri("http://[::1").build();
		assert!(matches!(result, Err(Error::BadRequest(_))));
	}
}
