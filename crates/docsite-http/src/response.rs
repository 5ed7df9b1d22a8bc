use bytes::Bytes;
use docsite_core::page::html_escape;
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue, LOCATION, SET_COOKIE};
use hyper::{HeaderMap, StatusCode};

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// When true, no further middleware runs after the one that produced this response
	stop_chain: bool,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use docsite_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
			stop_chain: false,
		}
	}

	/// Create a Response with HTTP 200 OK status
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Create a Response with HTTP 404 Not Found status
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// Create a Response with HTTP 500 Internal Server Error status
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Create a Response with HTTP 301 Moved Permanently
	///
	/// # Examples
	///
	/// ```
	/// use docsite_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::permanent_redirect("/drash/v2.x/tutorials/services/basics");
	/// assert_eq!(response.status, StatusCode::MOVED_PERMANENTLY);
	/// assert_eq!(
	///     response.headers.get("location").unwrap().to_str().unwrap(),
	///     "/drash/v2.x/tutorials/services/basics"
	/// );
	/// ```
	pub fn permanent_redirect(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::MOVED_PERMANENTLY).with_location(location.as_ref())
	}

	/// Create a Response with HTTP 302 Found (temporary redirect)
	///
	/// # Examples
	///
	/// ```
	/// use docsite_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::temporary_redirect("/drash/v2.x/getting-started/introduction");
	/// assert_eq!(response.status, StatusCode::FOUND);
	/// ```
	pub fn temporary_redirect(location: impl AsRef<str>) -> Self {
		Self::new(StatusCode::FOUND).with_location(location.as_ref())
	}

	/// Set the response body
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Set an HTML body with the matching Content-Type
	pub fn with_html(mut self, html: impl Into<String>) -> Self {
		self.headers.insert(
			CONTENT_TYPE,
			HeaderValue::from_static("text/html; charset=utf-8"),
		);
		self.body = Bytes::from(html.into());
		self
	}

	/// Set a plain text body with the matching Content-Type
	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.headers.insert(
			CONTENT_TYPE,
			HeaderValue::from_static("text/plain; charset=utf-8"),
		);
		self.body = Bytes::from(text.into());
		self
	}

	/// Add a custom header to the response, replacing an existing value
	///
	/// Invalid names or values are ignored.
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}

	/// Append a `Set-Cookie` header without replacing earlier cookies
	pub fn with_cookie(mut self, cookie: &str) -> Self {
		if let Ok(value) = HeaderValue::from_str(cookie) {
			self.headers.append(SET_COOKIE, value);
		}
		self
	}

	/// Add a Location header to the response
	pub fn with_location(mut self, location: &str) -> Self {
		if let Ok(value) = HeaderValue::from_str(location) {
			self.headers.insert(LOCATION, value);
		}
		self
	}

	/// The Location header, if any
	pub fn location(&self) -> Option<&str> {
		self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
	}

	/// Body as UTF-8 text (lossy)
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	pub fn should_stop_chain(&self) -> bool {
		self.stop_chain
	}

	pub fn with_stop_chain(mut self, stop: bool) -> Self {
		self.stop_chain = stop;
		self
	}
}

impl From<crate::Error> for Response {
	fn from(error: crate::Error) -> Self {
		let status =
			StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		let title = status.canonical_reason().unwrap_or("Error");
		// Internal details stay in the logs
		let message = if status.is_server_error() {
			"An error occurred while processing your request.".to_string()
		} else {
			error.to_string()
		};

		let html = format!(
			"<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"UTF-8\"><title>{code} {title}</title></head>\n<body><h1>{code} {title}</h1><p>{message}</p></body>\n</html>",
			code = status.as_u16(),
			title = title,
			message = html_escape(&message),
		);

		Response::new(status).with_html(html)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;
	use rstest::rstest;

	#[rstest]
	fn test_cookies_are_appended() {
		let response = Response::ok()
			.with_cookie("a=1; Path=/")
			.with_cookie("b=2; Path=/");

		let cookies: Vec<_> = response
			.headers
			.get_all(SET_COOKIE)
			.iter()
			.map(|v| v.to_str().unwrap().to_string())
			.collect();
		assert_eq!(cookies, vec!["a=1; Path=/", "b=2; Path=/"]);
	}

	#[rstest]
	fn test_with_html_sets_content_type() {
		let response = Response::ok().with_html("<p>hi</p>");
		assert_eq!(
			response.headers.get(CONTENT_TYPE).unwrap(),
			"text/html; charset=utf-8"
		);
		assert_eq!(response.body_text(), "<p>hi</p>");
	}

	#[rstest]
	fn test_invalid_header_is_ignored() {
		let response = Response::ok().with_header("bad header", "value");
		assert!(response.headers.is_empty());
	}

	#[rstest]
	fn test_not_found_error_page_escapes_path() {
		let response: Response = Error::NotFound("/<script>".to_string()).into();

		assert_eq!(response.status, StatusCode::NOT_FOUND);
		let body = response.body_text();
		assert!(body.contains("404 Not Found"));
		assert!(body.contains("&lt;script&gt;"));
	}

	#[rstest]
	fn test_server_error_hides_details() {
		let response: Response = Error::Internal("db password leaked".to_string()).into();

		assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
		assert!(!response.body_text().contains("password"));
	}

	#[rstest]
	fn test_redirect_location() {
		assert_eq!(
			Response::temporary_redirect("/drash").location(),
			Some("/drash")
		);
		assert_eq!(Response::ok().location(), None);
	}
}
