//! Middleware wrapped around [`DocsHandler`](crate::DocsHandler).

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use docsite_http::{Handler, Middleware, Request, Response, Result};
use hyper::header::{CONTENT_TYPE, HeaderValue, VARY};

/// Logs each request with its method, path, status and duration
pub struct LoggingMiddleware;

impl LoggingMiddleware {
	pub fn new() -> Self {
		Self
	}
}

impl Default for LoggingMiddleware {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Middleware for LoggingMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let start = Instant::now();
		let method = request.method.to_string();
		let path = request.path().to_string();

		let result = next.handle(request).await;
		let elapsed_ms = start.elapsed().as_millis() as u64;

		match &result {
			Ok(response) => {
				tracing::info!(
					%method,
					%path,
					status = response.status.as_u16(),
					elapsed_ms,
					"request handled"
				);
			}
			Err(err) if err.status_code() < 500 => {
				tracing::info!(%method, %path, status = err.status_code(), elapsed_ms, "{}", err);
			}
			Err(err) => {
				tracing::error!(%method, %path, elapsed_ms, error = %err, "request failed");
			}
		}

		result
	}
}

/// Client hints the layout reads its initial viewport width from.
pub const ACCEPT_CH: &str = "Sec-CH-Viewport-Width, Viewport-Width";

/// Asks browsers to send viewport width hints on later requests
///
/// Only HTML responses advertise the hints; they also get a `Vary` entry so
/// caches keep desktop and mobile renderings apart.
pub struct ClientHintsMiddleware;

impl ClientHintsMiddleware {
	pub fn new() -> Self {
		Self
	}
}

impl Default for ClientHintsMiddleware {
	fn default() -> Self {
		Self::new()
	}
}

fn is_html(response: &Response) -> bool {
	response
		.headers
		.get(CONTENT_TYPE)
		.and_then(|v| v.to_str().ok())
		.is_some_and(|v| v.starts_with("text/html"))
}

#[async_trait]
impl Middleware for ClientHintsMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let mut response = next.handle(request).await?;

		if is_html(&response) {
			response
				.headers
				.insert("accept-ch", HeaderValue::from_static(ACCEPT_CH));
			response
				.headers
				.append(VARY, HeaderValue::from_static(ACCEPT_CH));
		}

		Ok(response)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use docsite_http::{Error, MiddlewareChain};
	use hyper::StatusCode;
	use rstest::rstest;

	struct Fixed(fn() -> Result<Response>);

	#[async_trait]
	impl Handler for Fixed {
		async fn handle(&self, _request: Request) -> Result<Response> {
			(self.0)()
		}
	}

	fn request() -> Request {
		Request::builder().uri("/drash/v2.x").build().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_html_response_gets_client_hints() {
		let chain = MiddlewareChain::new(Arc::new(Fixed(|| Ok(Response::ok().with_html("<p>x</p>")))))
			.with_middleware(Arc::new(ClientHintsMiddleware::new()));

		let response = chain.handle(request()).await.unwrap();

		assert_eq!(response.headers.get("accept-ch").unwrap(), ACCEPT_CH);
		assert_eq!(response.headers.get(VARY).unwrap(), ACCEPT_CH);
	}

	#[rstest]
	#[tokio::test]
	async fn test_redirect_has_no_client_hints() {
		let chain = MiddlewareChain::new(Arc::new(Fixed(|| Ok(Response::temporary_redirect("/")))))
			.with_middleware(Arc::new(ClientHintsMiddleware::new()));

		let response = chain.handle(request()).await.unwrap();

		assert!(response.headers.get("accept-ch").is_none());
		assert_eq!(response.status, StatusCode::FOUND);
	}

	#[rstest]
	#[tokio::test]
	async fn test_logging_passes_result_through() {
		let chain = MiddlewareChain::new(Arc::new(Fixed(|| {
			Err(Error::NotFound("/nope".to_string()))
		})))
		.with_middleware(Arc::new(LoggingMiddleware::new()));

		let error = chain.handle(request()).await.unwrap_err();
		assert!(matches!(error, Error::NotFound(_)));
	}

	#[rstest]
	#[tokio::test]
	async fn test_logging_keeps_response() {
		let chain = MiddlewareChain::new(Arc::new(Fixed(|| Ok(Response::ok().with_text("ok")))))
			.with_middleware(Arc::new(LoggingMiddleware::new()));

		let response = chain.handle(request()).await.unwrap();
		assert_eq!(response.body_text(), "ok");
	}
}
