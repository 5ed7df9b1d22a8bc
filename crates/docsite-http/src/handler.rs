use async_trait::async_trait;
use std::sync::Arc;

use crate::{Request, Response, Result};

/// Handler trait for processing requests
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// Lets `Arc<dyn Handler>` be used wherever a Handler is expected
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Middleware trait for request/response processing
#[async_trait]
pub trait Middleware: Send + Sync {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;

	/// Whether this middleware runs for the given request.
	///
	/// Defaults to `true`.
	fn should_continue(&self, _request: &Request) -> bool {
		true
	}
}

/// Middleware chain wrapping a final handler
///
/// Middlewares run in the order they were added; the first one added is the
/// outermost.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use docsite_http::{Handler, MiddlewareChain, Request, Response};
///
/// struct Hello;
///
/// #[async_trait::async_trait]
/// impl Handler for Hello {
///     async fn handle(&self, _request: Request) -> docsite_http::Result<Response> {
///         Ok(Response::ok().with_text("hello"))
///     }
/// }
///
/// let chain = MiddlewareChain::new(Arc::new(Hello));
/// ```
pub struct MiddlewareChain {
	middlewares: Vec<Arc<dyn Middleware>>,
	handler: Arc<dyn Handler>,
}

impl MiddlewareChain {
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			middlewares: Vec::new(),
			handler,
		}
	}

	/// Adds a middleware using builder pattern
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	/// Adds a middleware to the chain
	pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
		self.middlewares.push(middleware);
	}
}

#[async_trait]
impl Handler for MiddlewareChain {
	async fn handle(&self, request: Request) -> Result<Response> {
		if self.middlewares.is_empty() {
			return self.handler.handle(request).await;
		}

		let mut current_handler = self.handler.clone();

		for middleware in self
			.middlewares
			.iter()
			.rev()
			.filter(|mw| mw.should_continue(&request))
		{
			current_handler = Arc::new(ComposedHandler {
				middleware: middleware.clone(),
				next: current_handler,
			});
		}

		current_handler.handle(request).await
	}
}

/// One middleware bound to the rest of the chain
struct ComposedHandler {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for ComposedHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.middleware.process(request, self.next.clone()).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::Mutex;

	struct EchoPath;

	#[async_trait]
	impl Handler for EchoPath {
		async fn handle(&self, request: Request) -> Result<Response> {
			Ok(Response::ok().with_text(request.path().to_string()))
		}
	}

	struct Recorder {
		name: &'static str,
		log: Arc<Mutex<Vec<&'static str>>>,
		only_prefix: Option<&'static str>,
	}

	#[async_trait]
	impl Middleware for Recorder {
		async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
			self.log.lock().unwrap().push(self.name);
			next.handle(request).await
		}

		fn should_continue(&self, request: &Request) -> bool {
			self.only_prefix
				.is_none_or(|prefix| request.path().starts_with(prefix))
		}
	}

	struct ShortCircuit;

	#[async_trait]
	impl Middleware for ShortCircuit {
		async fn process(&self, _request: Request, _next: Arc<dyn Handler>) -> Result<Response> {
			Ok(Response::temporary_redirect("/elsewhere").with_stop_chain(true))
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_middlewares_run_in_insertion_order() {
		let log = Arc::new(Mutex::new(Vec::new()));
		let chain = MiddlewareChain::new(Arc::new(EchoPath))
			.with_middleware(Arc::new(Recorder {
				name: "outer",
				log: log.clone(),
				only_prefix: None,
			}))
			.with_middleware(Arc::new(Recorder {
				name: "inner",
				log: log.clone(),
				only_prefix: None,
			}));

		let request = Request::builder().uri("/drash").build().unwrap();
		let response = chain.handle(request).await.unwrap();

		assert_eq!(response.body_text(), "/drash");
		assert_eq!(*log.lock().unwrap(), vec!["outer", "inner"]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_skipped_middleware_does_not_run() {
		let log = Arc::new(Mutex::new(Vec::new()));
		let chain = MiddlewareChain::new(Arc::new(EchoPath)).with_middleware(Arc::new(Recorder {
			name: "theme",
			log: log.clone(),
			only_prefix: Some("/_theme"),
		}));

		let request = Request::builder().uri("/drash").build().unwrap();
		chain.handle(request).await.unwrap();

		assert!(log.lock().unwrap().is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_middleware_can_answer_without_handler() {
		let chain = MiddlewareChain::new(Arc::new(EchoPath)).with_middleware(Arc::new(ShortCircuit));

		let request = Request::builder().uri("/drash").build().unwrap();
		let response = chain.handle(request).await.unwrap();

		assert_eq!(response.location(), Some("/elsewhere"));
		assert!(response.should_stop_chain());
	}
}
