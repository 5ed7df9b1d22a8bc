//! HTTP/1.1 server loop.

use bytes::Bytes;
use docsite_http::{Handler, Middleware, MiddlewareChain, Request, Response};
use http_body_util::{BodyExt, Full, Limited};
use hyper::StatusCode;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

use crate::shutdown::ShutdownCoordinator;

/// Documentation pages are all GETs; anything larger than this is refused.
const MAX_BODY_SIZE: usize = 64 * 1024;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP/1.1 server with optional middleware
pub struct HttpServer {
	handler: Arc<dyn Handler>,
	middlewares: Vec<Arc<dyn Middleware>>,
}

impl HttpServer {
	/// Create a new server with the given handler
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use docsite_http::{Handler, Request, Response};
	/// use docsite_server::{HttpServer, LoggingMiddleware};
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
	/// let server = HttpServer::new(Hello).with_middleware(LoggingMiddleware::new());
	/// ```
	pub fn new<H: Handler + 'static>(handler: H) -> Self {
		Self {
			handler: Arc::new(handler),
			middlewares: Vec::new(),
		}
	}

	/// Add a middleware; the first one added runs outermost
	pub fn with_middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
		self.middlewares.push(Arc::new(middleware));
		self
	}

	fn build_handler(&self) -> Arc<dyn Handler> {
		if self.middlewares.is_empty() {
			return self.handler.clone();
		}

		let chain = self
			.middlewares
			.iter()
			.cloned()
			.fold(MiddlewareChain::new(self.handler.clone()), |chain, mw| {
				chain.with_middleware(mw)
			});
		Arc::new(chain)
	}

	/// Bind `addr` and serve until the process ends
	pub async fn listen(self, addr: SocketAddr) -> Result<(), BoxError> {
		let listener = TcpListener::bind(addr).await?;
		tracing::info!(%addr, "listening on http://{}", addr);

		let handler = self.build_handler();
		loop {
			let (stream, peer) = listener.accept().await?;
			let handler = handler.clone();

			tokio::task::spawn(async move {
				if let Err(err) = Self::handle_connection(stream, peer, handler).await {
					tracing::warn!(%peer, "error serving connection: {}", err);
				}
			});
		}
	}

	/// Bind `addr` and serve until `coordinator` signals shutdown
	pub async fn listen_with_shutdown(
		self,
		addr: SocketAddr,
		coordinator: ShutdownCoordinator,
	) -> Result<(), BoxError> {
		let listener = TcpListener::bind(addr).await?;
		self.serve_listener(listener, coordinator).await
	}

	/// Serve an already bound listener until `coordinator` signals shutdown
	///
	/// Connections still open when the signal arrives are dropped.
	pub async fn serve_listener(
		self,
		listener: TcpListener,
		coordinator: ShutdownCoordinator,
	) -> Result<(), BoxError> {
		let local = listener.local_addr()?;
		tracing::info!(addr = %local, "listening on http://{}", local);

		let handler = self.build_handler();
		let mut shutdown_rx = coordinator.subscribe();

		loop {
			tokio::select! {
				result = listener.accept() => {
					let (stream, peer) = result?;
					let handler = handler.clone();
					let mut conn_shutdown = coordinator.subscribe();

					tokio::task::spawn(async move {
						tokio::select! {
							result = Self::handle_connection(stream, peer, handler) => {
								if let Err(err) = result {
									tracing::warn!(%peer, "error serving connection: {}", err);
								}
							}
							_ = conn_shutdown.recv() => {
								tracing::debug!(%peer, "connection closed by shutdown");
							}
						}
					});
				}
				_ = shutdown_rx.recv() => {
					tracing::info!("shutdown signal received, no longer accepting connections");
					break;
				}
			}
		}

		coordinator.notify_shutdown_complete();
		Ok(())
	}

	/// Serve HTTP/1.1 requests on one accepted connection
	pub async fn handle_connection(
		stream: TcpStream,
		peer: SocketAddr,
		handler: Arc<dyn Handler>,
	) -> Result<(), BoxError> {
		let io = TokioIo::new(stream);
		let service = RequestService { handler, peer };

		http1::Builder::new().serve_connection(io, service).await?;
		Ok(())
	}
}

struct RequestService {
	handler: Arc<dyn Handler>,
	peer: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = BoxError;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = self.handler.clone();
		let peer = self.peer;

		Box::pin(async move {
			let (parts, body) = req.into_parts();

			let body = match Limited::new(body, MAX_BODY_SIZE).collect().await {
				Ok(collected) => collected.to_bytes(),
				Err(_) => {
					return to_hyper(
						Response::new(StatusCode::PAYLOAD_TOO_LARGE).with_text("Request body too large"),
					);
				}
			};

			let mut request = Request::new(parts.method, parts.uri, parts.version, parts.headers, body);
			request.remote_addr = Some(peer);

			let response = handler
				.handle(request)
				.await
				.unwrap_or_else(Response::from);

			to_hyper(response)
		})
	}
}

fn to_hyper(response: Response) -> Result<hyper::Response<Full<Bytes>>, BoxError> {
	let mut builder = hyper::Response::builder().status(response.status);
	for (key, value) in response.headers.iter() {
		builder = builder.header(key, value);
	}
	Ok(builder.body(Full::new(response.body))?)
}

/// Serve `handler` on `addr` until the process ends
pub async fn serve<H: Handler + 'static>(addr: SocketAddr, handler: H) -> Result<(), BoxError> {
	HttpServer::new(handler).listen(addr).await
}

/// Serve `handler` on `addr` until `coordinator` signals shutdown
pub async fn serve_with_shutdown<H: Handler + 'static>(
	addr: SocketAddr,
	handler: H,
	coordinator: ShutdownCoordinator,
) -> Result<(), BoxError> {
	HttpServer::new(handler)
		.listen_with_shutdown(addr, coordinator)
		.await
}
