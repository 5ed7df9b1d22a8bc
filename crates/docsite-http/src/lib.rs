//! HTTP primitives for docsite.
//!
//! [`Request`] and [`Response`] are plain owned values converted to and from
//! hyper messages at the server boundary. [`Handler`] and [`Middleware`]
//! compose through [`MiddlewareChain`].

mod handler;
mod request;
mod response;

pub use docsite_core::exception::{Error, Result};
pub use handler::{Handler, Middleware, MiddlewareChain};
pub use request::{Request, RequestBuilder};
pub use response::Response;
