//! # docsite-core
//!
//! Core building blocks shared by every docsite crate.
//!
//! - [`exception`]: the error taxonomy and its HTTP status mapping
//! - [`page`]: the renderable page tree used for server-side rendering
//!
//! ## Example
//!
//! ```
//! use docsite_core::page::{IntoPage, PageElement};
//!
//! let html = PageElement::new("nav")
//!     .attr("class", "breadcrumbs")
//!     .child("drash")
//!     .into_page()
//!     .render_to_string();
//!
//! assert_eq!(html, r#"<nav class="breadcrumbs">drash</nav>"#);
//! ```

pub mod exception;
pub mod page;

pub use exception::{Error, Result};
