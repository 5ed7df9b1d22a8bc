//! URL handling for docsite.
//!
//! - [`redirects`]: the static `{source, destination, permanent}` table
//! - [`resolver`]: maps `/{module}/{version}/{page...}` paths onto configured
//!   modules
//!
//! ```
//! use docsite_conf::Settings;
//! use docsite_urls::{Resolution, Resolver};
//!
//! let settings = Settings::bundled().unwrap();
//! let resolver = Resolver::new(&settings);
//!
//! match resolver.resolve("/drash") {
//!     Resolution::Redirect(redirect) => {
//!         assert_eq!(redirect.destination, "/drash/v2.x/getting-started/introduction");
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod redirects;
pub mod resolver;

pub use redirects::{Redirect, RedirectKind, RedirectTable, normalize_path};
pub use resolver::{DEFAULT_PAGE, DocsRoute, Resolution, Resolver};
