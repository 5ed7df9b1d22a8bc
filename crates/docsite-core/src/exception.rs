//! Error taxonomy for docsite.
//!
//! Every crate boundary converts its own failures into [`Error`] before they
//! reach the HTTP layer, where [`Error::status_code`] decides the response
//! status.

/// Result type alias used throughout docsite.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while serving documentation pages.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The requested page, module or version does not exist.
	#[error("Not found: {0}")]
	NotFound(String),

	/// The request could not be interpreted.
	#[error("Bad request: {0}")]
	BadRequest(String),

	/// Site configuration is missing or invalid.
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// Content could not be loaded from its source.
	#[error("Content error: {0}")]
	Content(String),

	/// Building or converting an HTTP message failed.
	#[error("HTTP error: {0}")]
	Http(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl Error {
	/// Returns the HTTP status code this error maps to.
	///
	/// # Examples
	///
	/// ```
	/// use docsite_core::Error;
	///
	/// assert_eq!(Error::NotFound("/nope".into()).status_code(), 404);
	/// assert_eq!(Error::Internal("boom".into()).status_code(), 500);
	/// ```
	pub fn status_code(&self) -> u16 {
		match self {
			Error::NotFound(_) => 404,
			Error::BadRequest(_) => 400,
			Error::Configuration(_)
			| Error::Content(_)
			| Error::Http(_)
			| Error::Io(_)
			| Error::Internal(_) => 500,
		}
	}

	/// Returns true when the error should be shown to the visitor as a missing page.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Error::NotFound(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Error::NotFound("/x".into()), 404)]
	#[case(Error::BadRequest("bad".into()), 400)]
	#[case(Error::Configuration("cfg".into()), 500)]
	#[case(Error::Content("missing body".into()), 500)]
	#[case(Error::Io(std::io::Error::other("disk")), 500)]
	fn test_status_code_mapping(#[case] error: Error, #[case] expected: u16) {
		assert_eq!(error.status_code(), expected);
	}

	#[rstest]
	fn test_display_includes_context() {
		let error = Error::NotFound("/drash/v9.x".to_string());
		assert_eq!(error.to_string(), "Not found: /drash/v9.x");
		assert!(error.is_not_found());
	}

	#[rstest]
	fn test_io_error_converts() {
		fn read() -> Result<()> {
			Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
			Ok(())
		}

		let error = read().unwrap_err();
		assert!(matches!(error, Error::Io(_)));
		assert!(!error.is_not_found());
	}
}
