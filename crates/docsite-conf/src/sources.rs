//! Layered settings loading: file (or bundled default), then environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::SettingsError;
use crate::settings::{BUNDLED_SITE_TOML, Settings};
use crate::validation::validate;

/// Environment variable overriding `app.env`.
pub const APP_ENV_VAR: &str = "DOCSITE_APP_ENV";

impl Settings {
	/// Parse settings from a TOML string without validating them.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Read and parse a TOML settings file without validating it.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	/// The bundled Drash Land configuration.
	pub fn bundled() -> Result<Self, SettingsError> {
		Self::from_toml_str(BUNDLED_SITE_TOML)
	}

	/// Apply overrides looked up through `lookup`.
	///
	/// Taking the lookup as a closure keeps tests away from the process environment.
	pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(env) = lookup(APP_ENV_VAR).filter(|v| !v.trim().is_empty()) {
			tracing::debug!(env = %env, "app env overridden from {}", APP_ENV_VAR);
			self.app.env = env.trim().to_string();
		}
	}

	/// Apply overrides from the process environment.
	pub fn apply_env_overrides(&mut self) {
		self.apply_env_overrides_with(|key| std::env::var(key).ok());
	}
}

/// Builder that loads, overrides and validates settings
///
/// # Examples
///
/// ```no_run
/// use docsite_conf::SettingsLoader;
///
/// let settings = SettingsLoader::new()
///     .with_file("site.toml")
///     .load()?;
/// # Ok::<(), docsite_conf::SettingsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
	file: Option<PathBuf>,
	env: bool,
}

impl Default for SettingsLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl SettingsLoader {
	/// Bundled defaults with environment overrides enabled.
	pub fn new() -> Self {
		Self {
			file: None,
			env: true,
		}
	}

	/// Load from `path` instead of the bundled defaults.
	pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
		self.file = Some(path.into());
		self
	}

	/// Read from `path` when given, bundled defaults otherwise.
	pub fn with_optional_file(mut self, path: Option<PathBuf>) -> Self {
		self.file = path;
		self
	}

	pub fn with_env(mut self, enabled: bool) -> Self {
		self.env = enabled;
		self
	}

	pub fn load(&self) -> Result<Settings, SettingsError> {
		let mut settings = match &self.file {
			Some(path) => {
				tracing::info!(path = %path.display(), "loading site settings");
				Settings::from_file(path)?
			}
			None => {
				tracing::info!("loading bundled site settings");
				Settings::bundled()?
			}
		};

		if self.env {
			settings.apply_env_overrides();
		}

		validate(&settings).map_err(SettingsError::Validation)?;
		Ok(settings)
	}
}
