//! # docsite-conf
//!
//! Site settings for docsite.
//!
//! Settings come from a TOML file (or the bundled Drash Land default), then
//! environment overrides are applied, then the result is validated.
//!
//! ```
//! use docsite_conf::SettingsLoader;
//!
//! let settings = SettingsLoader::new().with_env(false).load().unwrap();
//! assert_eq!(settings.local_storage_keys.dark_mode, "drash_land_dark_mode");
//! assert!(settings.module("drash").is_some());
//! ```

pub mod settings;
pub mod sources;
pub mod validation;

pub use settings::{
	AppSettings, LayoutSettings, LocalStorageKeys, ModuleSettings, RedirectRule, Settings,
	normalize_path,
};
pub use sources::{APP_ENV_VAR, SettingsLoader};

/// Errors raised while loading settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error reading {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid settings: {}", .0.join("; "))]
	Validation(Vec<String>),
}
