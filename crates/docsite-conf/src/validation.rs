//! Settings validation.
//!
//! All problems are collected so `docsite check` can report them in one pass.

use std::collections::{HashMap, HashSet};

use crate::settings::{Settings, normalize_path};

/// Validate settings, returning every problem found.
pub fn validate(settings: &Settings) -> Result<(), Vec<String>> {
	let mut errors = Vec::new();

	if settings.local_storage_keys.dark_mode.trim().is_empty() {
		errors.push("local_storage_keys.dark_mode must not be empty".to_string());
	}
	if settings.layout.breakpoint == 0 {
		errors.push("layout.breakpoint must be greater than zero".to_string());
	}

	validate_modules(settings, &mut errors);
	validate_redirects(settings, &mut errors);

	if errors.is_empty() {
		Ok(())
	} else {
		Err(errors)
	}
}

fn validate_modules(settings: &Settings, errors: &mut Vec<String>) {
	let mut seen = HashSet::new();

	for module in &settings.modules {
		if module.name.is_empty() || module.name.contains('/') {
			errors.push(format!("module name {:?} is not a path segment", module.name));
		}
		if !seen.insert(module.name.as_str()) {
			errors.push(format!("module {:?} is listed more than once", module.name));
		}
		if module.versions.is_empty() {
			errors.push(format!("module {:?} lists no versions", module.name));
		}

		let mut versions = HashSet::new();
		for version in &module.versions {
			if version.is_empty() || version.contains('/') {
				errors.push(format!(
					"module {:?} has invalid version {:?}",
					module.name, version
				));
			}
			if !versions.insert(version.as_str()) {
				errors.push(format!(
					"module {:?} lists version {:?} more than once",
					module.name, version
				));
			}
		}
	}
}

fn is_absolute_url(value: &str) -> bool {
	value.starts_with("https://") || value.starts_with("http://")
}

fn validate_redirects(settings: &Settings, errors: &mut Vec<String>) {
	// Keyed the way the redirect table matches requests, so `/old/` and `/old`
	// are the same source.
	let mut targets: HashMap<&str, &str> = HashMap::new();

	for rule in &settings.redirects {
		if !rule.source.starts_with('/') {
			errors.push(format!("redirect source {:?} must start with '/'", rule.source));
		}
		if !rule.destination.starts_with('/') && !is_absolute_url(&rule.destination) {
			errors.push(format!(
				"redirect destination {:?} must be a path or an absolute URL",
				rule.destination
			));
		}

		let source = normalize_path(&rule.source);
		let destination = if rule.destination.starts_with('/') {
			normalize_path(&rule.destination)
		} else {
			rule.destination.as_str()
		};

		if source == destination {
			errors.push(format!("redirect {:?} points to itself", rule.source));
		}
		if targets.insert(source, destination).is_some() {
			errors.push(format!("redirect source {:?} is listed more than once", rule.source));
		}
	}

	// Follow each chain; revisiting a source means the chain never settles.
	for start in targets.keys() {
		let mut visited = HashSet::new();
		let mut current = *start;
		while let Some(&next) = targets.get(current) {
			if !visited.insert(current) {
				if *start == current {
					errors.push(format!("redirect chain starting at {:?} loops", start));
				}
				break;
			}
			current = next;
		}
	}
}
