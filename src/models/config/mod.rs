//! Configuration loading and validation.
//!
//! This module provides traits and implementations for loading and validating
//! the network definitions and the watcher configuration.

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use std::path::Path;

mod error;
mod network_config;
mod watcher_config;

pub use error::ConfigError;

/// Common interface for loading a configuration file
#[async_trait]
pub trait ConfigLoader: Sized {
	/// Load configuration from a specific file path
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	/// Validate the configuration
	///
	/// Returns Ok(()) if valid, or an error message if invalid.
	fn validate(&self) -> Result<(), ConfigError>;

	/// Validate safety of the protocol
	///
	/// Returns if safe, or logs a warning message if unsafe.
	fn validate_protocol(&self);

	/// Check if a file is a JSON file based on extension
	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}

/// Configuration kinds stored one per file in a directory
#[async_trait]
pub trait DirectoryConfigLoader: ConfigLoader {
	/// Load all configuration files from a directory
	///
	/// If no path is provided, uses the default directory for the kind.
	async fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>;

	/// Validate uniqueness of the configuration
	/// # Arguments
	/// * `instances` - The instances loaded so far
	/// * `current_instance` - The instance to check against them
	/// * `file_path` - The file the current instance came from (for error metadata)
	fn validate_uniqueness(
		instances: &[&Self],
		current_instance: &Self,
		file_path: &str,
	) -> Result<(), ConfigError>;
}
