//! Watcher configuration loading and validation.
//!
//! The watcher is configured by a single `watcher.json` holding the watched
//! accounts, the Matrixbot endpoint and the delivery delays.

use alloy::primitives::Address;
use async_trait::async_trait;
use std::{
	collections::{HashMap, HashSet},
	path::Path,
	str::FromStr,
};

use crate::{
	models::{
		config::error::{path_metadata, ConfigError},
		ConfigLoader, WatcherConfig,
	},
	utils::normalize_string,
};

#[async_trait]
impl ConfigLoader for WatcherConfig {
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path).map_err(|e| {
			ConfigError::file_error(
				format!("failed to open watcher config file: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;
		let config: WatcherConfig = serde_json::from_reader(file).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse watcher config: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;

		config.validate()?;

		Ok(config)
	}

	/// Validate the watcher configuration
	///
	/// Ensures that:
	/// - A network slug is given
	/// - There is at least one subscription
	/// - Subscription names are non-empty and unique
	/// - Subscription addresses are valid and unique
	/// - The Matrixbot endpoint is an HTTP(S) URL
	fn validate(&self) -> Result<(), ConfigError> {
		if self.network.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Watcher network is required",
				None,
				None,
			));
		}

		if self.subscriber.subscriptions.is_empty() {
			return Err(ConfigError::validation_error(
				"At least one subscription is required",
				None,
				None,
			));
		}

		let mut names = HashSet::new();
		let mut addresses = HashSet::new();
		for subscription in &self.subscriber.subscriptions {
			let name = normalize_string(&subscription.name);
			if name.is_empty() {
				return Err(ConfigError::validation_error(
					"Subscription name is required",
					None,
					Some(HashMap::from([(
						"address".to_string(),
						subscription.address.clone(),
					)])),
				));
			}
			if !names.insert(name) {
				return Err(ConfigError::validation_error(
					format!("Duplicate subscription name found: '{}'", subscription.name),
					None,
					Some(HashMap::from([(
						"name".to_string(),
						subscription.name.clone(),
					)])),
				));
			}

			let address = Address::from_str(subscription.address.trim()).map_err(|e| {
				ConfigError::validation_error(
					format!("Invalid address for subscription '{}'", subscription.name),
					Some(Box::new(e)),
					Some(HashMap::from([(
						"address".to_string(),
						subscription.address.clone(),
					)])),
				)
			})?;
			if !addresses.insert(address) {
				return Err(ConfigError::validation_error(
					format!(
						"Duplicate subscription address found: '{}'",
						subscription.address
					),
					None,
					Some(HashMap::from([(
						"name".to_string(),
						subscription.name.clone(),
					)])),
				));
			}
		}

		let endpoint = &self.matrixbot.endpoint;
		if !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
			|| url::Url::parse(endpoint).is_err()
		{
			return Err(ConfigError::validation_error(
				"Matrixbot endpoint must be an http:// or https:// URL",
				None,
				Some(HashMap::from([("endpoint".to_string(), endpoint.clone())])),
			));
		}

		self.validate_protocol();

		Ok(())
	}

	fn validate_protocol(&self) {
		if self.matrixbot.endpoint.starts_with("http://") {
			tracing::warn!(
				"Matrixbot endpoint uses an insecure protocol: {}",
				self.matrixbot.endpoint
			);
		}
	}
}
