//! Bootstrap module for loading configuration and wiring services.
//!
//! Reads the network definitions and the watcher configuration from a
//! configuration directory, then builds the balance change service:
//! - `EvmClient` over a rotating HTTP transport
//! - `PollingBalanceSource` polling once per block time
//! - `MatrixbotNotifier` for delivery

use std::{collections::HashMap, error::Error, path::Path, sync::Arc, time::Duration};

use crate::{
	models::{ConfigError, ConfigLoader, DirectoryConfigLoader, Network, WatcherConfig},
	services::{
		balance::{BalanceChangeService, PollingBalanceSource},
		blockchain::EvmClient,
		notification::MatrixbotNotifier,
	},
	utils::{RetryConfig, NETWORKS_CONFIG_DIR, WATCHER_CONFIG_FILE},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Loads the watcher configuration and the network it watches
///
/// # Arguments
/// * `config_dir` - Directory holding `watcher.json` and `networks/`
///
/// # Errors
/// Returns a `ConfigError` if a file is missing or invalid, or if the watcher
/// names a network that is not defined
pub async fn load_configuration(
	config_dir: &Path,
) -> std::result::Result<(Network, WatcherConfig), ConfigError> {
	let networks_dir = config_dir.join(NETWORKS_CONFIG_DIR);
	let networks: HashMap<String, Network> =
		Network::load_all(Some(networks_dir.as_path())).await?;
	let watcher = WatcherConfig::load_from_path(&config_dir.join(WATCHER_CONFIG_FILE)).await?;

	let network = networks
		.into_values()
		.find(|network| network.slug == watcher.network)
		.ok_or_else(|| {
			ConfigError::validation_error(
				format!("Watcher network '{}' is not defined", watcher.network),
				None,
				Some(HashMap::from([(
					"config_dir".to_string(),
					config_dir.display().to_string(),
				)])),
			)
		})?;

	network.validate_protocol();
	watcher.validate_protocol();

	Ok((network, watcher))
}

/// Builds the balance change service for a loaded configuration
///
/// Connects to the network, so the first responsive RPC endpoint is chosen
/// here.
pub async fn initialize_service(
	network: &Network,
	config: &WatcherConfig,
) -> Result<BalanceChangeService> {
	let client = EvmClient::new(network, &RetryConfig::default()).await?;
	let source = PollingBalanceSource::new(client, Duration::from_millis(network.block_time_ms));
	let notifier = MatrixbotNotifier::new(&config.matrixbot)?;

	tracing::info!(
		"Balance monitor for {} configured with {} subscription(s)",
		network.name,
		config.subscriber.subscriptions.len()
	);

	Ok(BalanceChangeService::from_config(
		Arc::new(source),
		Arc::new(notifier),
		config,
	))
}
