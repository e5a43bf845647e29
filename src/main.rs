//! Balance monitor entry point.
//!
//! Loads the watcher configuration, connects to the configured EVM network and
//! reports every balance change of the subscribed accounts to Matrixbot.
//!
//! # Flow
//! 1. Loads `watcher.json` and `networks/` from the configuration directory
//! 2. Connects to the network and builds the Matrixbot notifier
//! 3. Reads every account's baseline balance and starts watching
//! 4. Handles graceful shutdown on Ctrl+C, flushing pending notifications

use balance_monitor::{
	bootstrap::{initialize_service, load_configuration, Result},
	utils::{
		logging::setup_logging, metrics::server::create_metrics_server,
		parse_string_to_bytes_size, DEFAULT_CONFIG_DIR, DEFAULT_METRICS_ADDRESS,
	},
};

use clap::Parser;
use dotenvy::dotenv_override;
use std::{
	env::{set_var, var},
	path::{Path, PathBuf},
};
use tracing::{error, info};

#[derive(Parser)]
#[command(
	name = "balance-monitor",
	about = "Watches account balances on an EVM network and reports every change to Matrixbot.",
	version
)]
struct Cli {
	/// Directory holding watcher.json and networks/ (default: config/)
	#[arg(long, value_name = "PATH")]
	config_dir: Option<PathBuf>,

	/// Write logs to file instead of stdout
	#[arg(long)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL")]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH")]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_string_to_bytes_size)]
	log_max_size: Option<u64>,

	/// Address to start the metrics server on (default: 127.0.0.1:8081)
	#[arg(long, value_name = "HOST:PORT")]
	metrics_address: Option<String>,

	/// Enable metrics server
	#[arg(long)]
	metrics: bool,

	/// Validate configuration files without starting the service
	#[arg(long)]
	check: bool,
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}
		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}

		if self.metrics {
			set_var("METRICS_ENABLED", "true");
		}

		if let Some(dir) = &self.config_dir {
			set_var("CONFIG_DIR", dir);
		}
	}

	fn config_dir(&self) -> PathBuf {
		self.config_dir
			.clone()
			.or_else(|| var("CONFIG_DIR").ok().map(PathBuf::from))
			.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config_dir = cli.config_dir();

	if cli.check {
		validate_configuration(&config_dir).await;
		return Ok(());
	}

	let (network, watcher) = load_configuration(&config_dir).await.map_err(|e| {
		anyhow::anyhow!(
			"Failed to load configuration from {}: {}",
			config_dir.display(),
			e
		)
	})?;

	let service = initialize_service(&network, &watcher).await?;

	let metrics_enabled =
		cli.metrics || var("METRICS_ENABLED").map(|v| v == "true").unwrap_or(false);
	let metrics_address = cli
		.metrics_address
		.clone()
		.or_else(|| var("METRICS_PORT").ok().map(|port| format!("127.0.0.1:{}", port)))
		.unwrap_or_else(|| DEFAULT_METRICS_ADDRESS.to_string());

	let metrics_server = if metrics_enabled {
		match create_metrics_server(metrics_address) {
			Ok(server) => Some(server),
			Err(e) => {
				error!("Failed to create metrics server: {}", e);
				None
			}
		}
	} else {
		info!("Metrics server disabled. Use --metrics flag or METRICS_ENABLED=true to enable");
		None
	};

	let watched = service.subscribe().await?;
	info!(
		"Watching {} account(s) on {}. Press Ctrl+C to shutdown",
		watched, network.slug
	);

	let ctrl_c = tokio::signal::ctrl_c();
	if let Some(metrics_future) = metrics_server {
		tokio::select! {
			result = ctrl_c => {
				if let Err(e) = result {
					error!("Error waiting for Ctrl+C: {}", e);
				}
				info!("Shutdown signal received, stopping services...");
			}
			result = metrics_future => {
				if let Err(e) = result {
					error!("Metrics server error: {}", e);
				}
				info!("Metrics server stopped, shutting down services...");
			}
		}
	} else {
		let _ = ctrl_c.await;
		info!("Shutdown signal received, stopping services...");
	}

	service.stop().await;

	info!("Shutdown complete");
	Ok(())
}

/// Loads and validates the configuration without connecting to anything
async fn validate_configuration(config_dir: &Path) {
	info!(
		"Validating configuration files in {}...",
		config_dir.display()
	);

	match load_configuration(config_dir).await {
		Ok((network, watcher)) => {
			info!("✓ Network '{}' loaded", network.slug);
			info!(
				"✓ Found {} subscription(s)",
				watcher.subscriber.subscriptions.len()
			);
			info!(
				"✓ Delivery delays: increase {} ms, decrease {} ms",
				watcher.delays.balance_increase_ms, watcher.delays.balance_decrease_ms
			);
			info!("Configuration validation completed successfully!");
		}
		Err(e) => {
			error!("{}", e);
		}
	}
}
