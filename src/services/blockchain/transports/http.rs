//! HTTP transport for JSON-RPC nodes.
//!
//! The client picks the highest weighted endpoint that answers a probe
//! request at startup and keeps the others as fallbacks.

use anyhow::Context;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use crate::{
	models::Network,
	services::blockchain::transports::{
		BlockchainTransport, EndpointManager, RotatingTransport, TransientErrorRetryStrategy,
		TransportError,
	},
	utils::http::{create_retryable_http_client, RetryConfig},
};

/// JSON-RPC over HTTP with retries and endpoint rotation
///
/// Cheap to clone; clones share the endpoint state.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	/// Retryable HTTP client for making requests
	pub client: ClientWithMiddleware,
	endpoint_manager: EndpointManager,
}

/// Request used to check that an endpoint is alive
fn probe_request() -> Value {
	json!({
		"jsonrpc": "2.0",
		"id": 1,
		"method": "eth_blockNumber",
		"params": []
	})
}

impl HttpTransportClient {
	/// Connects to the first responsive RPC URL of the network
	///
	/// URLs of type `rpc` with a non-zero weight are tried from the highest
	/// weight down.
	///
	/// # Arguments
	/// * `network` - Network configuration containing the RPC URLs
	/// * `retry_config` - Retry policy applied to every request
	pub async fn new(network: &Network, retry_config: &RetryConfig) -> Result<Self, anyhow::Error> {
		let mut rpc_urls: Vec<_> = network
			.rpc_urls
			.iter()
			.filter(|rpc_url| rpc_url.type_ == "rpc" && rpc_url.weight > 0)
			.collect();
		rpc_urls.sort_by(|a, b| b.weight.cmp(&a.weight));

		let base_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.timeout(Duration::from_secs(30))
			.connect_timeout(Duration::from_secs(20))
			.build()
			.context("Failed to create base HTTP client")?;

		let client = create_retryable_http_client(
			retry_config,
			base_client,
			Some(TransientErrorRetryStrategy),
		);

		for rpc_url in &rpc_urls {
			let url = match Url::parse(&rpc_url.url) {
				Ok(url) => url,
				Err(_) => continue,
			};

			match client.post(url).json(&probe_request()).send().await {
				Ok(response) if response.status().is_success() => {
					let fallback_urls = rpc_urls
						.iter()
						.filter(|other| other.url != rpc_url.url)
						.map(|other| other.url.clone())
						.collect();

					tracing::debug!("Connected to RPC URL {} for {}", rpc_url.url, network.slug);
					return Ok(Self {
						endpoint_manager: EndpointManager::new(
							client.clone(),
							&rpc_url.url,
							fallback_urls,
						),
						client,
					});
				}
				Ok(response) => {
					tracing::warn!(
						"RPC URL {} answered probe with status {}",
						rpc_url.url,
						response.status()
					);
				}
				Err(e) => {
					tracing::warn!("RPC URL {} unreachable: {}", rpc_url.url, e);
				}
			}
		}

		Err(anyhow::anyhow!(
			"All RPC URLs failed to connect for network '{}'",
			network.slug
		))
	}

	pub async fn fallback_urls(&self) -> Vec<String> {
		self.endpoint_manager.fallback_urls().await
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	async fn get_current_url(&self) -> String {
		self.endpoint_manager.active_url().await
	}

	async fn send_raw_request(
		&self,
		method: &str,
		params: Option<Value>,
	) -> Result<Value, TransportError> {
		self.endpoint_manager
			.send_raw_request(self, method, params)
			.await
	}
}

#[async_trait]
impl RotatingTransport for HttpTransportClient {
	async fn try_connect(&self, url: &str) -> Result<(), anyhow::Error> {
		let url = Url::parse(url).map_err(|_| anyhow::anyhow!("Invalid URL: {}", url))?;

		let response = self
			.client
			.post(url.clone())
			.json(&probe_request())
			.send()
			.await
			.map_err(|e| anyhow::anyhow!("Failed to connect to {}: {}", url, e))?;

		if response.status().is_success() {
			Ok(())
		} else {
			Err(anyhow::anyhow!(
				"Failed to connect to {}: {}",
				url,
				response.status().as_u16()
			))
		}
	}

	async fn update_client(&self, url: &str) -> Result<(), anyhow::Error> {
		let parsed_url = Url::parse(url).map_err(|_| anyhow::anyhow!("Invalid URL: {}", url))?;
		self.endpoint_manager
			.set_active_url(parsed_url.as_str().trim_end_matches('/'))
			.await;
		Ok(())
	}
}
