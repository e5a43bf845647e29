//! EVM-compatible blockchain client implementation.
//!
//! Reads the chain head and native balances through JSON-RPC.

use alloy::primitives::Address;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::{collections::HashMap, str::FromStr};
use tracing::instrument;

use crate::{
	models::{Balance, Network},
	services::blockchain::{
		client::BlockChainClient,
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
	utils::{parse_hex_quantity, RetryConfig},
};

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
#[derive(Clone)]
pub struct EvmClient<T: Send + Sync + Clone> {
	/// The underlying transport for RPC communication
	http_client: T,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(http_client: T) -> Self {
		Self { http_client }
	}
}

impl EvmClient<HttpTransportClient> {
	/// Creates a new EVM client connected to the first responsive RPC URL of the network
	pub async fn new(network: &Network, retry_config: &RetryConfig) -> Result<Self, BlockChainError> {
		let transport = HttpTransportClient::new(network, retry_config)
			.await
			.map_err(|e| {
				BlockChainError::connection_error(
					format!("Failed to connect to network '{}'", network.slug),
					Some(e.into()),
					Some(HashMap::from([(
						"network".to_string(),
						network.slug.clone(),
					)])),
				)
			})?;
		Ok(Self::new_with_transport(transport))
	}
}

impl<T: Send + Sync + Clone + BlockchainTransport> EvmClient<T> {
	/// Sends a call and returns its `result`, mapping JSON-RPC error objects to request errors
	async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, BlockChainError> {
		let metadata = || Some(HashMap::from([("method".to_string(), method.to_string())]));

		let mut response = self
			.http_client
			.send_raw_request(method, params)
			.await
			.map_err(|e| {
				BlockChainError::request_error(
					format!("{} request failed", method),
					Some(Box::new(e)),
					metadata(),
				)
			})?;

		if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
			let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
			let message = error
				.get("message")
				.and_then(Value::as_str)
				.unwrap_or("unknown error");
			return Err(BlockChainError::request_error(
				format!("{} returned error {}: {}", method, code, message),
				None,
				metadata(),
			));
		}

		match response.get_mut("result").map(Value::take) {
			Some(result) if !result.is_null() => Ok(result),
			_ => Err(BlockChainError::request_error(
				"Missing 'result' field",
				None,
				metadata(),
			)),
		}
	}

	fn parse_quantity(method: &str, value: &Value) -> Result<Balance, BlockChainError> {
		let hex = value.as_str().ok_or_else(|| {
			BlockChainError::request_error(
				format!("{} result is not a hex string: {}", method, value),
				None,
				None,
			)
		})?;
		parse_hex_quantity(hex).map_err(|e| BlockChainError::request_error(e, None, None))
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> BlockChainClient for EvmClient<T> {
	#[instrument(skip(self))]
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError> {
		let result = self.call("eth_blockNumber", None).await?;
		let number = Self::parse_quantity("eth_blockNumber", &result)?;

		u64::try_from(number).map_err(|_| {
			BlockChainError::request_error(
				format!("Block number out of range: {}", number),
				None,
				None,
			)
		})
	}

	#[instrument(skip(self))]
	async fn get_balance(&self, address: &str) -> Result<Balance, BlockChainError> {
		let parsed = Address::from_str(address.trim()).map_err(|e| {
			BlockChainError::request_error(
				format!("Invalid address: {}", address),
				Some(Box::new(e)),
				None,
			)
		})?;

		let result = self
			.call(
				"eth_getBalance",
				Some(json!([format!("{:#x}", parsed), "latest"])),
			)
			.await?;

		Self::parse_quantity("eth_getBalance", &result)
	}
}
