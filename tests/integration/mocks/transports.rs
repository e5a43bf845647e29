use mockall::mock;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use balance_monitor::services::blockchain::{
	BlockchainTransport, RotatingTransport, TransportError,
};

// Mock implementation of an EVM transport client.
// Used to simulate raw JSON-RPC request handling for the EVM client.
mock! {
	pub EvmTransportClient {}

	#[async_trait::async_trait]
	impl BlockchainTransport for EvmTransportClient {
		async fn get_current_url(&self) -> String;
		async fn send_raw_request(
			&self,
			method: &str,
			params: Option<Value>,
		) -> Result<Value, TransportError>;
	}

	impl Clone for EvmTransportClient {
		fn clone(&self) -> Self;
	}
}

// Transport used by the endpoint manager tests.
// Connection checks hit the candidate URL, switching only records it.
#[derive(Clone)]
pub struct MockTransport {
	client: reqwest::Client,
	pub current_url: Arc<RwLock<String>>,
}

impl MockTransport {
	pub fn new() -> Self {
		Self {
			client: reqwest::Client::new(),
			current_url: Arc::new(RwLock::new(String::new())),
		}
	}
}

#[async_trait::async_trait]
impl BlockchainTransport for MockTransport {
	async fn get_current_url(&self) -> String {
		self.current_url.read().await.clone()
	}

	async fn send_raw_request(
		&self,
		_method: &str,
		_params: Option<Value>,
	) -> Result<Value, TransportError> {
		Ok(json!({"jsonrpc": "2.0", "result": "mocked_response", "id": 1}))
	}
}

#[async_trait::async_trait]
impl RotatingTransport for MockTransport {
	async fn try_connect(&self, url: &str) -> Result<(), anyhow::Error> {
		match self.client.get(url).send().await {
			Ok(_) => Ok(()),
			Err(e) => Err(anyhow::anyhow!("Failed to connect: {}", e)),
		}
	}

	async fn update_client(&self, url: &str) -> Result<(), anyhow::Error> {
		*self.current_url.write().await = url.to_string();
		Ok(())
	}
}

// Transport that accepts every connection but never manages to switch.
#[derive(Clone)]
pub struct AlwaysFailsToUpdateClientTransport;

#[async_trait::async_trait]
impl BlockchainTransport for AlwaysFailsToUpdateClientTransport {
	async fn get_current_url(&self) -> String {
		String::new()
	}

	async fn send_raw_request(
		&self,
		_method: &str,
		_params: Option<Value>,
	) -> Result<Value, TransportError> {
		Ok(json!({"jsonrpc": "2.0", "result": "mocked_response", "id": 1}))
	}
}

#[async_trait::async_trait]
impl RotatingTransport for AlwaysFailsToUpdateClientTransport {
	async fn try_connect(&self, _url: &str) -> Result<(), anyhow::Error> {
		Ok(())
	}

	async fn update_client(&self, _url: &str) -> Result<(), anyhow::Error> {
		Err(anyhow::anyhow!("Simulated client update failure"))
	}
}
