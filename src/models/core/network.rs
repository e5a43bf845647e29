use serde::{Deserialize, Serialize};

/// Configuration for connecting to an EVM-compatible network.
///
/// Defines the JSON-RPC endpoints balances are read from and how often the
/// chain head is polled.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Network {
	/// Unique identifier for this network, used as the network id in notifications
	pub slug: String,

	/// Human-readable name of the network
	pub name: String,

	/// List of RPC endpoints with their weights for load balancing
	pub rpc_urls: Vec<RpcUrl>,

	/// Chain ID, informational only
	pub chain_id: Option<u64>,

	/// Average block time in milliseconds, also the balance poll interval
	pub block_time_ms: u64,
}

/// RPC endpoint configuration with load balancing weight
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RpcUrl {
	/// Type of RPC endpoint (e.g. "rpc")
	pub type_: String,

	/// URL of the RPC endpoint
	pub url: String,

	/// Weight for load balancing (0-100)
	pub weight: u32,
}
