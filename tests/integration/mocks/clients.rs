//! Mock implementation of the blockchain client.
//!
//! - [`MockBlockChainClient`] - head and balance reads without a node

use async_trait::async_trait;
use mockall::mock;

use balance_monitor::{
	models::Balance,
	services::blockchain::{BlockChainClient, BlockChainError},
};

mock! {
	/// Mock implementation of the blockchain client trait.
	pub BlockChainClient {}

	#[async_trait]
	impl BlockChainClient for BlockChainClient {
		async fn get_latest_block_number(&self) -> Result<u64, BlockChainError>;
		async fn get_balance(&self, address: &str) -> Result<Balance, BlockChainError>;
	}

	impl Clone for BlockChainClient {
		fn clone(&self) -> Self;
	}
}
