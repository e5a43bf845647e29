//! Blockchain client interface.
//!
//! The balance service only needs the chain head and account balances, so
//! that is all a client has to provide.

use async_trait::async_trait;

use crate::{models::Balance, services::blockchain::BlockChainError};

/// Read access to a chain for balance watching
#[async_trait]
pub trait BlockChainClient: Send + Sync + Clone {
	/// Retrieves the latest block number from the blockchain
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError>;

	/// Retrieves the spendable balance of an account at the latest block
	///
	/// # Arguments
	/// * `address` - Account address as configured in the subscription
	async fn get_balance(&self, address: &str) -> Result<Balance, BlockChainError>;
}
