//! Blockchain client interfaces and implementations.
//!
//! - `BlockChainClient`: the read operations the balance service relies on
//! - `EvmClient`: JSON-RPC implementation for EVM-compatible chains
//! - transports with retries and endpoint rotation
//! - error types for client and transport failures

mod client;
mod clients;
mod error;
mod transports;

pub use client::BlockChainClient;
pub use clients::EvmClient;
pub use error::BlockChainError;
pub use transports::{
	BlockchainTransport, EndpointManager, HttpTransportClient, RotatingTransport,
	TransientErrorRetryStrategy, TransportError,
};
