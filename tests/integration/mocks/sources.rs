//! Balance sources for testing.
//!
//! - [`MockBalanceSource`] - mockall mock of the source trait
//! - [`ChannelSource`] - fixed initial reads plus streams fed by the test

use async_trait::async_trait;
use mockall::mock;
use std::{collections::HashMap, sync::Mutex};
use tokio::sync::mpsc;

use balance_monitor::{
	models::Balance,
	services::balance::{BalanceMonitorError, BalanceSource, BalanceSubscription},
};

mock! {
	pub BalanceSource {}

	#[async_trait]
	impl BalanceSource for BalanceSource {
		async fn read_current(&self, address: &str) -> Result<Balance, BalanceMonitorError>;
		async fn subscribe(&self, address: &str) -> Result<BalanceSubscription, BalanceMonitorError>;
	}
}

/// Source whose streams are pushed by the test through the returned senders
#[derive(Default)]
pub struct ChannelSource {
	initial: HashMap<String, Balance>,
	streams: Mutex<HashMap<String, BalanceSubscription>>,
}

impl ChannelSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers an account and returns the sender feeding its stream
	pub fn account(&mut self, address: &str, initial: u64) -> mpsc::Sender<Balance> {
		let (sender, subscription) = BalanceSubscription::channel(16);
		self.initial
			.insert(address.to_string(), Balance::from(initial));
		self.streams
			.lock()
			.unwrap()
			.insert(address.to_string(), subscription);
		sender
	}
}

#[async_trait]
impl BalanceSource for ChannelSource {
	async fn read_current(&self, address: &str) -> Result<Balance, BalanceMonitorError> {
		self.initial.get(address).copied().ok_or_else(|| {
			BalanceMonitorError::source_error(format!("unknown account {}", address), None, None)
		})
	}

	async fn subscribe(&self, address: &str) -> Result<BalanceSubscription, BalanceMonitorError> {
		self.streams.lock().unwrap().remove(address).ok_or_else(|| {
			BalanceMonitorError::source_error(format!("no stream for {}", address), None, None)
		})
	}
}
