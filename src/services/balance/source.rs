//! Balance sources.
//!
//! A source answers one-off balance reads and opens per-account streams of
//! balance values. [`PollingBalanceSource`] builds those streams on top of a
//! [`BlockChainClient`] by re-reading the balance whenever the chain head moves.

use async_trait::async_trait;
use std::{collections::HashMap, time::Duration};
use tokio::{
	sync::mpsc,
	task::JoinHandle,
	time::{interval, MissedTickBehavior},
};
use tracing::instrument;

use crate::{
	models::Balance,
	services::{balance::error::BalanceMonitorError, blockchain::BlockChainClient},
};

const STREAM_BUFFER: usize = 16;

/// Stream of balance values for one account
///
/// Dropping the subscription stops whatever task produces its values.
#[derive(Debug)]
pub struct BalanceSubscription {
	receiver: mpsc::Receiver<Balance>,
	producer: Option<JoinHandle<()>>,
}

impl BalanceSubscription {
	pub fn new(receiver: mpsc::Receiver<Balance>, producer: JoinHandle<()>) -> Self {
		Self {
			receiver,
			producer: Some(producer),
		}
	}

	/// Subscription fed by the returned sender instead of a producer task
	pub fn channel(buffer: usize) -> (mpsc::Sender<Balance>, Self) {
		let (sender, receiver) = mpsc::channel(buffer);
		(
			sender,
			Self {
				receiver,
				producer: None,
			},
		)
	}

	/// Next balance value, or `None` once the stream has ended
	pub async fn next(&mut self) -> Option<Balance> {
		self.receiver.recv().await
	}

	/// Stops the producer and closes the stream
	pub fn cancel(&mut self) {
		if let Some(producer) = self.producer.take() {
			producer.abort();
		}
		self.receiver.close();
	}
}

impl Drop for BalanceSubscription {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// Where balances come from
#[async_trait]
pub trait BalanceSource: Send + Sync {
	/// Reads the current balance of `address` once
	async fn read_current(&self, address: &str) -> Result<Balance, BalanceMonitorError>;

	/// Opens a stream of balance values for `address`
	///
	/// The stream starts with the current value and then yields each new value.
	async fn subscribe(&self, address: &str) -> Result<BalanceSubscription, BalanceMonitorError>;
}

/// Balance source that polls a chain client once per block interval
#[derive(Clone)]
pub struct PollingBalanceSource<C> {
	client: C,
	poll_interval: Duration,
}

impl<C: BlockChainClient + 'static> PollingBalanceSource<C> {
	/// Creates a polling source
	///
	/// # Arguments
	/// * `client` - Chain client used for head and balance reads
	/// * `poll_interval` - How often to check for a new head, usually the block time
	pub fn new(client: C, poll_interval: Duration) -> Self {
		Self {
			client,
			poll_interval,
		}
	}

	pub fn poll_interval(&self) -> Duration {
		self.poll_interval
	}

	async fn poll(client: C, address: String, period: Duration, sender: mpsc::Sender<Balance>) {
		let mut ticker = interval(period);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

		let mut last_head: Option<u64> = None;
		let mut last_sent: Option<Balance> = None;

		loop {
			ticker.tick().await;

			let head = match client.get_latest_block_number().await {
				Ok(head) => head,
				Err(e) => {
					tracing::warn!("Failed to read chain head while watching {}: {}", address, e);
					continue;
				}
			};
			if last_head == Some(head) {
				continue;
			}

			let balance = match client.get_balance(&address).await {
				Ok(balance) => balance,
				Err(e) => {
					tracing::warn!(
						"Failed to read balance of {} at block {}: {}",
						address,
						head,
						e
					);
					continue;
				}
			};
			last_head = Some(head);

			if last_sent == Some(balance) {
				continue;
			}
			if sender.send(balance).await.is_err() {
				tracing::debug!("Balance stream for {} closed", address);
				break;
			}
			last_sent = Some(balance);
		}
	}
}

#[async_trait]
impl<C: BlockChainClient + 'static> BalanceSource for PollingBalanceSource<C> {
	#[instrument(skip(self))]
	async fn read_current(&self, address: &str) -> Result<Balance, BalanceMonitorError> {
		self.client.get_balance(address).await.map_err(|e| {
			BalanceMonitorError::source_error(
				format!("Failed to read balance of {}", address),
				Some(Box::new(e)),
				Some(HashMap::from([(
					"address".to_string(),
					address.to_string(),
				)])),
			)
		})
	}

	async fn subscribe(&self, address: &str) -> Result<BalanceSubscription, BalanceMonitorError> {
		let (sender, receiver) = mpsc::channel(STREAM_BUFFER);
		let producer = tokio::spawn(Self::poll(
			self.client.clone(),
			address.to_string(),
			self.poll_interval,
			sender,
		));
		tracing::debug!(
			"Polling balance of {} every {:?}",
			address,
			self.poll_interval
		);
		Ok(BalanceSubscription::new(receiver, producer))
	}
}
