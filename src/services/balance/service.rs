//! Balance change service implementation.
//!
//! Runs one watcher task per subscribed account. Each task takes balance
//! values from its stream, classifies them against the account's baseline,
//! applies the subscription's notification policy and queues surviving
//! changes for delayed delivery.

use futures::future::try_join_all;
use std::{collections::HashMap, sync::Arc};
use tokio::{
	sync::{watch, Mutex},
	task::JoinHandle,
};
use tracing::instrument;

use crate::{
	models::{
		Balance, BalanceChangeEvent, DelayConfig, SubscriberConfig, Subscription,
		SubscriptionModuleConfig, WatcherConfig,
	},
	services::{
		balance::{
			classifier::classify,
			delayed::{DeliveryQueue, DelayedNotifier},
			error::BalanceMonitorError,
			policy::NotificationPolicy,
			source::{BalanceSource, BalanceSubscription},
			tracker::BaselineTracker,
		},
		notification::Notifier,
	},
	utils::metrics::{record_change, ChangeOutcome, SUBSCRIPTIONS_ACTIVE},
};

/// Watch state of a single account
struct AccountWatcher {
	subscription: Subscription,
	network_id: String,
	policy: NotificationPolicy,
	tracker: BaselineTracker,
}

impl AccountWatcher {
	fn new(
		subscription: &Subscription,
		network_id: &str,
		defaults: Option<&SubscriptionModuleConfig>,
	) -> Self {
		Self {
			subscription: subscription.clone(),
			network_id: network_id.to_string(),
			policy: NotificationPolicy::resolve(defaults, subscription.balance_change.as_ref()),
			tracker: BaselineTracker::new(subscription.address.as_str()),
		}
	}

	/// Turns a streamed balance into a change to deliver, if any
	fn on_balance(&mut self, balance: Balance) -> Option<BalanceChangeEvent> {
		let Some(prior) = self.tracker.observe(balance) else {
			tracing::debug!(
				"Baseline of {} refreshed from first live value {}",
				self.subscription.name,
				balance
			);
			return None;
		};
		let direction = classify(prior, balance)?;

		record_change(ChangeOutcome::Detected, &self.network_id, direction);
		if !self.policy.allows(direction) {
			record_change(ChangeOutcome::Suppressed, &self.network_id, direction);
			tracing::debug!(
				"Balance {} of {} not notified, disabled for this subscription",
				direction,
				self.subscription.name
			);
			return None;
		}

		tracing::info!(
			"Balance {} detected for {} ({}): {} -> {}",
			direction,
			self.subscription.name,
			self.subscription.address,
			prior,
			balance
		);
		Some(BalanceChangeEvent {
			name: self.subscription.name.clone(),
			address: self.subscription.address.clone(),
			network_id: self.network_id.clone(),
			direction,
		})
	}

	async fn run(
		mut self,
		mut stream: BalanceSubscription,
		queue: DeliveryQueue,
		mut shutdown: watch::Receiver<bool>,
	) {
		loop {
			if *shutdown.borrow() {
				break;
			}
			tokio::select! {
				changed = shutdown.changed() => {
					if changed.is_err() {
						break;
					}
				}
				next = stream.next() => {
					match next {
						Some(balance) => {
							if let Some(event) = self.on_balance(balance) {
								queue.enqueue(event);
							}
						}
						None => {
							tracing::warn!(
								"Balance stream for {} ended, no longer watching",
								self.subscription.name
							);
							break;
						}
					}
				}
			}
		}

		stream.cancel();
		queue.close().await;
		tracing::debug!("Stopped watching {}", self.subscription.name);
	}
}

/// Watches the balances of all subscribed accounts on one network
pub struct BalanceChangeService {
	source: Arc<dyn BalanceSource>,
	notifier: DelayedNotifier,
	network_id: String,
	subscriber: SubscriberConfig,
	shutdown: watch::Sender<bool>,
	watchers: Mutex<Vec<JoinHandle<()>>>,
}

impl BalanceChangeService {
	/// Creates a new balance change service
	///
	/// # Arguments
	/// * `source` - Where balances are read and streamed from
	/// * `notifier` - Delivery target for changes
	/// * `network_id` - Network slug reported with every change
	/// * `subscriber` - Accounts to watch and their module settings
	/// * `delays` - Delivery delays per direction
	pub fn new(
		source: Arc<dyn BalanceSource>,
		notifier: Arc<dyn Notifier>,
		network_id: impl Into<String>,
		subscriber: SubscriberConfig,
		delays: DelayConfig,
	) -> Self {
		let (shutdown, _) = watch::channel(false);
		Self {
			source,
			notifier: DelayedNotifier::new(notifier, delays),
			network_id: network_id.into(),
			subscriber,
			shutdown,
			watchers: Mutex::new(Vec::new()),
		}
	}

	/// Creates the service described by a watcher configuration
	pub fn from_config(
		source: Arc<dyn BalanceSource>,
		notifier: Arc<dyn Notifier>,
		config: &WatcherConfig,
	) -> Self {
		Self::new(
			source,
			notifier,
			config.network.as_str(),
			config.subscriber.clone(),
			config.delays,
		)
	}

	pub fn network_id(&self) -> &str {
		&self.network_id
	}

	async fn prepare(
		&self,
		subscription: &Subscription,
	) -> Result<(AccountWatcher, BalanceSubscription), BalanceMonitorError> {
		let metadata = || {
			Some(HashMap::from([
				("account".to_string(), subscription.name.clone()),
				("network".to_string(), self.network_id.clone()),
			]))
		};

		let mut watcher = AccountWatcher::new(
			subscription,
			&self.network_id,
			self.subscriber.balance_change_defaults(),
		);
		let baseline = watcher
			.tracker
			.initialize(self.source.as_ref())
			.await
			.map_err(|e| {
				BalanceMonitorError::source_error(
					format!("Failed to initialize balance of {}", subscription.name),
					Some(Box::new(e)),
					metadata(),
				)
			})?;

		let stream = self
			.source
			.subscribe(&subscription.address)
			.await
			.map_err(|e| {
				BalanceMonitorError::source_error(
					format!("Failed to open balance stream for {}", subscription.name),
					Some(Box::new(e)),
					metadata(),
				)
			})?;

		tracing::debug!(
			"Watching {} ({}) from baseline {}, policy {:?}",
			subscription.name,
			subscription.address,
			baseline,
			watcher.policy
		);
		Ok((watcher, stream))
	}

	/// Reads every account's baseline, opens its stream and starts watching
	///
	/// Returns once all accounts are being watched. Any failed initial read
	/// fails the whole call and nothing is watched.
	///
	/// # Returns
	/// * `Result<usize, BalanceMonitorError>` - Number of watched accounts
	#[instrument(skip(self), fields(network = %self.network_id))]
	pub async fn subscribe(&self) -> Result<usize, BalanceMonitorError> {
		let mut watchers = self.watchers.lock().await;
		if !watchers.is_empty() {
			return Err(BalanceMonitorError::subscription_error(
				"Balance changes are already being watched",
				None,
				None,
			));
		}
		if *self.shutdown.borrow() {
			return Err(BalanceMonitorError::subscription_error(
				"Balance change service has been stopped",
				None,
				None,
			));
		}

		let prepared = try_join_all(
			self.subscriber
				.subscriptions
				.iter()
				.map(|subscription| self.prepare(subscription)),
		)
		.await?;

		for (watcher, stream) in prepared {
			watchers.push(tokio::spawn(watcher.run(
				stream,
				self.notifier.queue(),
				self.shutdown.subscribe(),
			)));
		}

		SUBSCRIPTIONS_ACTIVE.set(watchers.len() as f64);
		tracing::info!(
			"Watching balances of {} account(s) on {}",
			watchers.len(),
			self.network_id
		);
		Ok(watchers.len())
	}

	/// Stops all watchers and waits for their pending notifications
	pub async fn stop(&self) {
		self.shutdown.send_replace(true);

		let handles = std::mem::take(&mut *self.watchers.lock().await);
		for handle in handles {
			if let Err(e) = handle.await {
				if e.is_panic() {
					tracing::error!("Balance watcher task panicked: {}", e);
				}
			}
		}

		SUBSCRIPTIONS_ACTIVE.set(0.0);
		tracing::info!("Stopped watching balances on {}", self.network_id);
	}
}
