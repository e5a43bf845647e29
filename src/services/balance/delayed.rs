//! Delayed delivery of balance change notifications.
//!
//! Each change is held back by a direction specific delay measured from the
//! moment it was detected. Detection never waits on delivery: changes are
//! handed to a per-account [`DeliveryQueue`] which delivers them in detection
//! order.

use std::{sync::Arc, time::Duration};
use tokio::{
	sync::mpsc,
	task::JoinHandle,
	time::{sleep_until, Instant},
};

use crate::{
	models::{BalanceChangeEvent, BalanceDirection, DelayConfig},
	services::notification::Notifier,
	utils::{
		logging::error::TraceableError,
		metrics::{record_change, ChangeOutcome},
	},
};

/// Wraps a notifier with per direction delivery delays
#[derive(Clone)]
pub struct DelayedNotifier {
	notifier: Arc<dyn Notifier>,
	delays: DelayConfig,
}

impl DelayedNotifier {
	pub fn new(notifier: Arc<dyn Notifier>, delays: DelayConfig) -> Self {
		Self { notifier, delays }
	}

	pub fn delay_for(&self, direction: BalanceDirection) -> Duration {
		match direction {
			BalanceDirection::Increase => self.delays.increase(),
			BalanceDirection::Decrease => self.delays.decrease(),
		}
	}

	/// Waits out the delay from now, then delivers
	pub async fn notify(&self, event: BalanceChangeEvent) -> Option<String> {
		self.notify_at(event, Instant::now()).await
	}

	/// Waits until `detected_at` plus the delay for the event's direction, then delivers
	///
	/// Delivery failures are logged and swallowed.
	///
	/// # Returns
	/// * `Option<String>` - The notifier's delivery id when delivery succeeded
	pub async fn notify_at(&self, event: BalanceChangeEvent, detected_at: Instant) -> Option<String> {
		sleep_until(detected_at + self.delay_for(event.direction)).await;

		match self.notifier.new_balance_change(&event).await {
			Ok(id) => {
				record_change(ChangeOutcome::Delivered, &event.network_id, event.direction);
				tracing::info!(
					"Balance {} notification for {} ({}) delivered: {}",
					event.direction,
					event.name,
					event.address,
					id
				);
				Some(id)
			}
			Err(e) => {
				record_change(ChangeOutcome::Failed, &event.network_id, event.direction);
				tracing::error!(
					trace_id = %e.trace_id(),
					account = %event.name,
					address = %event.address,
					direction = %event.direction,
					"Failed to deliver balance change notification: {}",
					e
				);
				None
			}
		}
	}

	/// Starts an ordered delivery queue for one account
	pub fn queue(&self) -> DeliveryQueue {
		let (sender, mut receiver) = mpsc::unbounded_channel::<(BalanceChangeEvent, Instant)>();
		let notifier = self.clone();

		let worker = tokio::spawn(async move {
			while let Some((event, detected_at)) = receiver.recv().await {
				notifier.notify_at(event, detected_at).await;
			}
		});

		DeliveryQueue { sender, worker }
	}
}

/// Delivers one account's changes strictly in the order they were detected
pub struct DeliveryQueue {
	sender: mpsc::UnboundedSender<(BalanceChangeEvent, Instant)>,
	worker: JoinHandle<()>,
}

impl DeliveryQueue {
	/// Queues a change detected now
	pub fn enqueue(&self, event: BalanceChangeEvent) {
		self.enqueue_at(event, Instant::now());
	}

	pub fn enqueue_at(&self, event: BalanceChangeEvent, detected_at: Instant) {
		if self.sender.send((event, detected_at)).is_err() {
			tracing::warn!("Delivery queue closed, dropping balance change notification");
		}
	}

	/// Stops accepting changes and waits for the pending ones to be delivered
	pub async fn close(self) {
		let Self { sender, worker } = self;
		drop(sender);
		if let Err(e) = worker.await {
			if !e.is_cancelled() {
				tracing::error!("Delivery queue worker failed: {}", e);
			}
		}
	}
}
