//! Notifiers for testing.
//!
//! - [`MockNotifier`] - mockall mock of the notifier trait
//! - [`RecordingNotifier`] - keeps every delivered event with its delivery time

use async_trait::async_trait;
use mockall::mock;
use std::sync::Mutex;
use tokio::time::Instant;

use balance_monitor::{
	models::BalanceChangeEvent,
	services::notification::{NotificationError, Notifier},
};

mock! {
	pub Notifier {}

	#[async_trait]
	impl Notifier for Notifier {
		async fn new_balance_change(
			&self,
			event: &BalanceChangeEvent,
		) -> Result<String, NotificationError>;
	}
}

#[derive(Default)]
pub struct RecordingNotifier {
	deliveries: Mutex<Vec<(BalanceChangeEvent, Instant)>>,
}

impl RecordingNotifier {
	pub fn deliveries(&self) -> Vec<(BalanceChangeEvent, Instant)> {
		self.deliveries.lock().unwrap().clone()
	}
}

#[async_trait]
impl Notifier for RecordingNotifier {
	async fn new_balance_change(
		&self,
		event: &BalanceChangeEvent,
	) -> Result<String, NotificationError> {
		let mut deliveries = self.deliveries.lock().unwrap();
		deliveries.push((event.clone(), Instant::now()));
		Ok(format!("delivery-{}", deliveries.len()))
	}
}
