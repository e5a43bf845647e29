//! Notification delivery.
//!
//! A [`Notifier`] accepts a classified balance change and returns an
//! identifier for the delivered notification. [`MatrixbotNotifier`] posts
//! Alertmanager-style messages to a Matrixbot webhook.

use async_trait::async_trait;

mod error;
mod matrixbot;

use crate::models::BalanceChangeEvent;

pub use error::NotificationError;
pub use matrixbot::{MatrixbotAlert, MatrixbotMsg, MatrixbotNotifier};

/// Destination for balance change notifications
///
/// Implementations must tolerate concurrent calls; every watched account
/// delivers through the same notifier.
#[async_trait]
pub trait Notifier: Send + Sync {
	/// Delivers one balance change
	///
	/// # Returns
	/// * `Result<String, NotificationError>` - Delivery identifier or error
	async fn new_balance_change(
		&self,
		event: &BalanceChangeEvent,
	) -> Result<String, NotificationError>;
}
