use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
	models::SubscriberConfig,
	utils::{
		constants::{DEFAULT_BALANCE_DECREASE_DELAY_MS, DEFAULT_BALANCE_INCREASE_DELAY_MS},
		RetryConfig,
	},
};

fn default_balance_increase_ms() -> u64 {
	DEFAULT_BALANCE_INCREASE_DELAY_MS
}

fn default_balance_decrease_ms() -> u64 {
	DEFAULT_BALANCE_DECREASE_DELAY_MS
}

/// Top level configuration of the balance watcher
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WatcherConfig {
	/// Slug of the network to watch
	pub network: String,

	/// Watched accounts and module defaults
	pub subscriber: SubscriberConfig,

	/// Where notifications are delivered
	pub matrixbot: MatrixbotConfig,

	#[serde(default)]
	pub delays: DelayConfig,
}

/// Matrixbot webhook settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MatrixbotConfig {
	/// Alertmanager webhook endpoint of the bot
	pub endpoint: String,

	#[serde(default)]
	pub retry_policy: RetryConfig,
}

/// Delivery delays per direction, in milliseconds.
///
/// Decreases wait longer so the receiving side of a transfer between two
/// watched accounts is announced first.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DelayConfig {
	#[serde(default = "default_balance_increase_ms")]
	pub balance_increase_ms: u64,

	#[serde(default = "default_balance_decrease_ms")]
	pub balance_decrease_ms: u64,
}

impl Default for DelayConfig {
	fn default() -> Self {
		Self {
			balance_increase_ms: default_balance_increase_ms(),
			balance_decrease_ms: default_balance_decrease_ms(),
		}
	}
}

impl DelayConfig {
	pub fn increase(&self) -> Duration {
		Duration::from_millis(self.balance_increase_ms)
	}

	pub fn decrease(&self) -> Duration {
		Duration::from_millis(self.balance_decrease_ms)
	}
}
