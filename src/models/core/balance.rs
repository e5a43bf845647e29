use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free balance of an account in the chain's smallest unit
pub type Balance = U256;

/// Sign of a non-zero balance delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceDirection {
	Increase,
	Decrease,
}

impl BalanceDirection {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Increase => "increase",
			Self::Decrease => "decrease",
		}
	}

	/// The transfer kind a change in this direction reports
	pub fn transaction_type(&self) -> TransactionType {
		match self {
			Self::Increase => TransactionType::Received,
			Self::Decrease => TransactionType::Sent,
		}
	}
}

impl fmt::Display for BalanceDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Transfer kind as reported to the notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
	Received,
	Sent,
}

impl fmt::Display for TransactionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Received => f.write_str("Received"),
			Self::Sent => f.write_str("Sent"),
		}
	}
}

/// A detected, classified balance change for one subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChangeEvent {
	/// Subscription name
	pub name: String,

	/// Account address
	pub address: String,

	/// Slug of the network the change was observed on
	pub network_id: String,

	pub direction: BalanceDirection,
}

impl BalanceChangeEvent {
	pub fn tx_type(&self) -> TransactionType {
		self.direction.transaction_type()
	}
}
