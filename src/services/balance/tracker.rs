//! Last known balance tracking for a watched account.
//!
//! A [`BaselineTracker`] moves through three states:
//! - `Uninitialized` until the initial balance read completes
//! - `BaselineSet` once that read is stored
//! - `Tracking` after the first live observation
//!
//! The first live observation only refreshes the baseline. Balance streams
//! replay the current value on subscription, so classifying it would report
//! a change that never happened.

use std::collections::HashMap;

use crate::{
	models::Balance,
	services::balance::{error::BalanceMonitorError, source::BalanceSource},
};

/// Lifecycle of a tracked account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
	Uninitialized,
	BaselineSet,
	Tracking,
}

/// Holds the last known balance of one account
#[derive(Debug, Clone)]
pub struct BaselineTracker {
	address: String,
	last_known: Option<Balance>,
	state: TrackerState,
}

impl BaselineTracker {
	pub fn new(address: impl Into<String>) -> Self {
		Self {
			address: address.into(),
			last_known: None,
			state: TrackerState::Uninitialized,
		}
	}

	pub fn address(&self) -> &str {
		&self.address
	}

	pub fn state(&self) -> TrackerState {
		self.state
	}

	/// Last known balance, if a baseline has been recorded
	pub fn baseline(&self) -> Option<Balance> {
		self.last_known
	}

	/// Reads the current balance once and records it as the baseline
	///
	/// # Arguments
	/// * `source` - Where the balance is read from
	///
	/// # Returns
	/// * `Result<Balance, BalanceMonitorError>` - The recorded baseline
	pub async fn initialize<S>(&mut self, source: &S) -> Result<Balance, BalanceMonitorError>
	where
		S: BalanceSource + ?Sized,
	{
		let balance = source.read_current(&self.address).await.map_err(|e| {
			BalanceMonitorError::source_error(
				format!("Failed to read initial balance of {}", self.address),
				Some(Box::new(e)),
				Some(HashMap::from([(
					"address".to_string(),
					self.address.clone(),
				)])),
			)
		})?;

		self.last_known = Some(balance);
		self.state = TrackerState::BaselineSet;
		Ok(balance)
	}

	/// Replaces the stored balance and returns the one it replaced
	pub fn update(&mut self, balance: Balance) -> Option<Balance> {
		self.last_known.replace(balance)
	}

	/// Records a live observation
	///
	/// # Returns
	/// * `Option<Balance>` - The prior balance to classify against, or `None`
	///   while the observation only establishes the baseline
	pub fn observe(&mut self, balance: Balance) -> Option<Balance> {
		match self.state {
			TrackerState::Uninitialized => {
				self.update(balance);
				self.state = TrackerState::BaselineSet;
				None
			}
			TrackerState::BaselineSet => {
				self.update(balance);
				self.state = TrackerState::Tracking;
				None
			}
			TrackerState::Tracking => self.update(balance),
		}
	}
}
