//! Balance change classification.

use std::cmp::Ordering;

use crate::models::{Balance, BalanceDirection};

/// Classifies the change from `prior` to `current`.
///
/// Comparison is exact; equal balances produce no direction.
pub fn classify(prior: Balance, current: Balance) -> Option<BalanceDirection> {
	match current.cmp(&prior) {
		Ordering::Greater => Some(BalanceDirection::Increase),
		Ordering::Less => Some(BalanceDirection::Decrease),
		Ordering::Equal => None,
	}
}
