//! Per subscription notification policy.
//!
//! Module-wide defaults are merged with subscription overrides, field by
//! field. An explicit `enabled: false` at either level turns the module off
//! for the subscription.

use crate::models::{BalanceDirection, SubscriptionModuleConfig};

/// Which directions are notified for one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPolicy {
	pub sent: bool,
	pub received: bool,
}

impl Default for NotificationPolicy {
	fn default() -> Self {
		Self {
			sent: true,
			received: true,
		}
	}
}

impl NotificationPolicy {
	/// Resolves the policy for one subscription
	///
	/// # Arguments
	/// * `module` - Module-wide defaults, if configured
	/// * `subscription` - The subscription's own override, if configured
	pub fn resolve(
		module: Option<&SubscriptionModuleConfig>,
		subscription: Option<&SubscriptionModuleConfig>,
	) -> Self {
		let disabled = [module, subscription]
			.into_iter()
			.flatten()
			.any(|config| config.enabled == Some(false));
		if disabled {
			return Self {
				sent: false,
				received: false,
			};
		}

		let pick = |field: fn(&SubscriptionModuleConfig) -> Option<bool>| {
			subscription
				.and_then(field)
				.or_else(|| module.and_then(field))
				.unwrap_or(true)
		};

		Self {
			sent: pick(|config| config.sent),
			received: pick(|config| config.received),
		}
	}

	/// Whether a change in `direction` should be delivered
	pub fn allows(&self, direction: BalanceDirection) -> bool {
		match direction {
			BalanceDirection::Increase => self.received,
			BalanceDirection::Decrease => self.sent,
		}
	}
}
