use crate::properties::strategies::module_config_strategy;

use balance_monitor::{
	models::BalanceDirection,
	services::balance::NotificationPolicy,
};
use proptest::{option, prelude::*, test_runner::Config};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_disabled_at_any_level_blocks_both_directions(
		module in option::of(module_config_strategy()),
		subscription in option::of(module_config_strategy())
	) {
		let disabled = module.as_ref().and_then(|m| m.enabled) == Some(false)
			|| subscription.as_ref().and_then(|s| s.enabled) == Some(false);
		let policy = NotificationPolicy::resolve(module.as_ref(), subscription.as_ref());

		if disabled {
			prop_assert!(!policy.allows(BalanceDirection::Increase));
			prop_assert!(!policy.allows(BalanceDirection::Decrease));
		}
	}

	#[test]
	fn test_subscription_override_wins(
		module in option::of(module_config_strategy()),
		mut subscription in module_config_strategy(),
		sent in any::<bool>()
	) {
		subscription.enabled = None;
		subscription.sent = Some(sent);
		if let Some(module) = &module {
			prop_assume!(module.enabled != Some(false));
		}

		let policy = NotificationPolicy::resolve(module.as_ref(), Some(&subscription));
		prop_assert_eq!(policy.sent, sent);
		prop_assert_eq!(policy.allows(BalanceDirection::Decrease), sent);
	}

	#[test]
	fn test_unset_fields_default_to_notify(
		module in option::of(module_config_strategy())
	) {
		let policy = NotificationPolicy::resolve(module.as_ref(), None);
		let module_disabled = module.as_ref().and_then(|m| m.enabled) == Some(false);

		if !module_disabled {
			let expected_received = module.as_ref().and_then(|m| m.received).unwrap_or(true);
			prop_assert_eq!(policy.received, expected_received);
		}
	}
}
