use alloy::primitives::U256;
use balance_monitor::models::{Balance, SubscriptionModuleConfig};
use proptest::{option, prelude::*};

/// Balances across the whole U256 range, including the edges
pub fn balance_strategy() -> impl Strategy<Value = Balance> {
	prop_oneof![
		Just(U256::ZERO),
		Just(U256::MAX),
		any::<u64>().prop_map(U256::from),
		any::<[u8; 32]>().prop_map(U256::from_be_bytes),
	]
}

/// Balance sequences as a node would report them, with frequent repeats
pub fn balance_history_strategy(max_len: usize) -> impl Strategy<Value = Vec<Balance>> {
	prop::collection::vec(
		prop_oneof![
			3 => (0u64..5).prop_map(U256::from),
			1 => balance_strategy(),
		],
		0..max_len,
	)
}

pub fn module_config_strategy() -> impl Strategy<Value = SubscriptionModuleConfig> {
	(
		option::of(any::<bool>()),
		option::of(any::<bool>()),
		option::of(any::<bool>()),
	)
		.prop_map(|(enabled, sent, received)| SubscriptionModuleConfig {
			enabled,
			sent,
			received,
		})
}
