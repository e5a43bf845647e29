use serde::{Deserialize, Serialize};

/// Enable switches for one subscription module.
///
/// Used both module-wide (as defaults) and per subscription (as overrides).
/// An unset field defers to the other level.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionModuleConfig {
	/// Turns the module off for both directions when `false`
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub enabled: Option<bool>,

	/// Whether outgoing transfers (balance decreases) are notified
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sent: Option<bool>,

	/// Whether incoming transfers (balance increases) are notified
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub received: Option<bool>,
}

/// A watched account
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Subscription {
	/// Human label, unique across subscriptions
	pub name: String,

	/// Account address, unique across subscriptions
	pub address: String,

	/// Override for the transfer event module
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transfer_event: Option<SubscriptionModuleConfig>,

	/// Override for the balance change module
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub balance_change: Option<SubscriptionModuleConfig>,

	/// Override for the transfer extrinsic module
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transfer_extrinsic: Option<SubscriptionModuleConfig>,
}

/// Module-wide defaults.
///
/// Only `balance_change` is consumed here. The other keys keep configuration
/// files shared with the event and extrinsic watchers loadable.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ModulesConfig {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transfer_event: Option<SubscriptionModuleConfig>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub balance_change: Option<SubscriptionModuleConfig>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transfer_extrinsic: Option<SubscriptionModuleConfig>,
}

/// The list of watched accounts plus module defaults
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SubscriberConfig {
	pub subscriptions: Vec<Subscription>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub modules: Option<ModulesConfig>,
}

impl SubscriberConfig {
	/// Module-wide defaults for the balance change module, if configured
	pub fn balance_change_defaults(&self) -> Option<&SubscriptionModuleConfig> {
		self.modules
			.as_ref()
			.and_then(|modules| modules.balance_change.as_ref())
	}
}
