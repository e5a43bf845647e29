//! Domain models and data structures for balance watching.
//!
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (Network, Subscription, balance changes, watcher config)

mod config;
mod core;

pub use core::{
	Balance, BalanceChangeEvent, BalanceDirection, DelayConfig, MatrixbotConfig, ModulesConfig,
	Network, RpcUrl, SubscriberConfig, Subscription, SubscriptionModuleConfig, TransactionType,
	WatcherConfig,
};

pub use config::{ConfigError, ConfigLoader, DirectoryConfigLoader};
