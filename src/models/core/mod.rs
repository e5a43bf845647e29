//! Core domain models for the balance watcher.
//!
//! This module contains the fundamental data structures that represent:
//! - Networks: chain connection details
//! - Subscriptions: watched accounts and their notification switches
//! - Balances: balance values, change directions and change events
//! - Watcher: top level watcher configuration

mod balance;
mod network;
mod subscription;
mod watcher;

pub use balance::{Balance, BalanceChangeEvent, BalanceDirection, TransactionType};
pub use network::{Network, RpcUrl};
pub use subscription::{ModulesConfig, SubscriberConfig, Subscription, SubscriptionModuleConfig};
pub use watcher::{DelayConfig, MatrixbotConfig, WatcherConfig};
