//! Balance change watching.
//!
//! - `classifier`: Direction of a balance change
//! - `delayed`: Delayed, ordered notification delivery
//! - `error`: Error types
//! - `policy`: Which directions a subscription is notified about
//! - `service`: Per account watcher orchestration
//! - `source`: Balance reads and streams
//! - `tracker`: Last known balance per account

mod classifier;
mod delayed;
mod error;
mod policy;
mod service;
mod source;
mod tracker;

pub use classifier::classify;
pub use delayed::{DelayedNotifier, DeliveryQueue};
pub use error::BalanceMonitorError;
pub use policy::NotificationPolicy;
pub use service::BalanceChangeService;
pub use source::{BalanceSource, BalanceSubscription, PollingBalanceSource};
pub use tracker::{BaselineTracker, TrackerState};
