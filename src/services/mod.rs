//! Core services implementing the business logic.
//!
//! This module contains the main service implementations:
//! - `balance`: Balance change detection, filtering and delayed delivery
//! - `blockchain`: Blockchain client interfaces and implementations
//! - `notification`: Notifier interface and the Matrixbot notifier

pub mod balance;
pub mod blockchain;
pub mod notification;
