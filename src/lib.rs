//! Account balance monitoring and notification service.
//!
//! Watches a set of named accounts on an EVM network and reports every change
//! of their balance to a Matrixbot webhook. It includes:
//!
//! - Configuration management through JSON files
//! - Per account baseline tracking and change classification
//! - Per subscription notification settings
//! - Delayed, per account ordered delivery
//!
//! # Module Structure
//!
//! - `bootstrap`: Loads configuration and wires the services
//! - `models`: Data structures for configuration and balance changes
//! - `services`: Core business logic and blockchain interaction
//! - `utils`: Common utilities and helper functions

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
