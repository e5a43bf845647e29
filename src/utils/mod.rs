//! Utility modules for common functionality.
//!
//! - constants: Constants for the application
//! - http: Retryable HTTP client creation
//! - logging: Logging setup and traceable error context
//! - metrics: Prometheus metrics and the metrics server
//! - parsing: Parsing utilities
//! - tests: Test builders and helpers

pub mod constants;
pub mod http;
pub mod logging;
pub mod metrics;
pub mod parsing;
pub mod tests;

pub use constants::*;
pub use http::*;
pub use parsing::*;
