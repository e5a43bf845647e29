//! Balance monitoring error types.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Represents errors that can occur while watching balances
#[derive(ThisError, Debug)]
pub enum BalanceMonitorError {
	/// Reading a balance or opening a balance stream failed
	#[error("Source error: {0}")]
	SourceError(ErrorContext),

	/// Subscribing or stopping the watcher failed
	#[error("Subscription error: {0}")]
	SubscriptionError(ErrorContext),

	/// Internal errors within the balance service
	#[error("Internal error: {0}")]
	InternalError(ErrorContext),

	/// Other errors that don't fit into the categories above
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl BalanceMonitorError {
	/// Source errors are logged by whoever decides they are fatal
	pub fn source_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::SourceError(ErrorContext::new(msg, source, metadata))
	}

	pub fn subscription_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::SubscriptionError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn internal_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InternalError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for BalanceMonitorError {
	fn trace_id(&self) -> String {
		match self {
			Self::SourceError(ctx) => ctx.trace_id.clone(),
			Self::SubscriptionError(ctx) => ctx.trace_id.clone(),
			Self::InternalError(ctx) => ctx.trace_id.clone(),
			Self::Other(_) => Uuid::new_v4().to_string(),
		}
	}
}
