//! Matrixbot notification implementation.
//!
//! Matrixbot relays Alertmanager webhook messages into a Matrix room, so a
//! balance change is sent as a single firing alert.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::DefaultRetryableStrategy;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc, time::Duration};

use crate::{
	models::{BalanceChangeEvent, MatrixbotConfig},
	services::notification::{NotificationError, Notifier},
	utils::create_retryable_http_client,
};

const RECEIVER: &str = "webhook";
const STATUS_FIRING: &str = "firing";
const ALERT_NAME: &str = "BalanceChange";
const SEVERITY: &str = "info";
const MESSAGE_VERSION: &str = "4";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertLabels {
	pub alertname: String,
	pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertAnnotations {
	pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixbotAlert {
	pub status: String,
	pub labels: AlertLabels,
	pub annotations: AlertAnnotations,
}

/// Alertmanager webhook message as accepted by Matrixbot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixbotMsg {
	pub receiver: String,
	pub status: String,
	pub alerts: Vec<MatrixbotAlert>,
	pub version: String,
}

impl MatrixbotMsg {
	/// Builds the message announcing a balance change
	pub fn balance_change(event: &BalanceChangeEvent) -> Self {
		let description = format!(
			"New balance change on {}: {} funds on account {} ({})",
			event.network_id,
			event.tx_type(),
			event.name,
			event.address
		);

		Self {
			receiver: RECEIVER.to_string(),
			status: STATUS_FIRING.to_string(),
			alerts: vec![MatrixbotAlert {
				status: STATUS_FIRING.to_string(),
				labels: AlertLabels {
					alertname: ALERT_NAME.to_string(),
					severity: SEVERITY.to_string(),
				},
				annotations: AlertAnnotations { description },
			}],
			version: MESSAGE_VERSION.to_string(),
		}
	}
}

/// Delivers balance changes to a Matrixbot webhook
#[derive(Debug, Clone)]
pub struct MatrixbotNotifier {
	/// Webhook endpoint of the bot
	pub endpoint: String,
	/// HTTP client with retries
	pub client: Arc<ClientWithMiddleware>,
}

impl MatrixbotNotifier {
	/// Creates a notifier with its own retrying HTTP client
	pub fn new(config: &MatrixbotConfig) -> Result<Self, NotificationError> {
		let base_client = reqwest::Client::builder()
			.timeout(Duration::from_secs(30))
			.build()
			.map_err(|e| {
				NotificationError::internal_error(
					"Failed to create HTTP client",
					Some(Box::new(e)),
					None,
				)
			})?;

		let client = create_retryable_http_client::<DefaultRetryableStrategy>(
			&config.retry_policy,
			base_client,
			None,
		);

		Self::with_client(&config.endpoint, Arc::new(client))
	}

	/// Creates a notifier that sends through an existing client
	pub fn with_client(
		endpoint: &str,
		client: Arc<ClientWithMiddleware>,
	) -> Result<Self, NotificationError> {
		url::Url::parse(endpoint).map_err(|e| {
			NotificationError::config_error(
				format!("Invalid Matrixbot endpoint: {}", endpoint),
				Some(Box::new(e)),
				None,
			)
		})?;

		Ok(Self {
			endpoint: endpoint.to_string(),
			client,
		})
	}

	fn event_metadata(event: &BalanceChangeEvent) -> Option<HashMap<String, String>> {
		Some(HashMap::from([
			("account".to_string(), event.name.clone()),
			("address".to_string(), event.address.clone()),
			("network".to_string(), event.network_id.clone()),
			("direction".to_string(), event.direction.to_string()),
		]))
	}

	/// Posts a message and returns the trimmed response body
	pub async fn send(&self, message: &MatrixbotMsg) -> Result<String, NotificationError> {
		let mut headers = HeaderMap::new();
		headers.insert(
			HeaderName::from_static("content-type"),
			HeaderValue::from_static("application/json"),
		);

		let response = self
			.client
			.post(self.endpoint.as_str())
			.headers(headers)
			.json(message)
			.send()
			.await
			.map_err(|e| {
				NotificationError::network_error(
					format!("Failed to send Matrixbot request: {}", e),
					Some(e.into()),
					None,
				)
			})?;

		let status = response.status();
		let body = response.text().await.unwrap_or_default();

		if !status.is_success() {
			return Err(NotificationError::notify_failed(
				format!("Matrixbot request failed with status: {}", status),
				None,
				Some(HashMap::from([("body".to_string(), body)])),
			));
		}

		Ok(body.trim().to_string())
	}
}

#[async_trait::async_trait]
impl Notifier for MatrixbotNotifier {
	async fn new_balance_change(
		&self,
		event: &BalanceChangeEvent,
	) -> Result<String, NotificationError> {
		let message = MatrixbotMsg::balance_change(event);
		tracing::debug!(
			"Sending balance change for {} to Matrixbot: {:?}",
			event.name,
			message
		);

		self.send(&message).await.map_err(|e| match e {
			NotificationError::NetworkError(_) => e,
			other => NotificationError::notify_failed(
				"Balance change notification rejected",
				Some(Box::new(other)),
				Self::event_metadata(event),
			),
		})
	}
}
