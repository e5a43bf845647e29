//! Active/fallback RPC endpoint rotation
//!
//! Requests go to the active URL. Rate limiting (HTTP 429) and network
//! failures switch to the first reachable fallback and retry there; the
//! previously active URL moves to the back of the fallback list.

use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};

use crate::services::blockchain::transports::{
	RotatingTransport, TransportError, ROTATE_ON_ERROR_CODES,
};

#[derive(Debug, Clone)]
struct Endpoints {
	active: String,
	fallbacks: Vec<String>,
}

/// Manages the rotation of JSON-RPC endpoints
#[derive(Clone, Debug)]
pub struct EndpointManager {
	endpoints: Arc<RwLock<Endpoints>>,
	client: ClientWithMiddleware,
	rotation_lock: Arc<Mutex<()>>,
}

/// Result of sending one request to one URL
enum Attempt {
	Response(reqwest::Response),
	Network(reqwest_middleware::Error),
}

impl EndpointManager {
	pub fn new(client: ClientWithMiddleware, active_url: &str, fallback_urls: Vec<String>) -> Self {
		Self {
			endpoints: Arc::new(RwLock::new(Endpoints {
				active: active_url.to_string(),
				fallbacks: fallback_urls,
			})),
			client,
			rotation_lock: Arc::new(Mutex::new(())),
		}
	}

	pub async fn active_url(&self) -> String {
		self.endpoints.read().await.active.clone()
	}

	pub async fn fallback_urls(&self) -> Vec<String> {
		self.endpoints.read().await.fallbacks.clone()
	}

	pub(crate) async fn set_active_url(&self, url: &str) {
		self.endpoints.write().await.active = url.to_string();
	}

	/// Switches to the first fallback that accepts a connection
	///
	/// Returns the new active URL.
	pub async fn try_rotate_url<T: RotatingTransport>(
		&self,
		transport: &T,
	) -> Result<String, TransportError> {
		let _guard = self.rotation_lock.lock().await;
		let Endpoints { active, fallbacks } = self.endpoints.read().await.clone();

		let candidates: Vec<&String> = fallbacks.iter().filter(|url| **url != active).collect();
		if candidates.is_empty() {
			return Err(TransportError::url_rotation(
				format!("No fallback URLs available for '{}'", active),
				None,
				None,
			));
		}

		let mut last_error = None;
		for candidate in candidates {
			tracing::debug!("Trying to rotate RPC URL from '{}' to '{}'", active, candidate);

			if let Err(e) = transport.try_connect(candidate).await {
				tracing::debug!("Fallback '{}' rejected: {}", candidate, e);
				last_error = Some(e);
				continue;
			}
			transport.update_client(candidate).await.map_err(|e| {
				TransportError::url_rotation(
					format!("Failed to switch transport to '{}'", candidate),
					Some(e.into()),
					None,
				)
			})?;

			let mut endpoints = self.endpoints.write().await;
			endpoints.fallbacks.retain(|url| url != candidate);
			endpoints.fallbacks.push(active.clone());
			endpoints.active = candidate.clone();

			tracing::info!("Rotated RPC URL from '{}' to '{}'", active, candidate);
			return Ok(candidate.clone());
		}

		Err(TransportError::url_rotation(
			format!("No reachable fallback URL for '{}'", active),
			last_error.map(|e| e.into()),
			None,
		))
	}

	async fn attempt(&self, url: &str, body: Vec<u8>) -> Attempt {
		match self
			.client
			.post(url)
			.header("Content-Type", "application/json")
			.body(body)
			.send()
			.await
		{
			Ok(response) => Attempt::Response(response),
			Err(e) => Attempt::Network(e),
		}
	}

	/// Sends a JSON-RPC request through the transport, rotating endpoints on
	/// rate limiting and network failures
	pub async fn send_raw_request<T: RotatingTransport>(
		&self,
		transport: &T,
		method: &str,
		params: Option<Value>,
	) -> Result<Value, TransportError> {
		let request = transport.customize_request(method, params);
		let body = serde_json::to_vec(&request).map_err(|e| {
			TransportError::request_serialization(
				"Failed to serialize request JSON",
				Some(Box::new(e)),
				Some(HashMap::from([("method".to_string(), method.to_string())])),
			)
		})?;

		// Every endpoint gets at most one attempt per request
		let mut rotations_left = self.fallback_urls().await.len();

		loop {
			let url = self.active_url().await;

			match self.attempt(&url, body.clone()).await {
				Attempt::Response(response) if response.status().is_success() => {
					return response.json().await.map_err(|e| {
						TransportError::response_parse(
							"Failed to parse JSON response",
							Some(Box::new(e)),
							Some(HashMap::from([("method".to_string(), method.to_string())])),
						)
					});
				}
				Attempt::Response(response) => {
					let status = response.status();
					let error_body = response.text().await.unwrap_or_default();

					if !ROTATE_ON_ERROR_CODES.contains(&status.as_u16()) || rotations_left == 0 {
						return Err(TransportError::http(status, url, error_body, None, None));
					}
					rotations_left -= 1;

					tracing::warn!("Request to {} rate limited ({}), rotating", url, status);
					if let Err(rotation_error) = self.try_rotate_url(transport).await {
						return Err(TransportError::http(
							status,
							url,
							error_body,
							Some(Box::new(rotation_error)),
							None,
						));
					}
				}
				Attempt::Network(network_error) => {
					tracing::warn!("Network error for {}: {}", url, network_error);
					if rotations_left == 0 {
						return Err(TransportError::network(
							network_error.to_string(),
							Some(Box::new(network_error)),
							Some(HashMap::from([("url".to_string(), url)])),
						));
					}
					rotations_left -= 1;

					if let Err(rotation_error) = self.try_rotate_url(transport).await {
						return Err(TransportError::network(
							network_error.to_string(),
							Some(Box::new(rotation_error)),
							Some(HashMap::from([("url".to_string(), url)])),
						));
					}
				}
			}
		}
	}
}
