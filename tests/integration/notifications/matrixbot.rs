use mockito::Matcher;
use serde_json::json;
use std::{sync::Arc, time::Duration};

use balance_monitor::{
	models::{BalanceChangeEvent, BalanceDirection, DelayConfig, MatrixbotConfig},
	services::{
		balance::DelayedNotifier,
		notification::{MatrixbotNotifier, NotificationError, Notifier},
	},
	utils::{JitterSetting, RetryConfig},
};

fn bob_increase() -> BalanceChangeEvent {
	BalanceChangeEvent {
		name: "bob".to_string(),
		address: "0x0000000000000000000000000000000000000002".to_string(),
		network_id: "ethereum_mainnet".to_string(),
		direction: BalanceDirection::Increase,
	}
}

fn config(endpoint: String) -> MatrixbotConfig {
	MatrixbotConfig {
		endpoint,
		retry_policy: RetryConfig {
			max_retries: 0,
			jitter: JitterSetting::None,
			..RetryConfig::default()
		},
	}
}

#[tokio::test]
async fn test_configured_notifier_sends_full_message() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("POST", "/alerts")
		.match_body(Matcher::Json(json!({
			"receiver": "webhook",
			"status": "firing",
			"alerts": [{
				"status": "firing",
				"labels": { "alertname": "BalanceChange", "severity": "info" },
				"annotations": {
					"description": "New balance change on ethereum_mainnet: Received funds on account bob (0x0000000000000000000000000000000000000002)"
				}
			}],
			"version": "4"
		})))
		.with_status(200)
		.with_body("ok")
		.expect(1)
		.create_async()
		.await;

	let notifier = MatrixbotNotifier::new(&config(format!("{}/alerts", server.url()))).unwrap();
	let id = notifier.new_balance_change(&bob_increase()).await.unwrap();

	assert_eq!(id, "ok");
	mock.assert();
}

#[tokio::test]
async fn test_configured_notifier_rejects_invalid_endpoint() {
	let result = MatrixbotNotifier::new(&config("matrixbot without scheme".to_string()));
	assert!(matches!(result, Err(NotificationError::ConfigError(_))));
}

#[tokio::test]
async fn test_delayed_delivery_through_matrixbot() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_status(200)
		.with_body("accepted")
		.expect(1)
		.create_async()
		.await;

	let notifier = MatrixbotNotifier::new(&config(server.url())).unwrap();
	let delayed = DelayedNotifier::new(
		Arc::new(notifier),
		DelayConfig {
			balance_increase_ms: 50,
			balance_decrease_ms: 100,
		},
	);

	let started = tokio::time::Instant::now();
	let id = delayed.notify(bob_increase()).await;

	assert_eq!(id, Some("accepted".to_string()));
	assert!(started.elapsed() >= Duration::from_millis(50));
	mock.assert();
}

#[tokio::test]
async fn test_rejected_delivery_is_reported_as_none() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_status(400)
		.with_body("unknown receiver")
		.expect(1)
		.create_async()
		.await;

	let notifier = MatrixbotNotifier::new(&config(server.url())).unwrap();
	let delayed = DelayedNotifier::new(
		Arc::new(notifier),
		DelayConfig {
			balance_increase_ms: 0,
			balance_decrease_ms: 0,
		},
	);

	assert_eq!(delayed.notify(bob_increase()).await, None);
	mock.assert();
}
