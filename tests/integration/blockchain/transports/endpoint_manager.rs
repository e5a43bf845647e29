use mockito::{Matcher, Server};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde_json::json;

use balance_monitor::services::blockchain::{
	BlockchainTransport, EndpointManager, TransportError,
};

use crate::integration::mocks::{AlwaysFailsToUpdateClientTransport, MockTransport};

fn plain_client() -> ClientWithMiddleware {
	ClientBuilder::new(reqwest::Client::new()).build()
}

fn balance_response(result: &str) -> String {
	json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string()
}

#[tokio::test]
async fn test_rotation_to_reachable_fallback() {
	let primary = Server::new_async().await;
	let mut reachable = Server::new_async().await;
	let spare = Server::new_async().await;

	let probe = reachable
		.mock("GET", "/")
		.with_status(200)
		.create_async()
		.await;

	let manager = EndpointManager::new(
		plain_client(),
		primary.url().as_ref(),
		vec![reachable.url(), spare.url()],
	);
	let transport = MockTransport::new();

	let new_url = manager.try_rotate_url(&transport).await.unwrap();

	assert_eq!(new_url, reachable.url());
	assert_eq!(manager.active_url().await, reachable.url());
	assert_eq!(
		manager.fallback_urls().await,
		vec![spare.url(), primary.url()]
	);
	assert_eq!(*transport.current_url.read().await, reachable.url());
	probe.assert();
}

#[tokio::test]
async fn test_send_raw_request_success() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_header("content-type", "application/json")
		.match_body(Matcher::Json(json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": "eth_getBalance",
			"params": ["0x01", "latest"]
		})))
		.with_status(200)
		.with_body(balance_response("0x64"))
		.create_async()
		.await;

	let manager = EndpointManager::new(plain_client(), server.url().as_ref(), vec![]);
	let transport = MockTransport::new();

	let result = manager
		.send_raw_request(&transport, "eth_getBalance", Some(json!(["0x01", "latest"])))
		.await
		.unwrap();

	assert_eq!(result["result"], "0x64");
	mock.assert();
}

#[tokio::test]
async fn test_rotation_on_rate_limit() {
	let mut primary = Server::new_async().await;
	let mut fallback = Server::new_async().await;

	let limited = primary
		.mock("POST", "/")
		.with_status(429)
		.with_body("Rate limited")
		.expect(1)
		.create_async()
		.await;
	let _fallback_probe = fallback
		.mock("GET", "/")
		.with_status(200)
		.create_async()
		.await;
	let served = fallback
		.mock("POST", "/")
		.with_status(200)
		.with_body(balance_response("0x0"))
		.create_async()
		.await;

	let manager = EndpointManager::new(
		plain_client(),
		primary.url().as_ref(),
		vec![fallback.url()],
	);
	let transport = MockTransport::new();

	let result = manager
		.send_raw_request(&transport, "eth_blockNumber", None)
		.await
		.unwrap();

	assert_eq!(result["result"], "0x0");
	assert_eq!(manager.active_url().await, fallback.url());
	limited.assert();
	served.assert();
}

#[tokio::test]
async fn test_rate_limit_without_fallback() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_status(429)
		.with_body("Rate limited")
		.expect(1)
		.create_async()
		.await;

	let manager = EndpointManager::new(plain_client(), server.url().as_ref(), vec![]);
	let transport = MockTransport::new();

	let result = manager
		.send_raw_request(&transport, "eth_blockNumber", None)
		.await;

	match result {
		Err(TransportError::Http {
			status_code,
			url,
			body,
			..
		}) => {
			assert_eq!(status_code, 429);
			assert_eq!(url, server.url());
			assert_eq!(body, "Rate limited");
		}
		other => panic!("Expected Http error with status code 429, got {:?}", other),
	}
	mock.assert();
}

#[tokio::test]
async fn test_server_error_is_not_rotated() {
	let mut primary = Server::new_async().await;
	let fallback = Server::new_async().await;

	let failing = primary
		.mock("POST", "/")
		.with_status(500)
		.with_body("internal")
		.expect(1)
		.create_async()
		.await;

	let manager = EndpointManager::new(
		plain_client(),
		primary.url().as_ref(),
		vec![fallback.url()],
	);
	let transport = MockTransport::new();

	let result = manager
		.send_raw_request(&transport, "eth_blockNumber", None)
		.await;

	match result {
		Err(TransportError::Http { status_code, .. }) => assert_eq!(status_code, 500),
		other => panic!("Expected Http error with status code 500, got {:?}", other),
	}
	assert_eq!(manager.active_url().await, primary.url());
	failing.assert();
}

#[tokio::test]
async fn test_network_error_rotates_to_fallback() {
	let invalid_url = "http://invalid-domain-that-will-fail:12345";
	let mut fallback = Server::new_async().await;

	let _fallback_probe = fallback
		.mock("GET", "/")
		.with_status(200)
		.create_async()
		.await;
	let served = fallback
		.mock("POST", "/")
		.with_status(200)
		.with_body(balance_response("0x1"))
		.create_async()
		.await;

	let manager = EndpointManager::new(plain_client(), invalid_url, vec![fallback.url()]);
	let transport = MockTransport::new();

	let result = manager
		.send_raw_request(&transport, "eth_blockNumber", None)
		.await
		.unwrap();

	assert_eq!(result["result"], "0x1");
	assert_eq!(manager.active_url().await, fallback.url());
	assert_eq!(manager.fallback_urls().await, vec![invalid_url.to_string()]);
	served.assert();
}

#[tokio::test]
async fn test_network_error_without_fallback() {
	let invalid_url = "http://invalid-domain-that-will-fail:12345";
	let manager = EndpointManager::new(plain_client(), invalid_url, vec![]);
	let transport = MockTransport::new();

	let result = manager
		.send_raw_request(&transport, "eth_blockNumber", None)
		.await;

	match result {
		Err(TransportError::Network(ctx)) => {
			assert_eq!(
				ctx.metadata.as_ref().and_then(|m| m.get("url")),
				Some(&invalid_url.to_string())
			);
		}
		other => panic!("Expected Network error, got {:?}", other),
	}
}

#[tokio::test]
async fn test_invalid_json_response() {
	let mut server = Server::new_async().await;
	let _garbage = server
		.mock("POST", "/")
		.with_status(200)
		.with_body("not json")
		.create_async()
		.await;

	let manager = EndpointManager::new(plain_client(), server.url().as_ref(), vec![]);
	let transport = MockTransport::new();

	let result = manager
		.send_raw_request(&transport, "eth_blockNumber", None)
		.await;
	assert!(matches!(result, Err(TransportError::ResponseParse(_))));
}

#[tokio::test]
async fn test_rotate_url_no_fallbacks() {
	let server = Server::new_async().await;
	let manager = EndpointManager::new(plain_client(), server.url().as_ref(), vec![]);
	let transport = MockTransport::new();

	let result = manager.try_rotate_url(&transport).await;

	match result {
		Err(TransportError::UrlRotation(ctx)) => {
			assert!(ctx.to_string().contains("No fallback URLs available"));
		}
		other => panic!("Expected UrlRotation error, got {:?}", other),
	}
	assert_eq!(manager.active_url().await, server.url());
}

#[tokio::test]
async fn test_rotate_url_all_urls_match_active() {
	let server = Server::new_async().await;
	let active_url = server.url();
	let manager = EndpointManager::new(
		plain_client(),
		active_url.as_ref(),
		vec![active_url.clone(), active_url.clone()],
	);
	let transport = MockTransport::new();

	let result = manager.try_rotate_url(&transport).await;

	match result {
		Err(TransportError::UrlRotation(ctx)) => {
			assert!(ctx.to_string().contains("No fallback URLs available"));
			assert!(ctx.to_string().contains(&active_url));
		}
		other => panic!("Expected UrlRotation error, got {:?}", other),
	}
	assert_eq!(manager.active_url().await, active_url);
	assert_eq!(
		manager.fallback_urls().await,
		vec![active_url.clone(), active_url.clone()]
	);
}

#[tokio::test]
async fn test_rotate_url_unreachable_fallbacks() {
	let server = Server::new_async().await;
	let invalid_url = "http://invalid-domain-that-does-not-exist:12345";
	let manager = EndpointManager::new(
		plain_client(),
		server.url().as_ref(),
		vec![invalid_url.to_string()],
	);
	let transport = MockTransport::new();

	let result = manager.try_rotate_url(&transport).await;

	match result {
		Err(TransportError::UrlRotation(ctx)) => {
			assert!(ctx.to_string().contains("No reachable fallback URL"));
		}
		other => panic!("Expected UrlRotation error, got {:?}", other),
	}
	assert_eq!(manager.active_url().await, server.url());
	assert_eq!(manager.fallback_urls().await, vec![invalid_url.to_string()]);
}

#[tokio::test]
async fn test_rotate_url_update_client_failure() {
	let server1 = Server::new_async().await;
	let server2 = Server::new_async().await;
	let manager = EndpointManager::new(
		plain_client(),
		server1.url().as_ref(),
		vec![server2.url()],
	);

	let result = manager
		.try_rotate_url(&AlwaysFailsToUpdateClientTransport)
		.await;

	match result {
		Err(TransportError::UrlRotation(ctx)) => {
			assert!(ctx.to_string().contains("Failed to switch transport"));
		}
		other => panic!("Expected UrlRotation error, got {:?}", other),
	}
	assert_eq!(manager.active_url().await, server1.url());
}

#[test]
fn test_customize_request() {
	let transport = MockTransport::new();

	assert_eq!(
		transport.customize_request("eth_getBalance", Some(json!(["0x01", "latest"]))),
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": "eth_getBalance",
			"params": ["0x01", "latest"]
		})
	);
	assert_eq!(
		transport.customize_request("eth_blockNumber", None),
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": "eth_blockNumber",
			"params": []
		})
	);
}
