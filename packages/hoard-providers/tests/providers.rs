use reqwest::header::AUTHORIZATION;
use serde_json::Map;

use hoard_providers::{Error, ErrorKind};

#[test]
fn builds_bearer_auth_header() {
	let headers =
		hoard_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn copies_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-team".to_string(), serde_json::json!("inventory"));

	let headers =
		hoard_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");

	assert_eq!(headers.get("x-team").expect("Missing default header."), "inventory");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-retries".to_string(), serde_json::json!(2));

	let err = hoard_providers::auth_headers("secret", &defaults).expect_err("Expected error.");

	assert_eq!(err.kind(), ErrorKind::Fatal);
}

#[test]
fn classifies_http_statuses() {
	for (status, expected) in [
		(400, ErrorKind::Fatal),
		(401, ErrorKind::Fatal),
		(404, ErrorKind::Fatal),
		(408, ErrorKind::Retryable),
		(429, ErrorKind::Retryable),
		(500, ErrorKind::Retryable),
		(503, ErrorKind::Retryable),
	] {
		let err = Error::Status { status, body: String::new() };

		assert_eq!(err.kind(), expected, "status {status}");
	}
}

#[test]
fn malformed_output_is_retryable() {
	let err = Error::InvalidOutput { message: "not json".to_string() };

	assert_eq!(err.kind(), ErrorKind::Retryable);
	assert!(err.is_invalid_output());
}
