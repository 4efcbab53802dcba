//! Helpers shared by the reqwest-backed integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use singly_oauth::{
	auth::ClientCredentials,
	client::{ReqwestSinglyClient, SinglyClient},
	http::ReqwestHttpClient,
	oauth::ReqwestTransportErrorMapper,
	provider::ProviderDescriptor,
	reqwest::Client as ReqwestClient,
	url::Url,
};

pub const CLIENT_ID: &str = "client-it";
pub const CLIENT_SECRET: &str = "secret-it";
pub const SERVICE: &str = "facebook";
pub const RETURN_URL: &str = "https://app.example.com/auth/return";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Descriptor whose endpoints all live on the mock server.
pub fn build_descriptor(server: &MockServer) -> ProviderDescriptor {
	ProviderDescriptor::from_base_url(server.base_url())
		.expect("Mock provider descriptor should build successfully.")
}

pub fn credentials() -> ClientCredentials {
	ClientCredentials::new(CLIENT_ID, CLIENT_SECRET, SERVICE)
		.expect("Credential fixture should be valid.")
}

/// Client wired to the mock server through the test transport.
pub fn build_client(server: &MockServer) -> ReqwestSinglyClient {
	SinglyClient::with_http_client(
		build_descriptor(server),
		credentials(),
		test_reqwest_http_client(),
		ReqwestTransportErrorMapper,
	)
}

pub fn return_url() -> Url {
	Url::parse(RETURN_URL).expect("Return URL fixture should parse.")
}
