#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use singly_oauth::{
	auth::{AccessToken, UserProfile},
	error::{AuthStateError, Error, ParseError, ProtocolError},
	provider::Endpoint,
	session::SessionContext,
};

const PROFILE_BODY: &str = r#"{
	"id": "u-1",
	"url": "https://twitter.com/ada",
	"handle": "ada",
	"description": "Analyst",
	"thumbnail_url": "https://img.example.com/ada.png",
	"name": "Ada Lovelace"
}"#;

fn session(token: &str) -> SessionContext {
	SessionContext::with_access_token(AccessToken::new(token))
}

#[tokio::test]
async fn fetch_user_profile_returns_fields_verbatim() {
	let server = MockServer::start_async().await;
	let client = common::build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/profile").query_param("access_token", "tok-1");
			then.status(200).header("content-type", "application/json").body(PROFILE_BODY);
		})
		.await;
	let profile =
		client.fetch_user_profile(&session("tok-1")).await.expect("Profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(
		profile,
		UserProfile {
			id: "u-1".into(),
			url: "https://twitter.com/ada".into(),
			handle: "ada".into(),
			description: "Analyst".into(),
			thumbnail_url: "https://img.example.com/ada.png".into(),
			name: "Ada Lovelace".into(),
		}
	);
}

#[tokio::test]
async fn fetch_user_profile_rejects_incomplete_payloads() {
	let server = MockServer::start_async().await;
	let client = common::build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/profile");
			then.status(200).header("content-type", "application/json").body(
				r#"{"id":"u-1","url":"u","description":"d","thumbnail_url":"t","name":"n"}"#,
			);
		})
		.await;
	let err = client
		.fetch_user_profile(&session("tok-1"))
		.await
		.expect_err("A profile without a handle should be rejected.");

	mock.assert_async().await;

	let Error::Parse(ParseError::Body { endpoint, source }) = err else {
		panic!("Expected a profile parse failure, got {err:?}.");
	};

	assert_eq!(endpoint, Endpoint::Profile);
	assert!(source.to_string().contains("handle"));
}

#[tokio::test]
async fn fetch_aggregated_profile_splits_services_from_id() {
	let server = MockServer::start_async().await;
	let client = common::build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v0/profiles").query_param("access_token", "tok-2");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":"acct-1","twitter":["t1"],"facebook":["f1","f2"]}"#);
		})
		.await;
	let profile = client
		.fetch_aggregated_profile(&session("tok-2"))
		.await
		.expect("Aggregated profile fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(profile.id, "acct-1");
	assert_eq!(profile.services.len(), 2);
	assert_eq!(profile.service("twitter"), Some(&["t1".to_owned()][..]));
	assert_eq!(profile.service("facebook"), Some(&["f1".to_owned(), "f2".to_owned()][..]));
}

#[tokio::test]
async fn profile_calls_without_a_token_never_reach_the_network() {
	let server = MockServer::start_async().await;
	let client = common::build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET);
			then.status(200).body("{}");
		})
		.await;
	let err = client
		.fetch_aggregated_profile(&session(""))
		.await
		.expect_err("An empty token should be rejected.");

	assert!(matches!(err, Error::AuthState(AuthStateError::MissingCredential)));

	let err = client
		.fetch_user_profile(&SessionContext::default())
		.await
		.expect_err("A missing token should be rejected.");

	assert!(matches!(err, Error::AuthState(AuthStateError::MissingCredential)));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn profile_errors_surface_status_and_reason() {
	let server = MockServer::start_async().await;
	let client = common::build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v0/profiles");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_token\"}");
		})
		.await;
	let err = client
		.fetch_aggregated_profile(&session("revoked"))
		.await
		.expect_err("Revoked tokens should fail.");

	mock.assert_async().await;

	let Error::Protocol(ProtocolError::UnexpectedStatus { endpoint, status, reason }) = err else {
		panic!("Expected an unexpected-status failure, got {err:?}.");
	};

	assert_eq!(endpoint, Endpoint::Profiles);
	assert_eq!(status, 401);
	assert_eq!(reason.as_deref(), Some("invalid_token"));
}
