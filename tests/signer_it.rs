#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use singly_oauth::{
	auth::AccessToken,
	error::{AuthStateError, Error},
	ext::{BearerSigner, RequestSignerExt},
	session::SessionContext,
};

#[tokio::test]
async fn bearer_signer_attaches_the_session_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/photos").header("authorization", "Bearer tok-1");
			then.status(200).body("[]");
		})
		.await;
	let http_client = common::test_reqwest_http_client();
	let session = SessionContext::with_access_token(AccessToken::new("tok-1"));
	let request = BearerSigner
		.attach_token(http_client.get(server.url("/photos")), &session)
		.expect("Signing should succeed.");
	let response = request.send().await.expect("Signed request should be sent.");

	mock.assert_async().await;

	assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn bearer_signer_refuses_sessions_without_tokens() {
	let http_client = common::test_reqwest_http_client();
	let request = http_client.get("https://api.example.com/photos");
	let err = BearerSigner
		.attach_token(request, &SessionContext::default())
		.expect_err("Unsigned requests should be refused.");

	assert!(matches!(err, Error::AuthState(AuthStateError::MissingCredential)));
}
