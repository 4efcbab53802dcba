//! Request signing contracts that attach a session's access token to outbound requests.

// crates.io
use oauth2::{
	HttpRequest,
	http::header::{AUTHORIZATION, HeaderValue},
};
// self
use crate::{_prelude::*, error::ConfigError, session::SessionContext};

/// Describes how to attach the session's access token to an outbound request without
/// constraining the HTTP client type.
pub trait RequestSignerExt<Request>
where
	Self: Send + Sync,
{
	/// Consumes the request and returns it carrying the session's credential.
	///
	/// Fails with [`AuthStateError::MissingCredential`](crate::error::AuthStateError) when the
	/// session holds no usable token; the request is never sent unsigned.
	fn attach_token(&self, request: Request, session: &SessionContext) -> Result<Request>;
}

/// Signer that sends the access token as `Authorization: Bearer <token>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BearerSigner;
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::RequestBuilder> for BearerSigner {
	fn attach_token(
		&self,
		request: reqwest::RequestBuilder,
		session: &SessionContext,
	) -> Result<reqwest::RequestBuilder> {
		let token = session.require_access_token()?;

		Ok(request.bearer_auth(token.expose()))
	}
}
impl RequestSignerExt<HttpRequest> for BearerSigner {
	fn attach_token(
		&self,
		mut request: HttpRequest,
		session: &SessionContext,
	) -> Result<HttpRequest> {
		let token = session.require_access_token()?;
		let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
			.map_err(|e| ConfigError::from(oauth2::http::Error::from(e)))?;

		value.set_sensitive(true);
		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(request)
	}
}
