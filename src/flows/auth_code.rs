//! Authorization Code flow: login URL construction, state-checked login attempts, and the
//! code-for-token exchange.
//!
//! [`AuthorizationCodeFlow::build_login_url`] is the bare redirect URL. The
//! [`AuthorizationCodeFlow::start_login`] / [`AuthorizationCodeFlow::complete_login`] pair adds
//! a random `state` parameter and a bounded attempt lifetime, and writes the issued token into
//! the caller's session.

mod attempt;

pub use attempt::*;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ServiceName},
	error::{AuthStateError, ProtocolError},
	flows::AuthorizationCodeFlow,
	http::ProviderHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, Operation},
	provider::{Endpoint, ProviderStrategy},
	session::SessionContext,
};

impl<C, M> AuthorizationCodeFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the authorization endpoint URL the user should be redirected to.
	///
	/// `service` defaults to the configured service. When `existing` already holds both a
	/// linked account id and a token, they are forwarded as `account` and `access_token` so
	/// the provider links the new service to the same account.
	pub fn build_login_url(
		&self,
		return_url: &Url,
		service: Option<&ServiceName>,
		existing: Option<&SessionContext>,
	) -> Url {
		self.login_url(return_url, service, existing, None)
	}

	/// Starts a login attempt whose redirect URL carries a fresh random `state`.
	///
	/// Keep the returned [`LoginAttempt`] in the user's session until the provider redirects
	/// back, then hand it to [`AuthorizationCodeFlow::complete_login`].
	pub fn start_login(
		&self,
		return_url: &Url,
		service: Option<&ServiceName>,
		existing: Option<&SessionContext>,
	) -> LoginAttempt {
		let service = service.unwrap_or(self.credentials.service()).clone();
		let state = attempt::random_state();
		let login_url = self.login_url(return_url, Some(&service), existing, Some(&state));

		LoginAttempt::new(state, return_url.to_owned(), service, login_url)
	}

	/// Exchanges an authorization code for an access token.
	///
	/// Sends exactly one form-encoded `POST` to the token endpoint; there are no retries.
	pub async fn exchange_code(&self, code: &str, return_url: &Url) -> Result<AccessToken> {
		if code.is_empty() {
			return Err(AuthStateError::MissingAuthorizationCode.into());
		}

		obs::observe(Operation::TokenExchange, "exchange_code", async move {
			let mut form = BTreeMap::new();

			form.insert("client_id".into(), self.credentials.client_id().to_owned());
			form.insert("client_secret".into(), self.credentials.client_secret().expose().into());
			form.insert("code".into(), code.to_owned());

			self.strategy.augment_token_request(return_url, &mut form);

			let request = oauth::form_post(&self.descriptor.endpoints.token, &form)?;
			let response = oauth::dispatch(
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
				Endpoint::Token,
				request,
			)
			.await?;

			if !oauth::is_ok(&response) {
				return Err(ProtocolError::TokenExchangeFailed {
					status: response.status().as_u16(),
					reason: self.strategy.describe_error(Endpoint::Token, response.body()),
				}
				.into());
			}

			Ok(self.strategy.parse_token_response(response.body())?)
		})
		.await
	}

	/// Finishes a login attempt after the provider redirected back.
	///
	/// The returned `state` must match and the attempt must still be within the login TTL;
	/// both checks run before any network call. The code is exchanged against the attempt's
	/// own return URL and the token is stored in `session`, replacing any previous token.
	pub async fn complete_login(
		&self,
		attempt: LoginAttempt,
		returned_state: &str,
		code: &str,
		session: &mut SessionContext,
	) -> Result<AccessToken> {
		attempt.validate_state(returned_state)?;
		attempt.ensure_fresh(self.login_ttl, OffsetDateTime::now_utc())?;

		let token = self.exchange_code(code, &attempt.return_url).await?;

		session.set_access_token(token.clone());

		Ok(token)
	}

	fn login_url(
		&self,
		return_url: &Url,
		service: Option<&ServiceName>,
		existing: Option<&SessionContext>,
		state: Option<&str>,
	) -> Url {
		let service = service.unwrap_or(self.credentials.service());
		let mut url = self.descriptor.endpoints.authorization.clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("client_id", self.credentials.client_id());
		pairs.append_pair("redirect_uri", return_url.as_str());
		pairs.append_pair("service", service);

		if let Some((account, token)) = existing.and_then(SessionContext::linked_account) {
			pairs.append_pair("account", account);
			pairs.append_pair("access_token", token.expose());
		}
		if let Some(state) = state {
			pairs.append_pair("state", state);
		}

		drop(pairs);

		url
	}
}
