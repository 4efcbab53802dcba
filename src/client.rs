//! The Singly client: login, code exchange, and profile retrieval behind one handle.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AggregatedProfile, ClientCredentials, ServiceName, UserProfile},
	error::ProtocolError,
	flows::{AuthorizationCodeFlow, LoginAttempt},
	http::ProviderHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, Operation},
	provider::{Endpoint, ProfileStrategy, ProviderDescriptor, ProviderStrategy, SinglyStrategy},
	session::SessionContext,
};
#[cfg(feature = "reqwest")]
use crate::{config::ClientConfig, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestSinglyClient = SinglyClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Explicitly constructed client for one registered Singly application.
///
/// The client holds configuration only. Per-user state lives in a [`SessionContext`] that the
/// caller owns and passes into each call, so a single client (or its clones) can serve every
/// session of a web application concurrently.
#[derive(Clone)]
pub struct SinglyClient<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	flow: AuthorizationCodeFlow<C, M>,
	profile_strategy: Arc<dyn ProfileStrategy>,
}
impl<C, M> SinglyClient<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client on top of a caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		credentials: ClientCredentials,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self::with_strategies(
			AuthorizationCodeFlow::with_http_client(
				descriptor,
				Arc::new(SinglyStrategy),
				credentials,
				http_client,
				mapper,
			),
			Arc::new(SinglyStrategy),
		)
	}

	/// Creates a client from a prepared flow and a custom profile strategy.
	pub fn with_strategies(
		flow: AuthorizationCodeFlow<C, M>,
		profile_strategy: Arc<dyn ProfileStrategy>,
	) -> Self {
		Self { flow, profile_strategy }
	}

	/// Overrides how long a [`LoginAttempt`] stays valid.
	pub fn with_login_ttl(mut self, ttl: Duration) -> Self {
		self.flow = self.flow.with_login_ttl(ttl);

		self
	}

	/// Underlying authorization-code flow.
	pub fn flow(&self) -> &AuthorizationCodeFlow<C, M> {
		&self.flow
	}

	/// Builds the authorization URL that starts (or extends) a login.
	///
	/// See [`AuthorizationCodeFlow::build_login_url`].
	pub fn build_login_url(
		&self,
		return_url: &Url,
		service: Option<&ServiceName>,
		existing: Option<&SessionContext>,
	) -> Url {
		self.flow.build_login_url(return_url, service, existing)
	}

	/// Starts a state-checked login attempt.
	///
	/// See [`AuthorizationCodeFlow::start_login`].
	pub fn start_login(
		&self,
		return_url: &Url,
		service: Option<&ServiceName>,
		existing: Option<&SessionContext>,
	) -> LoginAttempt {
		self.flow.start_login(return_url, service, existing)
	}

	/// Exchanges an authorization code for an access token.
	pub async fn exchange_code(&self, code: &str, return_url: &Url) -> Result<AccessToken> {
		self.flow.exchange_code(code, return_url).await
	}

	/// Verifies the redirect against `attempt`, exchanges `code`, and stores the token in
	/// `session`.
	pub async fn complete_login(
		&self,
		attempt: LoginAttempt,
		returned_state: &str,
		code: &str,
		session: &mut SessionContext,
	) -> Result<AccessToken> {
		self.flow.complete_login(attempt, returned_state, code, session).await
	}

	/// Fetches the profile of the user behind the session's access token.
	pub async fn fetch_user_profile(&self, session: &SessionContext) -> Result<UserProfile> {
		let token = session.require_access_token()?;

		obs::observe(Operation::UserProfile, "fetch_user_profile", async move {
			let body = self.get_resource(Endpoint::Profile, token).await?;

			Ok(self.profile_strategy.parse_user_profile(&body)?)
		})
		.await
	}

	/// Fetches every service profile linked to the session's Singly account.
	pub async fn fetch_aggregated_profile(
		&self,
		session: &SessionContext,
	) -> Result<AggregatedProfile> {
		let token = session.require_access_token()?;

		obs::observe(Operation::AggregatedProfile, "fetch_aggregated_profile", async move {
			let body = self.get_resource(Endpoint::Profiles, token).await?;

			Ok(self.profile_strategy.parse_aggregated_profile(&body)?)
		})
		.await
	}

	async fn get_resource(&self, endpoint: Endpoint, token: &AccessToken) -> Result<Vec<u8>> {
		let url = self.flow.descriptor.endpoints.get(endpoint);
		let request = oauth::get_with_query(url, &[("access_token", token.expose())])?;
		let response = oauth::dispatch(
			self.flow.http_client.as_ref(),
			self.flow.transport_mapper.as_ref(),
			endpoint,
			request,
		)
		.await?;

		if !oauth::is_ok(&response) {
			return Err(ProtocolError::UnexpectedStatus {
				endpoint,
				status: response.status().as_u16(),
				reason: self.flow.strategy.describe_error(endpoint, response.body()),
			}
			.into());
		}

		Ok(response.into_body())
	}
}
#[cfg(feature = "reqwest")]
impl SinglyClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a reqwest transport with the default timeouts.
	pub fn new(descriptor: ProviderDescriptor, credentials: ClientCredentials) -> Result<Self> {
		let flow = AuthorizationCodeFlow::new(descriptor, Arc::new(SinglyStrategy), credentials)?;

		Ok(Self::with_strategies(flow, Arc::new(SinglyStrategy)))
	}

	/// Creates a client from validated configuration, honoring its base URL and timeouts.
	pub fn from_config(config: &ClientConfig) -> Result<Self> {
		let descriptor = config.descriptor()?;
		let credentials = config.credentials()?;
		let http_client = ReqwestHttpClient::new(config.timeouts()?)?;

		Ok(Self::with_http_client(descriptor, credentials, http_client, ReqwestTransportErrorMapper))
	}
}
impl<C, M> Debug for SinglyClient<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SinglyClient").field("flow", &self.flow).finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::{auth::AccountId, error::AuthStateError};

	fn client() -> ReqwestSinglyClient {
		let credentials = ClientCredentials::new("client-1", "secret-1", "facebook")
			.expect("Credential fixture should be valid.");
		let descriptor = ProviderDescriptor::singly().expect("Singly preset should validate.");

		SinglyClient::new(descriptor, credentials).expect("Client should build.")
	}

	fn return_url() -> Url {
		Url::parse("https://app.example.com/auth/return").expect("Return URL fixture should parse.")
	}

	fn query_keys(url: &Url) -> Vec<String> {
		url.query_pairs().map(|(key, _)| key.into_owned()).collect()
	}

	#[test]
	fn login_url_without_session_has_base_keys() {
		let url = client().build_login_url(&return_url(), None, None);

		assert!(url.as_str().starts_with("https://api.singly.com/oauth/authorize?"));
		assert_eq!(query_keys(&url), ["client_id", "redirect_uri", "service"]);
		assert!(url.query_pairs().any(|(k, v)| k == "service" && v == "facebook"));
	}

	#[test]
	fn login_url_links_existing_account() {
		let session = SessionContext::with_access_token(AccessToken::new("tok"))
			.with_account_id(AccountId::new("acct-9").expect("Account fixture should be valid."));
		let service = ServiceName::new("twitter").expect("Service fixture should be valid.");
		let url = client().build_login_url(&return_url(), Some(&service), Some(&session));

		assert_eq!(
			query_keys(&url),
			["client_id", "redirect_uri", "service", "account", "access_token"]
		);
		assert!(url.query_pairs().any(|(k, v)| k == "service" && v == "twitter"));
		assert!(url.query_pairs().any(|(k, v)| k == "account" && v == "acct-9"));
	}

	#[test]
	fn login_url_ignores_half_linked_session() {
		let session = SessionContext::default()
			.with_account_id(AccountId::new("acct-9").expect("Account fixture should be valid."));
		let url = client().build_login_url(&return_url(), None, Some(&session));

		assert_eq!(query_keys(&url), ["client_id", "redirect_uri", "service"]);
	}

	#[test]
	fn start_login_adds_state() {
		let attempt = client().start_login(&return_url(), None, None);

		assert_eq!(query_keys(&attempt.login_url), ["client_id", "redirect_uri", "service", "state"]);
		assert!(attempt.login_url.query_pairs().any(|(k, v)| k == "state" && v == attempt.state));
		assert_eq!(attempt.service.as_ref(), "facebook");
	}

	#[tokio::test]
	async fn profile_calls_require_a_token() {
		let client = client();
		let session = SessionContext::with_access_token(AccessToken::new(""));
		let err = client
			.fetch_aggregated_profile(&session)
			.await
			.expect_err("Empty token should be rejected.");

		assert!(matches!(err, Error::AuthState(AuthStateError::MissingCredential)));

		let err = client
			.fetch_user_profile(&SessionContext::default())
			.await
			.expect_err("Missing token should be rejected.");

		assert!(matches!(err, Error::AuthState(AuthStateError::MissingCredential)));
	}
}
