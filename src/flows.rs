//! Authorization-code flow orchestration against a single provider descriptor.

pub mod auth_code;

pub use auth_code::*;

// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	http::ProviderHttpClient,
	oauth::TransportErrorMapper,
	provider::{ProviderDescriptor, ProviderStrategy},
};
#[cfg(feature = "reqwest")]
use crate::{
	http::{HttpTimeouts, ReqwestHttpClient},
	oauth::ReqwestTransportErrorMapper,
};

#[cfg(feature = "reqwest")]
/// Flow specialized for the crate's default reqwest transport stack.
pub type ReqwestAuthorizationCodeFlow =
	AuthorizationCodeFlow<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Coordinates the OAuth 2.0 authorization-code grant for one registered application.
///
/// The flow owns the HTTP client, provider descriptor, strategy, and client credentials.
/// It holds no per-user state: login attempts are handed back to the caller and tokens are
/// written into the caller's [`SessionContext`](crate::session::SessionContext), so one flow
/// can serve any number of concurrent sessions.
#[derive(Clone)]
pub struct AuthorizationCodeFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Provider descriptor that defines the OAuth endpoints.
	pub descriptor: ProviderDescriptor,
	/// Strategy responsible for token request adjustments and token parsing.
	pub strategy: Arc<dyn ProviderStrategy>,
	/// Application registration sent with every grant.
	pub credentials: ClientCredentials,
	/// Maximum age of a [`LoginAttempt`] accepted by [`AuthorizationCodeFlow::complete_login`].
	pub login_ttl: Duration,
}
impl<C, M> AuthorizationCodeFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Default lifetime of a login attempt.
	pub const DEFAULT_LOGIN_TTL: Duration = Duration::minutes(10);

	/// Creates a flow that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		strategy: Arc<dyn ProviderStrategy>,
		credentials: ClientCredentials,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			strategy,
			credentials,
			login_ttl: Self::DEFAULT_LOGIN_TTL,
		}
	}

	/// Overrides the login attempt lifetime; negative values are clamped to zero.
	pub fn with_login_ttl(mut self, ttl: Duration) -> Self {
		self.login_ttl = if ttl.is_negative() { Duration::ZERO } else { ttl };

		self
	}
}
#[cfg(feature = "reqwest")]
impl AuthorizationCodeFlow<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a flow backed by a reqwest transport with the default [`HttpTimeouts`].
	pub fn new(
		descriptor: ProviderDescriptor,
		strategy: Arc<dyn ProviderStrategy>,
		credentials: ClientCredentials,
	) -> Result<Self> {
		let http_client = ReqwestHttpClient::new(HttpTimeouts::default())?;

		Ok(Self::with_http_client(
			descriptor,
			strategy,
			credentials,
			http_client,
			ReqwestTransportErrorMapper,
		))
	}
}
impl<C, M> Debug for AuthorizationCodeFlow<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationCodeFlow")
			.field("descriptor", &self.descriptor)
			.field("credentials", &self.credentials)
			.field("login_ttl", &self.login_ttl)
			.finish()
	}
}
