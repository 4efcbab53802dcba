//! Crate-level error types shared across flows, providers, sessions, and stores.

// self
use crate::{_prelude::*, provider::Endpoint};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem; fatal at construction time.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider answered with a non-success status.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// Provider answered with a body that could not be interpreted.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Caller attempted a step the current session or login attempt does not permit.
	#[error(transparent)]
	AuthState(#[from] AuthStateError),
}
impl Error {
	/// Stable label of the error family, used for span fields and logs.
	pub const fn category(&self) -> &'static str {
		match self {
			Self::Storage(_) => "storage",
			Self::Config(_) => "config",
			Self::Transport(_) => "transport",
			Self::Protocol(_) => "protocol",
			Self::Parse(_) => "parse",
			Self::AuthState(_) => "auth_state",
		}
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required credential field was empty or whitespace-only.
	#[error("The `{field}` setting must not be empty.")]
	EmptyField {
		/// Name of the offending field.
		field: &'static str,
	},
	/// Identifier validation failed.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Provider descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::provider::ProviderDescriptorError),
	/// Configuration sources could not be read or deserialized.
	#[error(transparent)]
	Load(#[from] ::config::ConfigError),
	/// A loaded setting holds a value the client cannot use.
	#[error("The `{name}` setting is invalid: {reason}.")]
	InvalidSetting {
		/// Setting name.
		name: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, deadlines).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The request exceeded the configured deadline.
	#[error("Request to the {endpoint} endpoint timed out.")]
	Timeout {
		/// Endpoint being called.
		endpoint: Endpoint,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling a provider endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: Endpoint,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}

/// Non-success responses returned by the provider.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
	/// The token endpoint refused to exchange the authorization code.
	#[error("Token exchange failed with HTTP {status}{}.", reason_suffix(.reason))]
	TokenExchangeFailed {
		/// HTTP status code.
		status: u16,
		/// Provider-supplied reason, when one could be extracted.
		reason: Option<String>,
	},
	/// A resource endpoint answered with an unexpected status.
	#[error("The {endpoint} endpoint returned HTTP {status}{}.", reason_suffix(.reason))]
	UnexpectedStatus {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// HTTP status code.
		status: u16,
		/// Provider-supplied reason, when one could be extracted.
		reason: Option<String>,
	},
}
impl ProtocolError {
	/// HTTP status reported by the provider.
	pub fn status(&self) -> u16 {
		match self {
			Self::TokenExchangeFailed { status, .. } | Self::UnexpectedStatus { status, .. } =>
				*status,
		}
	}
}

/// Response bodies that could not be mapped into the expected shape.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// JSON was malformed or lacked a required field.
	#[error("The {endpoint} endpoint returned a malformed response.")]
	Body {
		/// Endpoint being called.
		endpoint: Endpoint,
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint returned an empty `access_token`.
	#[error("Token exchange failed: the provider returned an empty access token.")]
	EmptyAccessToken,
}
impl ParseError {
	/// JSON path of the failing element, when the failure came from deserialization.
	pub fn path(&self) -> Option<String> {
		match self {
			Self::Body { source, .. } => Some(source.path().to_string()),
			Self::EmptyAccessToken => None,
		}
	}
}

/// Authentication-state violations detected before any network call is made.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum AuthStateError {
	/// An authenticated call was attempted with no access token in the session.
	#[error("No access token is available; complete the login flow first.")]
	MissingCredential,
	/// The provider redirect carried no authorization code.
	#[error("The provider redirect did not carry an authorization code.")]
	MissingAuthorizationCode,
	/// The `state` returned by the provider did not match the login attempt.
	#[error("Authorization state mismatch.")]
	StateMismatch,
	/// The login attempt outlived its allowed window.
	#[error("Login attempt expired after {ttl}.")]
	LoginExpired {
		/// Configured attempt lifetime.
		ttl: Duration,
	},
}

fn reason_suffix(reason: &Option<String>) -> String {
	reason.as_deref().map(|value| format!(": {value}")).unwrap_or_default()
}
