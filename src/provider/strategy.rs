//! Provider strategy hooks that shape token requests and parse provider responses.
//!
//! The authorization-code flow is generic over endpoints; everything provider-specific about
//! reading a response body is injected through these traits. Hooks work on plain bytes and
//! crate-owned types so implementations never depend on a particular HTTP client.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AggregatedProfile, UserProfile},
	error::ParseError,
	provider::Endpoint,
};

/// Token-side strategy consumed by [`AuthorizationCodeFlow`](crate::flows::AuthorizationCodeFlow).
///
/// Every hook has a default implementation matching standard OAuth 2.0 JSON responses, so a
/// provider only overrides what it does differently.
pub trait ProviderStrategy: Send + Sync {
	/// Gives providers a chance to add form parameters before the code exchange is sent.
	///
	/// The base form already holds `client_id`, `client_secret`, and `code`. Providers that
	/// expect `grant_type` or `redirect_uri` insert them here.
	fn augment_token_request(&self, redirect_uri: &Url, form: &mut BTreeMap<String, String>) {
		let _ = (redirect_uri, form);
	}

	/// Extracts the access token from a successful token endpoint response.
	fn parse_token_response(&self, body: &[u8]) -> Result<AccessToken, ParseError> {
		#[derive(Deserialize)]
		struct TokenResponse {
			access_token: String,
		}

		let response: TokenResponse = parse_json(Endpoint::Token, body)?;

		if response.access_token.is_empty() {
			return Err(ParseError::EmptyAccessToken);
		}

		Ok(AccessToken::new(response.access_token))
	}

	/// Summarizes an error response body for inclusion in protocol errors.
	fn describe_error(&self, _endpoint: Endpoint, body: &[u8]) -> Option<String> {
		ProviderErrorBody::parse(body).describe()
	}
}

/// Resource-side strategy turning profile responses into domain models.
pub trait ProfileStrategy: Send + Sync {
	/// Parses the profile endpoint payload.
	fn parse_user_profile(&self, body: &[u8]) -> Result<UserProfile, ParseError>;

	/// Parses the aggregated profiles endpoint payload.
	fn parse_aggregated_profile(&self, body: &[u8]) -> Result<AggregatedProfile, ParseError>;
}

/// Error details salvaged from a non-success response.
///
/// Structured OAuth fields (`error`, `error_description`) win; otherwise a truncated preview
/// of the raw body is kept so operators still see what the provider said.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderErrorBody {
	/// Provider-supplied OAuth `error` field.
	pub oauth_error: Option<String>,
	/// Provider-supplied OAuth `error_description` field.
	pub error_description: Option<String>,
	/// Preview of the response body for non-JSON payloads.
	pub body_preview: Option<String>,
}
impl ProviderErrorBody {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Extracts whatever error details `body` carries.
	pub fn parse(body: &[u8]) -> Self {
		#[derive(Deserialize)]
		struct OAuthErrorFields {
			error: Option<String>,
			error_description: Option<String>,
		}

		if let Ok(fields) = serde_json::from_slice::<OAuthErrorFields>(body) {
			if fields.error.is_some() || fields.error_description.is_some() {
				return Self {
					oauth_error: fields.error,
					error_description: fields.error_description,
					body_preview: None,
				};
			}
		}

		let text = String::from_utf8_lossy(body);
		let text = text.trim();

		if text.is_empty() {
			return Self::default();
		}

		Self { body_preview: Some(truncate_preview(text)), ..Self::default() }
	}

	/// Renders the most specific detail available.
	pub fn describe(self) -> Option<String> {
		match (self.oauth_error, self.error_description) {
			(Some(error), Some(description)) => Some(format!("{error} ({description})")),
			(Some(error), None) => Some(error),
			(None, Some(description)) => Some(description),
			(None, None) => self.body_preview,
		}
	}
}

/// Deserializes `body` as JSON, recording the path of any failing element.
pub fn parse_json<T>(endpoint: Endpoint, body: &[u8]) -> Result<T, ParseError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ParseError::Body { endpoint, source })
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= ProviderErrorBody::BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= ProviderErrorBody::BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}
