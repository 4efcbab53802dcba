//! Singly response handling.

// self
use crate::{
	_prelude::*,
	auth::{AggregatedProfile, UserProfile},
	error::ParseError,
	provider::{Endpoint, ProfileStrategy, ProviderStrategy, strategy},
};

/// Strategy for the Singly aggregation API.
///
/// The token endpoint takes only `client_id`, `client_secret`, and `code`, so the token-side
/// hooks keep their defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct SinglyStrategy;
impl Display for SinglyStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("singly-strategy")
	}
}
impl ProviderStrategy for SinglyStrategy {}
impl ProfileStrategy for SinglyStrategy {
	fn parse_user_profile(&self, body: &[u8]) -> Result<UserProfile, ParseError> {
		strategy::parse_json(Endpoint::Profile, body)
	}

	fn parse_aggregated_profile(&self, body: &[u8]) -> Result<AggregatedProfile, ParseError> {
		strategy::parse_json(Endpoint::Profiles, body)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn missing_profile_field_reports_path() {
		let err = SinglyStrategy
			.parse_user_profile(
				br#"{"id":"1","url":"u","description":"d","thumbnail_url":"t","name":"n"}"#,
			)
			.expect_err("Profile without a handle should fail.");

		assert!(matches!(err, ParseError::Body { endpoint: Endpoint::Profile, .. }));
		assert!(err.path().is_some());
	}

	#[test]
	fn aggregated_profile_errors_point_at_service() {
		let err = SinglyStrategy
			.parse_aggregated_profile(br#"{"id":"1","twitter":"t1"}"#)
			.expect_err("Scalar service values should fail.");

		assert!(err.path().is_some_and(|path| path.contains("twitter")));
	}
}
