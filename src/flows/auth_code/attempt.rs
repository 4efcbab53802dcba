// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, auth::ServiceName, error::AuthStateError};

const STATE_LEN: usize = 32;

/// Pending login handed out by
/// [`AuthorizationCodeFlow::start_login`](crate::flows::AuthorizationCodeFlow::start_login).
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Return URL sent as `redirect_uri`; reused for the code exchange.
	pub return_url: Url,
	/// Service the user was sent to authenticate with.
	pub service: ServiceName,
	/// Fully-formed authorization URL that callers should send the user to.
	pub login_url: Url,
	/// Moment the attempt was created.
	#[serde(with = "time::serde::rfc3339")]
	pub issued_at: OffsetDateTime,
}
impl LoginAttempt {
	pub(super) fn new(
		state: String,
		return_url: Url,
		service: ServiceName,
		login_url: Url,
	) -> Self {
		Self { state, return_url, service, login_url, issued_at: OffsetDateTime::now_utc() }
	}

	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<(), AuthStateError> {
		if constant_time_eq(returned_state.as_bytes(), self.state.as_bytes()) {
			Ok(())
		} else {
			Err(AuthStateError::StateMismatch)
		}
	}

	/// Returns true once the attempt is at least `ttl` old at `now`.
	pub fn is_expired_at(&self, ttl: Duration, now: OffsetDateTime) -> bool {
		now - self.issued_at >= ttl
	}

	pub(crate) fn ensure_fresh(
		&self,
		ttl: Duration,
		now: OffsetDateTime,
	) -> Result<(), AuthStateError> {
		if self.is_expired_at(ttl, now) {
			Err(AuthStateError::LoginExpired { ttl })
		} else {
			Ok(())
		}
	}
}
impl Debug for LoginAttempt {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginAttempt")
			.field("state", &"<redacted>")
			.field("return_url", &self.return_url)
			.field("service", &self.service)
			.field("issued_at", &self.issued_at)
			.finish()
	}
}

/// Compares without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}

	a.iter().zip(b).fold(0_u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub(super) fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}
