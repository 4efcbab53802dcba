//! Optional observability helpers for provider calls.
//!
//! # Feature Flags
//!
//! - `tracing`: one `singly_oauth.call` span per provider call with `operation`, `endpoint`
//!   and `stage` fields. `outcome` and `error` are filled in when the call settles, and
//!   failures log a `warn` event.
//! - `metrics`: the `singly_oauth_call_total` counter labeled by `operation` and `outcome`,
//!   plus the `singly_oauth_call_duration_seconds` histogram for settled calls.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// std
use std::time::Instant;
// self
use crate::{_prelude::*, provider::Endpoint};

/// Network operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Authorization code exchange against the token endpoint.
	TokenExchange,
	/// Profile fetch for the authenticated user.
	UserProfile,
	/// Aggregated profiles fetch.
	AggregatedProfile,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::TokenExchange => "token_exchange",
			Operation::UserProfile => "user_profile",
			Operation::AggregatedProfile => "aggregated_profile",
		}
	}

	/// Provider endpoint the operation talks to.
	pub const fn endpoint(self) -> Endpoint {
		match self {
			Operation::TokenExchange => Endpoint::Token,
			Operation::UserProfile => Endpoint::Profile,
			Operation::AggregatedProfile => Endpoint::Profiles,
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside an operation span, recording the attempt, outcome and latency.
pub(crate) async fn observe<T, Fut>(
	operation: Operation,
	stage: &'static str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = CallSpan::new(operation, stage);
	let started = Instant::now();

	record_outcome(operation, Outcome::Attempt);

	let result = span.instrument(fut).await;
	let outcome = if result.is_ok() { Outcome::Success } else { Outcome::Failure };

	span.finish(&result);
	record_outcome(operation, outcome);
	record_latency(operation, outcome, started.elapsed());

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::AuthStateError;

	#[test]
	fn operations_map_to_their_endpoints() {
		assert_eq!(Operation::TokenExchange.endpoint(), Endpoint::Token);
		assert_eq!(Operation::UserProfile.endpoint(), Endpoint::Profile);
		assert_eq!(Operation::AggregatedProfile.endpoint(), Endpoint::Profiles);
	}

	#[tokio::test]
	async fn observe_returns_the_wrapped_result() {
		let value = observe(Operation::UserProfile, "test", async { Ok(7) })
			.await
			.expect("Successful calls should pass through.");

		assert_eq!(value, 7);

		let err = observe(Operation::TokenExchange, "test", async {
			Err::<(), Error>(AuthStateError::MissingAuthorizationCode.into())
		})
		.await
		.expect_err("Failures should pass through.");

		assert_eq!(err.category(), "auth_state");
	}
}
