// std
use std::time::Duration as StdDuration;
// self
use crate::obs::{Operation, Outcome};

/// Counts one attempt or settled outcome in `singly_oauth_call_total`.
pub fn record_outcome(operation: Operation, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"singly_oauth_call_total",
		"operation" => operation.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (operation, outcome);
}

/// Records how long a settled call took in `singly_oauth_call_duration_seconds`.
pub fn record_latency(operation: Operation, outcome: Outcome, elapsed: StdDuration) {
	#[cfg(feature = "metrics")]
	metrics::histogram!(
		"singly_oauth_call_duration_seconds",
		"operation" => operation.as_str(),
		"outcome" => outcome.as_str()
	)
	.record(elapsed.as_secs_f64());
	#[cfg(not(feature = "metrics"))]
	let _ = (operation, outcome, elapsed);
}
