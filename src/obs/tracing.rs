// self
use crate::{_prelude::*, obs::Operation};

/// Instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// The future itself when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Span around one provider call.
///
/// `outcome` and `error` are declared empty and filled by [`CallSpan::finish`] once the call
/// settles, so a single span carries the whole call.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Opens a span for `operation` issued from `stage`.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"singly_oauth.call",
				operation = operation.as_str(),
				endpoint = operation.endpoint().as_str(),
				stage,
				outcome = tracing::field::Empty,
				error = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Attaches the span to `fut` without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Records the settled outcome. Failures also emit a `warn` event inside the span.
	pub fn finish<T>(&self, result: &Result<T>) {
		#[cfg(feature = "tracing")]
		{
			use crate::obs::Outcome;

			match result {
				Ok(_) => {
					self.span.record("outcome", Outcome::Success.as_str());
				},
				Err(err) => {
					self.span.record("outcome", Outcome::Failure.as_str());
					self.span.record("error", err.category());
					self.span.in_scope(|| tracing::warn!(error = %err, "Provider call failed."));
				},
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = result;
		}
	}
}
