// self
use crate::{_prelude::*, obs::AuthStage, outcome::Outcome};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedAuth<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedAuth<F> = F;

/// A span wrapping one authentication attempt.
#[derive(Clone, Debug)]
pub struct AuthSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl AuthSpan {
	/// Creates a new span tagged with the strategy name and remote host.
	pub fn new(strategy: &'static str, remote_host: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("smartnsf_auth.authenticate", strategy, remote_host);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (strategy, remote_host);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedAuth<Fut>
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
}

/// Emits a debug event when the attempt reaches `stage`.
pub fn trace_stage(stage: AuthStage) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(stage = stage.as_str(), "Authentication stage reached.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = stage;
	}
}

/// Emits a debug event explaining why a login response was not accepted as an identity.
pub fn trace_rejection(reason: &(dyn StdError + 'static)) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(error = reason, "Login response rejected.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = reason;
	}
}

/// Emits the terminal event of an attempt. Users and credentials are never logged.
pub fn trace_outcome<U>(outcome: &Outcome<U>) {
	#[cfg(feature = "tracing")]
	{
		match outcome {
			Outcome::Success(_) => tracing::info!(outcome = "success", "Authentication succeeded."),
			Outcome::Fail(failure) => tracing::debug!(
				outcome = "fail",
				status = failure.status,
				message = failure.message.as_str(),
				"Authentication failed."
			),
			Outcome::Error(err) =>
				tracing::warn!(outcome = "error", error = %err, "Authentication errored."),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn trace_helpers_noop_without_subscriber() {
		trace_stage(AuthStage::Extracted);
		trace_outcome(&Outcome::<()>::Error(Error::NoUser));
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = AuthSpan::new("smartnsf", "https://example.org");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
