// self
use crate::obs::AuthOutcome;

/// Records an authentication outcome via the global metrics recorder (when enabled).
pub fn record_auth_outcome(outcome: AuthOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("smartnsf_auth_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_auth_outcome_noop_without_metrics() {
		record_auth_outcome(AuthOutcome::Fail);
	}
}
