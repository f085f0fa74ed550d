// self
use crate::obs::VerifyOutcome;

/// Records a verification outcome via the global metrics recorder (when enabled).
pub fn record_verify_outcome(outcome: VerifyOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"sso_verifier_verification_total",
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
