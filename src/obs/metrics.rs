// self
use crate::{grant::GrantType, obs::ExchangeOutcome};

/// Records an obtain outcome via the global metrics recorder (when enabled).
pub fn record_exchange_outcome(grant: GrantType, outcome: ExchangeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_exchange_obtain_total",
			"grant" => grant.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (grant, outcome);
	}
}
