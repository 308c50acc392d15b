// self
use crate::{_prelude::*, grant::GrantType};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedExchange<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedExchange<F> = F;

/// A span builder wrapped around each token-endpoint exchange.
#[derive(Clone, Debug)]
pub struct ExchangeSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ExchangeSpan {
	/// Creates a new span tagged with the provided grant + stage.
	pub fn new(grant: GrantType, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oauth2_exchange.exchange", grant = grant.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (grant, stage);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> ExchangeSpanGuard {
		#[cfg(feature = "tracing")]
		{
			ExchangeSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			ExchangeSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedExchange<Fut>
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

/// RAII guard returned by [`ExchangeSpan::entered`].
pub struct ExchangeSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for ExchangeSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ExchangeSpanGuard(..)")
	}
}
