// self
use crate::{
	_prelude::*,
	obs::{DiagnosticRecord, DiagnosticSink},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedVerify<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedVerify<F> = F;

/// A span builder wrapped around the verification round trip.
#[derive(Clone, Debug)]
pub struct VerifySpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl VerifySpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("sso_verifier.verify", stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> VerifySpanGuard {
		#[cfg(feature = "tracing")]
		{
			VerifySpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			VerifySpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedVerify<Fut>
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

/// RAII guard returned by [`VerifySpan::entered`].
pub struct VerifySpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for VerifySpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("VerifySpanGuard(..)")
	}
}

/// Default sink forwarding records to the `tracing` pipeline.
///
/// Authorization rejections are expected business outcomes and land at `warn` level;
/// operational failures land at `error`. Without the `tracing` feature the sink
/// discards records.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;
impl DiagnosticSink for TracingSink {
	fn record(&self, record: DiagnosticRecord) {
		#[cfg(feature = "tracing")]
		{
			use crate::obs::DiagnosticKind;

			match record.kind {
				DiagnosticKind::AuthorizationRejected => tracing::warn!(
					kind = record.kind.as_str(),
					status = record.status,
					body = record.body.as_deref(),
					"{}",
					record.message,
				),
				DiagnosticKind::UnexpectedResponse | DiagnosticKind::AuthorityUnreachable => {
					tracing::error!(
						kind = record.kind.as_str(),
						status = record.status,
						body = record.body.as_deref(),
						"{}",
						record.message,
					)
				},
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = record;
		}
	}
}
