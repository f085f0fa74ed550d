//! Diagnostics and optional observability helpers for verification calls.
//!
//! Diagnostic records are delivered to an injected [`DiagnosticSink`] collaborator, not
//! a process-global logger, so embedders decide where operational detail goes. The
//! crate ships [`TracingSink`] (forwards records to the `tracing` pipeline) and
//! [`MemorySink`] (in-process retention for tests and embedders).
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `sso_verifier.verify` with the
//!   `stage` field and to make [`TracingSink`] forward records as `warn!`/`error!`
//!   events.
//! - Enable `metrics` to increment the `sso_verifier_verification_total` counter for
//!   every attempt/outcome, labeled by `outcome`.

mod memory;
mod metrics;
mod tracing;

pub use memory::*;
pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Sink receiving one structured record per noteworthy verification event.
///
/// Injected at client construction. Sink behavior never alters the client's control
/// flow: a rejection is still returned as a normal value and a failure is still
/// signaled to the caller whatever the sink does with the record.
pub trait DiagnosticSink
where
	Self: Send + Sync,
{
	/// Consumes one diagnostic record.
	fn record(&self, record: DiagnosticRecord);
}

/// Classification of a diagnostic record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
	/// Authority refused the presented token (HTTP 401).
	AuthorizationRejected,
	/// Authority answered abnormally, or the exchange broke down mid-flight.
	UnexpectedResponse,
	/// Authority could not be contacted at all.
	AuthorityUnreachable,
}
impl DiagnosticKind {
	/// Returns a stable label suitable for log or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DiagnosticKind::AuthorizationRejected => "authorization_rejected",
			DiagnosticKind::UnexpectedResponse => "unexpected_response",
			DiagnosticKind::AuthorityUnreachable => "authority_unreachable",
		}
	}
}
impl Display for DiagnosticKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Structured diagnostic payload emitted alongside rejections and failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
	/// Event classification.
	pub kind: DiagnosticKind,
	/// Human-readable summary of the event.
	pub message: String,
	/// HTTP status code, when a response was received.
	pub status: Option<u16>,
	/// Raw (lossily decoded) response body, when a response was received.
	pub body: Option<String>,
}
impl DiagnosticRecord {
	/// Builds a record with neither status nor body attached.
	pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
		Self { kind, message: message.into(), status: None, body: None }
	}

	/// Attaches the observed HTTP status.
	pub fn with_status(mut self, status: u16) -> Self {
		self.status = Some(status);

		self
	}

	/// Attaches the raw response body.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());

		self
	}
}

/// Outcome labels recorded for each verification attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerifyOutcome {
	/// Entry to the verification round trip.
	Attempt,
	/// Authority accepted the token.
	Verified,
	/// Authority refused the token.
	Rejected,
	/// Authority could not be contacted.
	Unreachable,
	/// Any other operational failure.
	Unexpected,
}
impl VerifyOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			VerifyOutcome::Attempt => "attempt",
			VerifyOutcome::Verified => "verified",
			VerifyOutcome::Rejected => "rejected",
			VerifyOutcome::Unreachable => "unreachable",
			VerifyOutcome::Unexpected => "unexpected",
		}
	}
}
impl Display for VerifyOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
