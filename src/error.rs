//! Operational failure types surfaced by the verification client.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`VerificationFailure`] by default.
pub type Result<T, E = VerificationFailure> = std::result::Result<T, E>;

/// Operational failure raised when no interpretable userinfo response was obtained.
///
/// Domain rejections (the authority answering HTTP 401 with a structured error body) are
/// not failures; they surface as [`Verification::Rejected`](crate::auth::Verification)
/// values so callers branch on them without error-style control flow. A
/// [`VerificationFailure`] means the caller cannot proceed: the authority was never
/// heard from, answered abnormally, or the exchange broke down before a verdict.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum VerificationFailure {
	/// Authority infrastructure could not be contacted; no HTTP response was obtained.
	///
	/// Recoverable by caller-level retry/backoff or circuit-breaking; the client itself
	/// never retries.
	#[error("SSO authority is unreachable: {cause}.")]
	Unreachable {
		/// Human-readable connectivity cause, including the transport's source chain.
		cause: String,
	},
	/// Authority answered abnormally, or a fault occurred before or after the round trip.
	///
	/// Not assumed recoverable by simple retry.
	#[error("Unexpected failure while verifying the bearer token: {cause}.")]
	Unexpected {
		/// Human-readable fault description.
		cause: String,
		/// HTTP status code, when a response was received.
		status: Option<u16>,
	},
}
impl VerificationFailure {
	/// Wraps a connectivity cause inside [`VerificationFailure::Unreachable`].
	pub fn unreachable(cause: impl Into<String>) -> Self {
		Self::Unreachable { cause: cause.into() }
	}

	/// Wraps a fault description inside [`VerificationFailure::Unexpected`].
	pub fn unexpected(cause: impl Into<String>, status: Option<u16>) -> Self {
		Self::Unexpected { cause: cause.into(), status }
	}

	/// Returns true when the failure indicates the authority could not be contacted.
	pub const fn is_unreachable(&self) -> bool {
		matches!(self, Self::Unreachable { .. })
	}

	/// Returns the HTTP status observed alongside the failure, if any.
	pub const fn status(&self) -> Option<u16> {
		match self {
			Self::Unreachable { .. } => None,
			Self::Unexpected { status, .. } => *status,
		}
	}
}
