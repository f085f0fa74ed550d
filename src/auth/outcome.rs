//! Tagged verification outcome covering every interpretable authority response.

// self
use crate::{
	_prelude::*,
	auth::{RejectedToken, VerifiedIdentity},
};

/// Outcome of a completed token verification round trip.
///
/// Both arms are normal values. A rejected token is an expected, frequent business
/// outcome; callers branch on it rather than catching an error. Operational failures
/// (unreachable authority, abnormal responses) are signaled separately as
/// [`VerificationFailure`](crate::error::VerificationFailure).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
	/// Authority accepted the token and asserted the principal's attributes.
	Verified(VerifiedIdentity),
	/// Authority refused the token with a structured explanation.
	Rejected(RejectedToken),
}
impl Verification {
	/// Returns true when the token was accepted.
	pub const fn is_verified(&self) -> bool {
		matches!(self, Self::Verified(_))
	}

	/// Returns the asserted identity, if the token was accepted.
	pub const fn identity(&self) -> Option<&VerifiedIdentity> {
		match self {
			Self::Verified(identity) => Some(identity),
			Self::Rejected(_) => None,
		}
	}

	/// Returns the rejection verdict, if the token was refused.
	pub const fn rejection(&self) -> Option<&RejectedToken> {
		match self {
			Self::Verified(_) => None,
			Self::Rejected(rejection) => Some(rejection),
		}
	}

	/// Splits the outcome into a [`Result`] for callers that treat rejection as an error.
	pub fn into_result(self) -> Result<VerifiedIdentity, RejectedToken> {
		match self {
			Self::Verified(identity) => Ok(identity),
			Self::Rejected(rejection) => Err(rejection),
		}
	}
}
