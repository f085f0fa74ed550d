//! Identity attributes asserted by the authority on a successful verification.

// self
use crate::_prelude::*;

/// Authenticated principal attributes extracted from a userinfo success response.
///
/// Wire fields are `sub`, `email_verified`, and `preferred_username`; unknown claims in
/// the response are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
	/// Stable subject identifier of the principal at the authority.
	#[serde(rename = "sub")]
	pub subject: String,
	/// Whether the authority has verified the principal's email address.
	pub email_verified: bool,
	/// Username the principal prefers to be referred to as.
	pub preferred_username: String,
}
