//! Bearer token wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Opaque bearer token presented for verification.
///
/// The raw value never appears in `Debug`/`Display` output; the only way to read it back
/// is [`BearerToken::expose`], which the transport layer uses to build the
/// `Authorization` header. The token is forwarded to the authority verbatim, with no
/// client-side syntax checks.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerToken(String);
impl BearerToken {
	/// Wraps a raw token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for BearerToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<&str> for BearerToken {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for BearerToken {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BearerToken").field(&"<redacted>").finish()
	}
}
impl Display for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
