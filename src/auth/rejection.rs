//! Structured rejection verdicts returned by the authority on HTTP 401.

// self
use crate::_prelude::*;

/// Authority's structured explanation for refusing a bearer token.
///
/// Wire fields are `error` and `error_description`. A rejection is a domain outcome the
/// caller is expected to handle, not an operational failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedToken {
	/// Short machine-readable code, e.g. `invalid_token`.
	#[serde(rename = "error")]
	pub error_code: String,
	/// Human-readable explanation of the rejection.
	pub error_description: String,
}
impl Display for RejectedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}: {}", self.error_code, self.error_description)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;

	// self
	use super::*;

	#[test]
	fn rejection_deserializes_wire_fields() {
		let rejection = serde_json::from_value::<RejectedToken>(json!({
			"error": "invalid_token",
			"error_description": "Token verification failed"
		}))
		.expect("Rejection body should deserialize successfully.");

		assert_eq!(rejection, RejectedToken {
			error_code: "invalid_token".into(),
			error_description: "Token verification failed".into()
		});
		assert_eq!(rejection.to_string(), "invalid_token: Token verification failed");
	}
}
