//! Authority endpoint configuration and userinfo URL derivation.

// self
use crate::_prelude::*;

/// Errors raised while constructing an [`AuthorityEndpoint`].
#[derive(Debug, ThisError)]
pub enum AuthorityEndpointError {
	/// Supplied string could not be parsed as a URL.
	#[error("Authority endpoint is not a valid URL.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTPS.
	#[error("Authority endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// URL cannot carry appended path segments.
	#[error("Authority endpoint cannot serve as a base URL: {url}.")]
	CannotBeABase {
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Validated base URL of the SSO authority.
///
/// Immutable for the lifetime of the client. The absolute userinfo URL is derived once
/// at construction by appending a `userinfo` segment to the base path; a trailing slash
/// on the base does not produce an empty segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorityEndpoint {
	base: Url,
	userinfo: Url,
}
impl AuthorityEndpoint {
	/// Validates the base URL and derives the userinfo URL.
	pub fn new(base: Url) -> Result<Self, AuthorityEndpointError> {
		if base.scheme() != "https" {
			return Err(AuthorityEndpointError::InsecureEndpoint { url: base.to_string() });
		}

		let mut userinfo = base.clone();

		userinfo
			.path_segments_mut()
			.map_err(|()| AuthorityEndpointError::CannotBeABase { url: base.to_string() })?
			.pop_if_empty()
			.push("userinfo");

		Ok(Self { base, userinfo })
	}

	/// Returns the validated base URL.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Returns the absolute userinfo URL.
	pub fn userinfo(&self) -> &Url {
		&self.userinfo
	}
}
impl FromStr for AuthorityEndpoint {
	type Err = AuthorityEndpointError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let base =
			Url::parse(s).map_err(|source| AuthorityEndpointError::InvalidUrl { source })?;

		Self::new(base)
	}
}
impl Display for AuthorityEndpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.base, f)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn userinfo_url_appends_segment() {
		let endpoint = "https://sso.example.com"
			.parse::<AuthorityEndpoint>()
			.expect("Authority endpoint should parse successfully.");

		assert_eq!(endpoint.userinfo().as_str(), "https://sso.example.com/userinfo");
	}

	#[test]
	fn userinfo_url_preserves_base_path() {
		let endpoint = "https://sso.example.com/auth/realms/main"
			.parse::<AuthorityEndpoint>()
			.expect("Authority endpoint should parse successfully.");

		assert_eq!(
			endpoint.userinfo().as_str(),
			"https://sso.example.com/auth/realms/main/userinfo",
		);
	}

	#[test]
	fn userinfo_url_ignores_trailing_slash() {
		let endpoint = "https://sso.example.com/auth/"
			.parse::<AuthorityEndpoint>()
			.expect("Authority endpoint should parse successfully.");

		assert_eq!(endpoint.userinfo().as_str(), "https://sso.example.com/auth/userinfo");
	}

	#[test]
	fn base_preserves_the_original_url() {
		let endpoint = "https://sso.example.com/auth"
			.parse::<AuthorityEndpoint>()
			.expect("Authority endpoint should parse successfully.");

		assert_eq!(endpoint.base().as_str(), "https://sso.example.com/auth");
	}

	#[test]
	fn insecure_endpoints_are_rejected() {
		let result = "http://sso.example.com".parse::<AuthorityEndpoint>();

		assert!(matches!(result, Err(AuthorityEndpointError::InsecureEndpoint { .. })));
	}

	#[test]
	fn unparsable_endpoints_are_rejected() {
		let result = "not a url".parse::<AuthorityEndpoint>();

		assert!(matches!(result, Err(AuthorityEndpointError::InvalidUrl { .. })));
	}
}
