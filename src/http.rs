//! Transport primitives for userinfo verification calls.
//!
//! The module exposes [`UserinfoHttpClient`] so embedders can integrate custom HTTP
//! stacks. Implementations issue exactly one `POST` per [`execute`] call and hand back
//! every HTTP response the authority produced, whatever its status, as an
//! [`AuthorityResponse`]; transport errors are reserved for round trips that yielded no
//! response at all. Outcome classification stays inside the verification client.
//!
//! [`execute`]: UserinfoHttpClient::execute

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
use crate::{_prelude::*, auth::BearerToken};

/// `Content-Type` header value sent with every userinfo request.
pub const USERINFO_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Boxed response future returned by [`UserinfoHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<AuthorityResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing the userinfo round trip.
///
/// The trait is the crate's only dependency on an HTTP stack. Implementations must not
/// map HTTP error statuses into [`TransportError`](Self::TransportError) values; a 401
/// or a 503 is still a received response and must come back as an
/// [`AuthorityResponse`]. Implementations must also not retry: one `execute` call is
/// one request on the wire.
pub trait UserinfoHttpClient
where
	Self: Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Issues `POST {request.url}` with an empty body, a
	/// `Content-Type: application/x-www-form-urlencoded` header, and an
	/// `Authorization: Bearer {token}` header.
	fn execute(&self, request: UserinfoRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Resolved request handed to the transport.
#[derive(Clone, Debug)]
pub struct UserinfoRequest {
	/// Absolute userinfo URL derived from the authority endpoint.
	pub url: Url,
	/// Credential forwarded verbatim in the `Authorization` header.
	pub token: BearerToken,
}
impl UserinfoRequest {
	/// Builds a request from the resolved URL and the presented token.
	pub fn new(url: Url, token: BearerToken) -> Self {
		Self { url, token }
	}
}

/// Raw HTTP response as received from the authority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorityResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body bytes.
	pub body: Vec<u8>,
}
impl AuthorityResponse {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Builds a response from a status code and body bytes.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns the body decoded as UTF-8, replacing invalid sequences.
	pub fn body_utf8_lossy(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Returns a truncated rendition of the body suitable for failure causes.
	pub fn body_preview(&self) -> String {
		let body = self.body_utf8_lossy();

		if body.chars().count() <= Self::BODY_PREVIEW_LIMIT {
			return body;
		}

		let mut buf = String::new();

		for (idx, ch) in body.chars().enumerate() {
			if idx >= Self::BODY_PREVIEW_LIMIT {
				buf.push('…');

				break;
			}
			buf.push(ch);
		}

		buf
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Deadlines belong to the wrapped client's configuration; the verification layer never
/// imposes its own timeout on the round trip.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestUserinfoClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestUserinfoClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestUserinfoClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestUserinfoClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl UserinfoHttpClient for ReqwestUserinfoClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: UserinfoRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			// No `.body(...)` call, so reqwest sends `Content-Length: 0`.
			let response = client
				.post(request.url)
				.header(CONTENT_TYPE, USERINFO_CONTENT_TYPE)
				.bearer_auth(request.token.expose())
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(AuthorityResponse { status, body })
		})
	}
}
