//! Bearer-token verification against an SSO authority’s userinfo endpoint—typed outcomes,
//! pluggable transports, and diagnostic sinks in one crate built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod authority;
pub mod error;
pub mod http;
pub mod obs;
pub mod verify;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		authority::AuthorityEndpoint,
		http::ReqwestUserinfoClient,
		obs::MemorySink,
		verify::{ReqwestFaultMapper, VerificationClient},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = VerificationClient<ReqwestUserinfoClient, ReqwestFaultMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestUserinfoClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestUserinfoClient::with_client(client)
	}

	/// Constructs a [`VerificationClient`] wired to a [`MemorySink`], the default fault
	/// mapper, and the reqwest transport used across integration tests.
	pub fn build_reqwest_test_client(
		endpoint: AuthorityEndpoint,
	) -> (ReqwestTestClient, MemorySink) {
		let sink = MemorySink::new();
		let client = VerificationClient::with_http_client(
			endpoint,
			Arc::new(sink.clone()),
			test_reqwest_http_client(),
			Arc::new(ReqwestFaultMapper),
		);

		(client, sink)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Result, VerificationFailure};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
