//! Token verification client and its collaborator seams.

pub mod fault;
pub use fault::*;

mod userinfo;

// self
use crate::{
	_prelude::*, authority::AuthorityEndpoint, http::UserinfoHttpClient, obs::DiagnosticSink,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestUserinfoClient, obs::TracingSink};

#[cfg(feature = "reqwest")]
/// Verification client specialized for the crate's default reqwest transport stack.
pub type ReqwestVerificationClient = VerificationClient<ReqwestUserinfoClient, ReqwestFaultMapper>;

/// Verifies bearer tokens against a single SSO authority's userinfo endpoint.
///
/// The client owns the transport, fault mapper, and diagnostic sink references so the
/// round-trip logic can focus on outcome classification. It keeps no per-call state;
/// one instance serves any number of concurrent [`verify`](VerificationClient::verify)
/// calls against its immutable endpoint.
#[derive(Clone)]
pub struct VerificationClient<C, M>
where
	C: ?Sized + UserinfoHttpClient,
	M: ?Sized + TransportFaultMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every userinfo request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub fault_mapper: Arc<M>,
	/// Sink receiving one diagnostic record per rejection or failure.
	pub diagnostic_sink: Arc<dyn DiagnosticSink>,
	/// Authority the client verifies tokens against.
	pub endpoint: AuthorityEndpoint,
}
impl<C, M> VerificationClient<C, M>
where
	C: ?Sized + UserinfoHttpClient,
	M: ?Sized + TransportFaultMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		endpoint: AuthorityEndpoint,
		diagnostic_sink: Arc<dyn DiagnosticSink>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			fault_mapper: mapper.into(),
			diagnostic_sink,
			endpoint,
		}
	}

	/// Sets or replaces the diagnostic sink.
	pub fn with_diagnostic_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
		self.diagnostic_sink = sink;

		self
	}
}
#[cfg(feature = "reqwest")]
impl VerificationClient<ReqwestUserinfoClient, ReqwestFaultMapper> {
	/// Creates a new client for the provided authority endpoint.
	///
	/// The client provisions its own reqwest-backed transport, the default fault
	/// mapper, and a [`TracingSink`], so callers do not need to pass collaborators
	/// explicitly. Use [`VerificationClient::with_diagnostic_sink`] to route
	/// diagnostics elsewhere.
	pub fn new(endpoint: AuthorityEndpoint) -> Self {
		Self::with_http_client(
			endpoint,
			Arc::new(TracingSink),
			ReqwestUserinfoClient::default(),
			Arc::new(ReqwestFaultMapper),
		)
	}
}
impl<C, M> Debug for VerificationClient<C, M>
where
	C: ?Sized + UserinfoHttpClient,
	M: ?Sized + TransportFaultMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("VerificationClient").field("endpoint", &self.endpoint).finish()
	}
}
