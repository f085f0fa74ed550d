//! Transport fault classification for round trips that produced no response.

// self
use crate::_prelude::*;

/// Decides how a transport error surfaces to callers.
///
/// Invoked only when the transport yielded no
/// [`AuthorityResponse`](crate::http::AuthorityResponse); received responses, whatever
/// their status, never reach the mapper. The discriminating question is whether the
/// authority could be contacted at all, not which platform errno the socket layer
/// reported.
pub trait TransportFaultMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts a transport error into a caller-facing failure.
	fn map_fault(&self, error: E) -> VerificationFailure;
}

/// Default mapper for reqwest-backed transports.
///
/// A reqwest error carrying no HTTP status that is connect-related or a timeout means
/// no response was obtained, so the authority counts as unreachable. Everything else
/// (request building, body streaming, decoding) is an unexpected fault.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestFaultMapper;
#[cfg(feature = "reqwest")]
impl TransportFaultMapper<ReqwestError> for ReqwestFaultMapper {
	fn map_fault(&self, err: ReqwestError) -> VerificationFailure {
		let cause = error_chain(&err);

		if err.status().is_none() && (err.is_connect() || err.is_timeout()) {
			return VerificationFailure::unreachable(cause);
		}

		VerificationFailure::unexpected(cause, err.status().map(|code| code.as_u16()))
	}
}

/// Renders an error and its source chain into one cause string.
///
/// Transport stacks wrap low-level failures several layers deep; joining the chain
/// keeps detail such as `Connection refused` visible in failure causes and diagnostic
/// records.
pub fn error_chain(err: &(impl StdError + ?Sized)) -> String {
	let mut rendered = err.to_string();
	let mut source = err.source();

	while let Some(cause) = source {
		rendered.push_str(": ");
		rendered.push_str(&cause.to_string());

		source = cause.source();
	}

	rendered
}
