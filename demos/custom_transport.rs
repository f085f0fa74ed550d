//! Demonstrates registering a custom HTTP client and fault mapper that emit non-reqwest errors.
//!
//! 1. Implement [`UserinfoHttpClient`] so the transport hands back every received response as an
//!    [`AuthorityResponse`], whatever its status.
//! 2. Provide a [`TransportFaultMapper`] that understands the transport's error type and decides
//!    which faults mean the authority was unreachable.
//! 3. Wrap both handles in `Arc` and pass them to [`VerificationClient::with_http_client`].
//! 4. Route diagnostic records wherever the embedding service wants them; a [`MemorySink`] keeps
//!    them in-process for this demo.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
// self
use sso_verifier::{
	auth::{BearerToken, Verification},
	authority::AuthorityEndpoint,
	error::VerificationFailure,
	http::{AuthorityResponse, TransportFuture, UserinfoHttpClient, UserinfoRequest},
	obs::MemorySink,
	verify::{TransportFaultMapper, VerificationClient, error_chain},
};

const IDENTITY_BODY: &str = r#"{"sub":"123","email_verified":true,"preferred_username":"abc"}"#;
const REJECTION_BODY: &str =
	r#"{"error":"invalid_token","error_description":"Token verification failed"}"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let endpoint: AuthorityEndpoint = "https://sso.example.com".parse()?;
	let sink = MemorySink::new();
	let mapper = <Arc<MockFaultMapper>>::new(MockFaultMapper);
	let accepting: VerificationClient<MockHttpClient, MockFaultMapper> =
		VerificationClient::with_http_client(
			endpoint.clone(),
			Arc::new(sink.clone()),
			Arc::new(MockHttpClient::respond(200, IDENTITY_BODY)),
			Arc::clone(&mapper),
		);

	match accepting.verify(&BearerToken::new("valid_token")).await? {
		Verification::Verified(identity) =>
			println!("Identity asserted by the mock transport: {}.", identity.preferred_username),
		Verification::Rejected(rejection) =>
			println!("Mock transport unexpectedly rejected the token: {rejection}."),
	}

	let rejecting: VerificationClient<MockHttpClient, MockFaultMapper> =
		VerificationClient::with_http_client(
			endpoint.clone(),
			Arc::new(sink.clone()),
			Arc::new(MockHttpClient::respond(401, REJECTION_BODY)),
			Arc::clone(&mapper),
		);

	match rejecting.verify(&BearerToken::new("expired_token")).await? {
		Verification::Verified(identity) =>
			println!("Mock transport unexpectedly verified subject {}.", identity.subject),
		Verification::Rejected(rejection) =>
			println!("Rejection returned as a normal value: {rejection}."),
	}

	let refusing: VerificationClient<MockHttpClient, MockFaultMapper> =
		VerificationClient::with_http_client(
			endpoint,
			Arc::new(sink.clone()),
			Arc::new(MockHttpClient::transport_error(MockTransportError::ConnectRefused {
				authority: "sso.example.com",
			})),
			mapper,
		);

	match refusing.verify(&BearerToken::new("valid_token")).await {
		Ok(_) => println!("Mock transport unexpectedly produced a verdict."),
		Err(failure) => println!("Transport fault mapped by the client: {failure}"),
	}

	for record in sink.drain() {
		println!("Diagnostic [{}]: {}", record.kind, record.message);
	}

	Ok(())
}

#[derive(Clone, Debug)]
enum MockTransportError {
	ConnectRefused {
		authority: &'static str,
	},
	#[allow(unused)]
	BackendClosed,
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectRefused { authority } =>
				write!(f, "Connection refused by {authority}"),
			Self::BackendClosed => write!(f, "Connection closed before the response arrived"),
		}
	}
}
impl StdError for MockTransportError {}

#[derive(Clone)]
enum MockBehavior {
	Respond { status: u16, body: &'static str },
	TransportError(MockTransportError),
}

#[derive(Clone)]
struct MockHttpClient {
	behavior: MockBehavior,
}
impl MockHttpClient {
	fn respond(status: u16, body: &'static str) -> Self {
		Self { behavior: MockBehavior::Respond { status, body } }
	}

	fn transport_error(error: MockTransportError) -> Self {
		Self { behavior: MockBehavior::TransportError(error) }
	}
}
impl UserinfoHttpClient for MockHttpClient {
	type TransportError = MockTransportError;

	fn execute(&self, _request: UserinfoRequest) -> TransportFuture<'_, Self::TransportError> {
		let behavior = self.behavior.clone();

		Box::pin(async move {
			match behavior {
				MockBehavior::Respond { status, body } =>
					Ok(AuthorityResponse::new(status, body.as_bytes())),
				MockBehavior::TransportError(error) => Err(error),
			}
		})
	}
}

#[derive(Clone, Default)]
struct MockFaultMapper;
impl TransportFaultMapper<MockTransportError> for MockFaultMapper {
	fn map_fault(&self, error: MockTransportError) -> VerificationFailure {
		let cause = error_chain(&error);

		match error {
			MockTransportError::ConnectRefused { .. } => VerificationFailure::unreachable(cause),
			MockTransportError::BackendClosed => VerificationFailure::unexpected(cause, None),
		}
	}
}
