//! The userinfo round trip and its outcome classification.
//!
//! One [`verify`](VerificationClient::verify) call is one `POST` against the
//! authority's userinfo endpoint. The authority's heterogeneous outcomes collapse into
//! three caller-facing shapes: an interpretable response becomes a normal
//! [`Verification`] value (accepted or rejected), an abnormal response becomes an
//! [`Unexpected`](VerificationFailure::Unexpected) failure, and a round trip that never
//! produced a response becomes [`Unreachable`](VerificationFailure::Unreachable) or
//! [`Unexpected`](VerificationFailure::Unexpected) per the fault mapper's verdict.

// self
use crate::{
	_prelude::*,
	auth::{BearerToken, RejectedToken, Verification, VerifiedIdentity},
	http::{AuthorityResponse, UserinfoHttpClient, UserinfoRequest},
	obs::{self, DiagnosticKind, DiagnosticRecord, VerifyOutcome, VerifySpan},
	verify::{TransportFaultMapper, VerificationClient},
};

const STATUS_OK: u16 = 200;
const STATUS_UNAUTHORIZED: u16 = 401;

impl<C, M> VerificationClient<C, M>
where
	C: ?Sized + UserinfoHttpClient,
	M: ?Sized + TransportFaultMapper<C::TransportError>,
{
	/// Verifies a bearer token against the authority's userinfo endpoint.
	///
	/// Exactly one request is issued per call; the client never retries, caches, or
	/// imposes its own deadline. A rejected token (HTTP 401 with a structured error
	/// body) is returned as [`Verification::Rejected`], not as an error; the `Err` arm
	/// is reserved for round trips that produced no usable verdict. Every rejection and
	/// every failure is reported to the diagnostic sink exactly once.
	pub async fn verify(&self, token: &BearerToken) -> Result<Verification> {
		let span = VerifySpan::new("verify");

		obs::record_verify_outcome(VerifyOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request =
					UserinfoRequest::new(self.endpoint.userinfo().clone(), token.clone());

				match self.http_client.execute(request).await {
					Ok(response) => self.classify_response(response),
					Err(error) => Err(self.surface_fault(error)),
				}
			})
			.await;

		obs::record_verify_outcome(match &result {
			Ok(Verification::Verified(_)) => VerifyOutcome::Verified,
			Ok(Verification::Rejected(_)) => VerifyOutcome::Rejected,
			Err(VerificationFailure::Unreachable { .. }) => VerifyOutcome::Unreachable,
			Err(VerificationFailure::Unexpected { .. }) => VerifyOutcome::Unexpected,
		});

		result
	}

	/// Classifies a received HTTP response into the caller-facing outcome.
	fn classify_response(&self, response: AuthorityResponse) -> Result<Verification> {
		match response.status {
			STATUS_OK => match parse_body::<VerifiedIdentity>(&response) {
				Ok(identity) => Ok(Verification::Verified(identity)),
				Err(failure) => Err(self.surface_failure(failure, Some(&response))),
			},
			STATUS_UNAUTHORIZED => match parse_body::<RejectedToken>(&response) {
				Ok(rejection) => {
					self.diagnostic_sink.record(
						DiagnosticRecord::new(
							DiagnosticKind::AuthorizationRejected,
							format!(
								"Invalid token: the SSO authority rejected the bearer token \
								 ({rejection}).",
							),
						)
						.with_status(response.status)
						.with_body(response.body_utf8_lossy()),
					);

					Ok(Verification::Rejected(rejection))
				},
				Err(failure) => Err(self.surface_failure(failure, Some(&response))),
			},
			status => {
				let preview = response.body_preview();
				let cause = if preview.is_empty() {
					format!("userinfo endpoint answered HTTP {status} with an empty body")
				} else {
					format!("userinfo endpoint answered HTTP {status}: {preview}")
				};
				let failure = VerificationFailure::unexpected(cause, Some(status));

				Err(self.surface_failure(failure, Some(&response)))
			},
		}
	}

	/// Maps a transport error through the fault mapper and surfaces the result.
	fn surface_fault(&self, error: C::TransportError) -> VerificationFailure {
		let failure = self.fault_mapper.map_fault(error);

		self.surface_failure(failure, None)
	}

	/// Emits exactly one diagnostic record describing the failure, then returns it.
	fn surface_failure(
		&self,
		failure: VerificationFailure,
		response: Option<&AuthorityResponse>,
	) -> VerificationFailure {
		let kind = if failure.is_unreachable() {
			DiagnosticKind::AuthorityUnreachable
		} else {
			DiagnosticKind::UnexpectedResponse
		};
		let mut record = DiagnosticRecord::new(kind, failure.to_string());

		if let Some(status) = failure.status() {
			record = record.with_status(status);
		}
		if let Some(response) = response {
			record = record.with_status(response.status).with_body(response.body_utf8_lossy());
		}

		self.diagnostic_sink.record(record);

		failure
	}
}

/// Parses a 200/401 body, naming the failing field path when the body is malformed.
///
/// Trailing data after the JSON document counts as malformed.
fn parse_body<T>(response: &AuthorityResponse) -> Result<T>
where
	T: serde::de::DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
	let parsed = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|error| malformed_body(response, error))?;

	deserializer.end().map_err(|error| malformed_body(response, error))?;

	Ok(parsed)
}

/// Builds the failure surfaced for a body that did not deserialize.
fn malformed_body(response: &AuthorityResponse, error: impl Display) -> VerificationFailure {
	VerificationFailure::unexpected(
		format!(
			"userinfo endpoint answered HTTP {} with a malformed body: {error}",
			response.status,
		),
		Some(response.status),
	)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		authority::AuthorityEndpoint,
		http::TransportFuture,
		obs::MemorySink,
		verify::fault::error_chain,
	};

	#[derive(Debug, ThisError)]
	#[error("{0}")]
	struct FakeTransportError(String);

	struct FakeHttpClient {
		response: Option<AuthorityResponse>,
	}
	impl UserinfoHttpClient for FakeHttpClient {
		type TransportError = FakeTransportError;

		fn execute(&self, _: UserinfoRequest) -> TransportFuture<'_, Self::TransportError> {
			let outcome = match &self.response {
				Some(response) => Ok(response.clone()),
				None => Err(FakeTransportError("Connection refused".into())),
			};

			Box::pin(async move { outcome })
		}
	}

	struct RefusalFaultMapper;
	impl TransportFaultMapper<FakeTransportError> for RefusalFaultMapper {
		fn map_fault(&self, error: FakeTransportError) -> VerificationFailure {
			VerificationFailure::unreachable(error_chain(&error))
		}
	}

	fn client(
		response: Option<AuthorityResponse>,
	) -> (VerificationClient<FakeHttpClient, RefusalFaultMapper>, MemorySink) {
		let endpoint = "https://sso.test"
			.parse::<AuthorityEndpoint>()
			.expect("Authority endpoint should parse successfully.");
		let sink = MemorySink::new();
		let client = VerificationClient::with_http_client(
			endpoint,
			Arc::new(sink.clone()),
			FakeHttpClient { response },
			RefusalFaultMapper,
		);

		(client, sink)
	}

	#[tokio::test]
	async fn ok_response_yields_verified_identity() {
		let body = br#"{"sub":"123","email_verified":true,"preferred_username":"abc"}"#;
		let (client, sink) = client(Some(AuthorityResponse::new(200, body.as_slice())));
		let outcome = client
			.verify(&BearerToken::new("valid_token"))
			.await
			.expect("A 200 response should verify successfully.");

		assert_eq!(
			outcome,
			Verification::Verified(VerifiedIdentity {
				subject: "123".into(),
				email_verified: true,
				preferred_username: "abc".into()
			}),
		);
		assert!(sink.is_empty());
	}

	#[tokio::test]
	async fn unauthorized_yields_rejection_with_one_record() {
		let body =
			br#"{"error":"invalid_token","error_description":"Token verification failed"}"#;
		let (client, sink) = client(Some(AuthorityResponse::new(401, body.as_slice())));
		let outcome = client
			.verify(&BearerToken::new("expired_token"))
			.await
			.expect("A 401 response should surface as a normal rejection value.");

		assert_eq!(
			outcome.rejection(),
			Some(&RejectedToken {
				error_code: "invalid_token".into(),
				error_description: "Token verification failed".into()
			}),
		);

		let records = sink.records();

		assert_eq!(records.len(), 1);
		assert_eq!(records[0].kind, DiagnosticKind::AuthorizationRejected);
		assert_eq!(records[0].status, Some(401));
		assert!(records[0].body.as_deref().is_some_and(|body| body.contains("invalid_token")));
	}

	#[tokio::test]
	async fn unexpected_status_yields_failure_with_record() {
		let (client, sink) = client(Some(AuthorityResponse::new(500, Vec::new())));
		let failure = client
			.verify(&BearerToken::new("valid_token"))
			.await
			.expect_err("A 500 response should surface as an operational failure.");

		assert_eq!(failure.status(), Some(500));
		assert!(failure.to_string().contains("HTTP 500"));

		let records = sink.records();

		assert_eq!(records.len(), 1);
		assert_eq!(records[0].kind, DiagnosticKind::UnexpectedResponse);
		assert_eq!(records[0].status, Some(500));
		assert_eq!(records[0].body.as_deref(), Some(""));
	}

	#[tokio::test]
	async fn malformed_ok_body_yields_unexpected() {
		let (client, sink) = client(Some(AuthorityResponse::new(200, br#"{"sub":42}"#.as_slice())));
		let failure = client
			.verify(&BearerToken::new("valid_token"))
			.await
			.expect_err("A malformed 200 body should surface as a failure.");

		assert!(!failure.is_unreachable());
		assert!(failure.to_string().contains("malformed body"));
		assert_eq!(sink.len(), 1);
	}

	#[tokio::test]
	async fn malformed_rejection_body_yields_unexpected() {
		let (client, sink) = client(Some(AuthorityResponse::new(401, b"not json".as_slice())));
		let failure = client
			.verify(&BearerToken::new("expired_token"))
			.await
			.expect_err("A malformed 401 body should surface as a failure.");

		assert_eq!(failure.status(), Some(401));
		assert_eq!(sink.records()[0].kind, DiagnosticKind::UnexpectedResponse);
	}

	#[tokio::test]
	async fn trailing_data_after_ok_body_yields_unexpected() {
		let body = br#"{"sub":"123","email_verified":true,"preferred_username":"abc"}{"x":1}"#;
		let (client, sink) = client(Some(AuthorityResponse::new(200, body.as_slice())));
		let failure = client
			.verify(&BearerToken::new("valid_token"))
			.await
			.expect_err("A 200 body with trailing data should surface as a failure.");

		assert_eq!(failure.status(), Some(200));
		assert!(failure.to_string().contains("malformed body"));
		assert_eq!(sink.len(), 1);
	}

	#[tokio::test]
	async fn transport_fault_yields_unreachable_with_record() {
		let (client, sink) = client(None);
		let failure = client
			.verify(&BearerToken::new("valid_token"))
			.await
			.expect_err("A refused connection should surface as a failure.");

		assert!(failure.is_unreachable());
		assert!(failure.to_string().contains("Connection refused"));

		let records = sink.records();

		assert_eq!(records.len(), 1);
		assert_eq!(records[0].kind, DiagnosticKind::AuthorityUnreachable);
		assert_eq!(records[0].status, None);
		assert_eq!(records[0].body, None);
		assert!(records[0].message.contains("Connection refused"));
	}
}
