// self
use sso_verifier::{
	_preludet::*,
	auth::BearerToken,
	authority::AuthorityEndpoint,
	http::{AuthorityResponse, TransportFuture, UserinfoHttpClient, UserinfoRequest},
	obs::{DiagnosticKind, MemorySink},
	verify::{TransportFaultMapper, VerificationClient},
};

#[derive(Debug, ThisError)]
#[error("Connection refused")]
struct RefusedError;

#[derive(Clone, Copy)]
enum ScriptedOutcome {
	Respond { status: u16, body: &'static str },
	Refuse,
}

struct ScriptedHttpClient(ScriptedOutcome);
impl UserinfoHttpClient for ScriptedHttpClient {
	type TransportError = RefusedError;

	fn execute(&self, _: UserinfoRequest) -> TransportFuture<'_, Self::TransportError> {
		let outcome = match self.0 {
			ScriptedOutcome::Respond { status, body } =>
				Ok(AuthorityResponse::new(status, body.as_bytes())),
			ScriptedOutcome::Refuse => Err(RefusedError),
		};

		Box::pin(async move { outcome })
	}
}

struct RefusalFaultMapper;
impl TransportFaultMapper<RefusedError> for RefusalFaultMapper {
	fn map_fault(&self, error: RefusedError) -> VerificationFailure {
		VerificationFailure::unreachable(error.to_string())
	}
}

fn endpoint() -> AuthorityEndpoint {
	"https://sso.example.com"
		.parse()
		.expect("Scripted authority endpoint should parse successfully.")
}

fn scripted_client(
	outcome: ScriptedOutcome,
	sink: &MemorySink,
) -> VerificationClient<ScriptedHttpClient, RefusalFaultMapper> {
	VerificationClient::with_http_client(
		endpoint(),
		Arc::new(sink.clone()),
		ScriptedHttpClient(outcome),
		RefusalFaultMapper,
	)
}

#[tokio::test]
async fn sink_accumulates_records_in_emission_order() {
	let sink = MemorySink::new();
	let rejected = scripted_client(
		ScriptedOutcome::Respond {
			status: 401,
			body: r#"{"error":"invalid_token","error_description":"Token verification failed"}"#,
		},
		&sink,
	);
	let erroring =
		scripted_client(ScriptedOutcome::Respond { status: 502, body: "bad gateway" }, &sink);
	let refused = scripted_client(ScriptedOutcome::Refuse, &sink);

	let _ = rejected.verify(&BearerToken::new("expired_token")).await;
	let _ = erroring.verify(&BearerToken::new("valid_token")).await;
	let _ = refused.verify(&BearerToken::new("valid_token")).await;

	let kinds = sink.records().into_iter().map(|record| record.kind).collect::<Vec<_>>();

	assert_eq!(kinds, vec![
		DiagnosticKind::AuthorizationRejected,
		DiagnosticKind::UnexpectedResponse,
		DiagnosticKind::AuthorityUnreachable
	]);
}

#[tokio::test]
async fn drain_separates_scenarios() {
	let sink = MemorySink::new();
	let client = scripted_client(ScriptedOutcome::Refuse, &sink);

	let _ = client.verify(&BearerToken::new("valid_token")).await;

	let drained = sink.drain();

	assert_eq!(drained.len(), 1);
	assert!(sink.is_empty(), "Draining should leave the sink empty.");

	let _ = client.verify(&BearerToken::new("valid_token")).await;

	assert_eq!(sink.len(), 1, "Records emitted after draining should accumulate afresh.");
}

#[tokio::test]
async fn with_diagnostic_sink_replaces_the_sink() {
	let original = MemorySink::new();
	let replacement = MemorySink::new();
	let client = scripted_client(ScriptedOutcome::Refuse, &original)
		.with_diagnostic_sink(Arc::new(replacement.clone()));

	let _ = client.verify(&BearerToken::new("valid_token")).await;

	assert!(original.is_empty(), "The replaced sink should receive nothing.");
	assert_eq!(replacement.len(), 1, "The replacement sink should receive the record.");
}
