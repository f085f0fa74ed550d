//! Demonstrates verifying bearer tokens with the default reqwest transport and reading
//! the diagnostic records captured along the way.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use sso_verifier::{
	auth::{BearerToken, Verification},
	authority::AuthorityEndpoint,
	http::ReqwestUserinfoClient,
	obs::MemorySink,
	reqwest::Client,
	verify::{ReqwestFaultMapper, VerificationClient},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let accepted_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/userinfo").header("authorization", "Bearer valid_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"sub\":\"123\",\"email_verified\":true,\"preferred_username\":\"abc\"}");
		})
		.await;
	let rejected_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/userinfo").header("authorization", "Bearer expired_token");
			then.status(401).header("content-type", "application/json").body(
				"{\"error\":\"invalid_token\",\"error_description\":\"Token verification failed\"}",
			);
		})
		.await;
	let endpoint: AuthorityEndpoint = server.base_url().parse()?;
	let http_client = ReqwestUserinfoClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let sink = MemorySink::new();
	let client = <VerificationClient<ReqwestUserinfoClient, ReqwestFaultMapper>>::with_http_client(
		endpoint,
		Arc::new(sink.clone()),
		http_client,
		Arc::new(ReqwestFaultMapper),
	);

	println!("Verifying tokens against {}.", client.endpoint.base());

	for token in ["valid_token", "expired_token"] {
		match client.verify(&BearerToken::new(token)).await? {
			Verification::Verified(identity) => println!(
				"Token accepted for {} (subject {}, email verified: {}).",
				identity.preferred_username, identity.subject, identity.email_verified,
			),
			Verification::Rejected(rejection) => println!("Token rejected: {rejection}."),
		}
	}

	for record in sink.drain() {
		println!("Diagnostic [{}]: {}", record.kind, record.message);
	}

	accepted_mock.assert_async().await;
	rejected_mock.assert_async().await;

	Ok(())
}
