// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use oauth2_exchange::{
	auth::Scope,
	config::{ClientAuthMethod, Config},
	decoder::FormDecoder,
	exchange::TokenExchange,
	grant::ClientCredentialsGrant,
	transport::ReqwestTransport,
	url::Url,
};

const CLIENT_ID: &str = "client-credentials";
const CLIENT_SECRET: &str = "secret-credentials";

fn build_exchange(server: &MockServer) -> TokenExchange<ReqwestTransport> {
	let endpoint =
		Url::parse(&server.url("/token")).expect("Mock token endpoint should parse successfully.");
	let config = Config::builder(CLIENT_ID)
		.client_secret(CLIENT_SECRET)
		.auth_method(ClientAuthMethod::RequestBody)
		.token_endpoint(endpoint)
		.build()
		.expect("Test config should build successfully.");

	TokenExchange::new(config, ReqwestTransport::default(), Arc::new(FormDecoder))
}

#[tokio::test]
async fn client_credentials_exchange_decodes_form_bodies() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("accept", "application/x-www-form-urlencoded")
				.body_includes("grant_type=client_credentials")
				.body_includes("scope=api.read+api.write");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("access_token=form-token&token_type=BEARER&expires_in=1800");
		})
		.await;
	let exchange = build_exchange(&server);
	let scope = Scope::new(["api.read", "api.write"])
		.expect("Scope list should be valid for client credentials test.");
	let token = exchange
		.obtain(&ClientCredentialsGrant::new().with_scope(scope))
		.await
		.expect("Client credentials exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(token.access_token.expose(), "form-token");
	assert_eq!(token.token_type.as_str(), "Bearer");
	assert_eq!(token.expires_in.map(|value| value.seconds()), Some(1800));
	assert!(token.refresh_token.is_none());
}

#[tokio::test]
async fn client_credentials_exchange_without_scope_stays_minimal() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.body_includes("grant_type=client_credentials")
				.body_excludes("scope=");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("access_token=minimal-token&token_type=bearer");
		})
		.await;
	let exchange = build_exchange(&server);
	let token = exchange
		.obtain(&ClientCredentialsGrant::new())
		.await
		.expect("Client credentials exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(token.access_token.expose(), "minimal-token");
	assert_eq!(token.token_type.as_str(), "Bearer");
	assert!(token.expires_in.is_none());
}
