//! Token-endpoint exchange orchestration.
//!
//! [`TokenExchange`] performs one access-token obtain end to end, per RFC 6749 §3.2: convert
//! a grant's body parameters into a POST against the configured token endpoint, apply the
//! configured client authentication method, send the request through the injected transport,
//! and decode the response into either a [`TokenResponse`] or a [`TokenError`]. The exchange
//! holds only immutable collaborators, so one value can serve any number of concurrent
//! callers without locking.
//!
//! The sequencing contract is a single linear pass with exactly two terminal outcomes:
//! build → send → (200 ? decode success : decode error). There is no retry state and no
//! partial success; [`TokenExchange::obtain`] drives the whole contract for callers that do
//! not need to interleave their own logic between the steps.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http::{
	Method, Request, StatusCode,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ExpiresIn, RefreshToken, Scope, TokenResponse, TokenType},
	config::{ClientAuthMethod, ClientType, Config},
	decoder::ResponseDecoder,
	error::{ConfigError, ResponseError, TokenError},
	grant::{BodyParameters, Grant},
	obs::{self, ExchangeOutcome, ExchangeSpan},
	transport::{HttpRequest, HttpResponse, TokenTransport},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client authentication material produced for one request.
///
/// The closed method set dispatches through a single decision function which yields either
/// extra body pairs or an `Authorization` header value, never both.
enum ClientAuthentication {
	/// `client_id` (and the secret for confidential clients) join the body.
	BodyParams(Vec<(&'static str, String)>),
	/// `Authorization: Basic <credentials>`; the body stays untouched.
	AuthorizationHeader(String),
}

/// One-shot token-endpoint exchange bound to a [`Config`], a transport, and a response
/// decoder.
///
/// All three collaborators are injected at construction and held for the exchange's whole
/// lifetime; nothing is cached between calls.
pub struct TokenExchange<T>
where
	T: ?Sized + TokenTransport,
{
	config: Config,
	transport: Arc<T>,
	decoder: Arc<dyn ResponseDecoder>,
}
impl<T> TokenExchange<T>
where
	T: ?Sized + TokenTransport,
{
	/// Creates an exchange from its three collaborators.
	pub fn new(
		config: Config,
		transport: impl Into<Arc<T>>,
		decoder: Arc<dyn ResponseDecoder>,
	) -> Self {
		Self { config, transport: transport.into(), decoder }
	}

	/// Returns the configuration the exchange was built with.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Builds the token-endpoint POST for the given grant body parameters.
	///
	/// The caller's mapping is copied before client authentication augments it, so the
	/// original stays untouched. Fails with
	/// [`ConfigError::UnsupportedClientAuthMethod`] before any network call when the
	/// configured method has no implementation here.
	pub fn build_token_request(&self, params: &BodyParameters) -> Result<HttpRequest> {
		let mut params = params.clone();
		let mut builder = Request::builder()
			.method(Method::POST)
			.uri(self.config.token_endpoint.as_str())
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.header(ACCEPT, self.decoder.mime_type());

		match self.client_authentication()? {
			ClientAuthentication::BodyParams(pairs) =>
				for (name, value) in pairs {
					params.insert(name, value);
				},
			ClientAuthentication::AuthorizationHeader(credentials) =>
				builder = builder.header(AUTHORIZATION, credentials),
		}

		let body = encode_body(&params);

		Ok(builder.body(body.into_bytes()).map_err(ConfigError::from)?)
	}

	/// Sends one built request through the transport.
	///
	/// Pure delegation: no retries, no timeouts, no error reclassification. Transport
	/// failures propagate to the caller unchanged.
	pub async fn send_token_request(&self, request: HttpRequest) -> Result<HttpResponse> {
		Ok(self.transport.send_request(request).await?)
	}

	/// True iff the response carries a token payload.
	///
	/// Strict RFC token-endpoint semantics: only 200 signals a token payload; other 2xx
	/// codes do not.
	pub fn is_successful_response(&self, response: &HttpResponse) -> bool {
		response.status() == StatusCode::OK
	}

	/// Decodes and validates a 200 response into a [`TokenResponse`].
	///
	/// `access_token` and `token_type` are required and fail with
	/// [`ResponseError::MissingParameter`] naming the absent key; the remaining parameters
	/// are populated only when present.
	pub fn parse_token_response(&self, response: &HttpResponse) -> Result<TokenResponse> {
		let body = self.decoder.decode(response)?;
		let access_token = AccessToken::new(body.require_str("access_token")?)?;
		let token_type = TokenType::new(body.require_str("token_type")?);
		let expires_in = body.optional_u64("expires_in")?.map(ExpiresIn::from);
		let refresh_token =
			body.optional_str("refresh_token")?.map(RefreshToken::new).transpose()?;
		let scope = body
			.optional_str("scope")?
			.map(|raw| {
				Scope::from_parameter(raw).map_err(|_| ResponseError::InvalidParameter {
					name: "scope",
					value: raw.to_owned(),
				})
			})
			.transpose()?;

		Ok(TokenResponse { access_token, token_type, expires_in, refresh_token, scope })
	}

	/// Decodes and validates a non-200 response into the server-reported [`TokenError`].
	///
	/// A non-200 body without the `error` parameter violates RFC 6749 §5.2 on the server's
	/// part and surfaces as [`ResponseError::MissingParameter`] instead of being dropped.
	pub fn parse_error_response(&self, response: &HttpResponse) -> Result<TokenError> {
		let body = self.decoder.decode(response)?;
		let mut token_error = TokenError::new(body.require_str("error")?);

		if let Some(description) = body.optional_str("error_description")? {
			token_error = token_error.with_description(description);
		}
		if let Some(uri) = body.optional_str("error_uri")? {
			token_error = token_error.with_uri(uri);
		}

		Ok(token_error)
	}

	/// Performs one full exchange for `grant`.
	///
	/// Server-reported failures come back as
	/// [`Error::Token`](crate::error::Error::Token); every other error kind keeps its
	/// structural meaning (configuration, transport, validation).
	pub async fn obtain(&self, grant: &dyn Grant) -> Result<TokenResponse> {
		let kind = grant.grant_type();
		let span = ExchangeSpan::new(kind, "obtain");

		obs::record_exchange_outcome(kind, ExchangeOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = self.build_token_request(&grant.body_parameters())?;
				let response = self.send_token_request(request).await?;

				if self.is_successful_response(&response) {
					self.parse_token_response(&response)
				} else {
					Err(self.parse_error_response(&response)?.into())
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_exchange_outcome(kind, ExchangeOutcome::Success),
			Err(_) => obs::record_exchange_outcome(kind, ExchangeOutcome::Failure),
		}

		result
	}

	fn client_authentication(&self) -> Result<ClientAuthentication> {
		match self.config.auth_method {
			ClientAuthMethod::RequestBody => {
				let mut pairs = vec![("client_id", self.config.client_id.clone())];

				if self.config.client_type == ClientType::Confidential {
					pairs.push(("client_secret", self.config.secret_str().to_owned()));
				}

				Ok(ClientAuthentication::BodyParams(pairs))
			},
			ClientAuthMethod::HttpBasic =>
				Ok(ClientAuthentication::AuthorizationHeader(self.basic_credentials())),
			#[allow(unreachable_patterns)]
			method => Err(ConfigError::UnsupportedClientAuthMethod { method: method.to_string() }
				.into()),
		}
	}

	fn basic_credentials(&self) -> String {
		let credentials =
			format!("{}:{}", self.config.client_id, self.config.secret_str());

		format!("Basic {}", STANDARD.encode(credentials))
	}
}

fn encode_body(params: &BodyParameters) -> String {
	let mut serializer = form_urlencoded::Serializer::new(String::new());

	for (name, value) in params.iter() {
		serializer.append_pair(name, value);
	}

	serializer.finish()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		decoder::{FormDecoder, JsonDecoder},
		grant::{AuthorizationCodeGrant, AuthorizationCodeTokenRequest},
		transport::TransportFuture,
	};

	struct StaticTransport {
		status: StatusCode,
		body: &'static str,
	}
	impl StaticTransport {
		fn new(status: StatusCode, body: &'static str) -> Self {
			Self { status, body }
		}
	}
	impl TokenTransport for StaticTransport {
		fn send_request(&self, _request: HttpRequest) -> TransportFuture<'_> {
			let status = self.status;
			let body = self.body;

			Box::pin(async move {
				let mut response = HttpResponse::new(body.as_bytes().to_vec());

				*response.status_mut() = status;

				Ok(response)
			})
		}
	}

	fn config(auth_method: ClientAuthMethod, client_type: ClientType) -> Config {
		let endpoint =
			Url::parse("https://auth.example.com/token").expect("Failed to parse endpoint URL.");
		let mut builder = Config::builder("s6BhdRkqt3")
			.auth_method(auth_method)
			.client_type(client_type)
			.token_endpoint(endpoint);

		if client_type == ClientType::Confidential {
			builder = builder.client_secret("7Fjfp0ZBr1KtDRbnfVdmIw");
		}

		builder.build().expect("Failed to build test config.")
	}

	fn json_exchange(
		auth_method: ClientAuthMethod,
		client_type: ClientType,
		transport: StaticTransport,
	) -> TokenExchange<StaticTransport> {
		TokenExchange::new(config(auth_method, client_type), transport, Arc::new(JsonDecoder))
	}

	fn idle_exchange(
		auth_method: ClientAuthMethod,
		client_type: ClientType,
	) -> TokenExchange<StaticTransport> {
		json_exchange(auth_method, client_type, StaticTransport::new(StatusCode::OK, "{}"))
	}

	fn grant_params() -> BodyParameters {
		AuthorizationCodeGrant::new(
			AuthorizationCodeTokenRequest::new("SplxlOBeZQQYbYS6WxSbIA")
				.expect("Authorization code should be accepted."),
		)
		.body_parameters()
	}

	fn decode_form_body(request: &HttpRequest) -> BodyParameters {
		form_urlencoded::parse(request.body())
			.map(|(name, value)| (name.into_owned(), value.into_owned()))
			.collect()
	}

	#[test]
	fn request_body_auth_includes_confidential_secret() {
		let exchange = idle_exchange(ClientAuthMethod::RequestBody, ClientType::Confidential);
		let request = exchange
			.build_token_request(&grant_params())
			.expect("Request should build successfully.");
		let body = decode_form_body(&request);

		assert_eq!(body.get("client_id"), Some("s6BhdRkqt3"));
		assert_eq!(body.get("client_secret"), Some("7Fjfp0ZBr1KtDRbnfVdmIw"));
		assert!(request.headers().get(AUTHORIZATION).is_none());
	}

	#[test]
	fn request_body_auth_never_leaks_public_secret() {
		let exchange = idle_exchange(ClientAuthMethod::RequestBody, ClientType::Public);
		let request = exchange
			.build_token_request(&grant_params())
			.expect("Request should build successfully.");
		let body = decode_form_body(&request);

		assert_eq!(body.get("client_id"), Some("s6BhdRkqt3"));
		assert!(!body.contains("client_secret"));
	}

	#[test]
	fn http_basic_auth_sets_header_only() {
		let exchange = idle_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential);
		let request = exchange
			.build_token_request(&grant_params())
			.expect("Request should build successfully.");
		let body = decode_form_body(&request);
		let expected = format!("Basic {}", STANDARD.encode("s6BhdRkqt3:7Fjfp0ZBr1KtDRbnfVdmIw"));
		let authorization = request
			.headers()
			.get(AUTHORIZATION)
			.expect("Authorization header should be present.")
			.to_str()
			.expect("Authorization header should be ASCII.");

		assert_eq!(authorization, expected);
		assert!(!body.contains("client_id"));
		assert!(!body.contains("client_secret"));
	}

	#[test]
	fn request_carries_post_and_negotiation_headers() {
		let exchange = idle_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential);
		let request = exchange
			.build_token_request(&grant_params())
			.expect("Request should build successfully.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri(), exchange.config().token_endpoint.as_str());
		assert_eq!(
			request.headers().get(CONTENT_TYPE).expect("Content-Type should be present."),
			FORM_CONTENT_TYPE
		);
		assert_eq!(
			request.headers().get(ACCEPT).expect("Accept should be present."),
			"application/json"
		);
	}

	#[test]
	fn caller_parameters_stay_untouched() {
		let exchange = idle_exchange(ClientAuthMethod::RequestBody, ClientType::Confidential);
		let params = grant_params();
		let _ = exchange
			.build_token_request(&params)
			.expect("Request should build successfully.");

		assert!(!params.contains("client_id"));
		assert!(!params.contains("client_secret"));
		assert_eq!(params, grant_params());
	}

	#[test]
	fn body_round_trips_through_url_decoding() {
		let exchange = idle_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential);
		let params = BodyParameters::new()
			.with("grant_type", "authorization_code")
			.with("code", "Splx lOBe+ZQQ&YbYS=6WxSbIA")
			.with("redirect_uri", "https://app.example.com/callback?tab=1");
		let request = exchange
			.build_token_request(&params)
			.expect("Request should build successfully.");

		// HTTP Basic leaves the body untouched, so decoding yields the original mapping.
		assert_eq!(decode_form_body(&request), params);
	}

	#[test]
	fn only_status_200_is_successful() {
		let exchange = idle_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential);

		for (status, expected) in
			[(200, true), (201, false), (400, false), (401, false), (500, false)]
		{
			let mut response = HttpResponse::new(Vec::new());

			*response.status_mut() =
				StatusCode::from_u16(status).expect("Status code should be valid.");

			assert_eq!(
				exchange.is_successful_response(&response),
				expected,
				"Status code: {status}."
			);
		}
	}

	#[test]
	fn success_response_parses_required_and_optional_fields() {
		let exchange = idle_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential);
		let mut response = HttpResponse::new(
			br#"{"access_token":"abc","token_type":"BEARER","expires_in":"3600"}"#.to_vec(),
		);

		*response.status_mut() = StatusCode::OK;

		let token = exchange
			.parse_token_response(&response)
			.expect("Success body should parse.");

		assert_eq!(token.access_token.expose(), "abc");
		assert_eq!(token.token_type.as_str(), "Bearer");
		assert_eq!(token.expires_in.map(ExpiresIn::seconds), Some(3600));
		assert!(token.refresh_token.is_none());
		assert!(token.scope.is_none());
	}

	#[test]
	fn success_response_parses_scope_in_order() {
		let exchange = idle_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential);
		let response = HttpResponse::new(
			br#"{"access_token":"abc","token_type":"bearer","refresh_token":"xyz","scope":"write read"}"#
				.to_vec(),
		);
		let token = exchange
			.parse_token_response(&response)
			.expect("Success body should parse.");
		let scope = token.scope.expect("Scope should be populated.");

		assert_eq!(scope.iter().collect::<Vec<_>>(), vec!["write", "read"]);
		assert_eq!(
			token.refresh_token.expect("Refresh token should be populated.").expose(),
			"xyz"
		);
	}

	#[test]
	fn success_response_requires_token_type() {
		let exchange = idle_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential);
		let response = HttpResponse::new(br#"{"access_token":"abc"}"#.to_vec());
		let err = exchange
			.parse_token_response(&response)
			.expect_err("Missing token_type must be rejected.");

		assert!(matches!(
			err,
			Error::Response(ResponseError::MissingParameter { name: "token_type" })
		));
	}

	#[test]
	fn error_response_parses_optional_description() {
		let exchange = idle_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential);
		let response = HttpResponse::new(
			br#"{"error":"invalid_grant","error_description":"bad code"}"#.to_vec(),
		);
		let token_error = exchange
			.parse_error_response(&response)
			.expect("Error body should parse.");

		assert_eq!(token_error.error, "invalid_grant");
		assert_eq!(token_error.error_description.as_deref(), Some("bad code"));
		assert!(token_error.error_uri.is_none());
	}

	#[test]
	fn error_response_requires_error_parameter() {
		let exchange = idle_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential);
		let response = HttpResponse::new(br#"{"hint":"nothing useful"}"#.to_vec());
		let err = exchange
			.parse_error_response(&response)
			.expect_err("Missing error parameter must be rejected.");

		assert!(matches!(
			err,
			Error::Response(ResponseError::MissingParameter { name: "error" })
		));
	}

	#[tokio::test]
	async fn obtain_returns_token_on_200() {
		let transport = StaticTransport::new(
			StatusCode::OK,
			r#"{"access_token":"2YotnFZFEjr1zCsicMWpAA","token_type":"bearer","expires_in":3600}"#,
		);
		let exchange =
			json_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential, transport);
		let grant = AuthorizationCodeGrant::new(
			AuthorizationCodeTokenRequest::new("SplxlOBeZQQYbYS6WxSbIA")
				.expect("Authorization code should be accepted."),
		);
		let token = exchange.obtain(&grant).await.expect("Exchange should succeed.");

		assert_eq!(token.access_token.expose(), "2YotnFZFEjr1zCsicMWpAA");
		assert_eq!(token.token_type.as_str(), "Bearer");
		assert_eq!(token.expires_in.map(ExpiresIn::seconds), Some(3600));
	}

	#[tokio::test]
	async fn obtain_surfaces_token_error_on_400() {
		let transport = StaticTransport::new(
			StatusCode::BAD_REQUEST,
			r#"{"error":"invalid_grant","error_description":"bad code"}"#,
		);
		let exchange =
			json_exchange(ClientAuthMethod::HttpBasic, ClientType::Confidential, transport);
		let grant = AuthorizationCodeGrant::new(
			AuthorizationCodeTokenRequest::new("expired-code")
				.expect("Authorization code should be accepted."),
		);
		let err = exchange.obtain(&grant).await.expect_err("Exchange should fail.");
		let token_error = err.as_token_error().expect("Failure should be a token error.");

		assert_eq!(token_error.error, "invalid_grant");
		assert_eq!(token_error.error_description.as_deref(), Some("bad code"));
	}

	#[tokio::test]
	async fn obtain_with_form_decoder_parses_form_bodies() {
		let transport = StaticTransport::new(
			StatusCode::OK,
			"access_token=abc&token_type=BEARER&expires_in=3600",
		);
		let exchange = TokenExchange::new(
			config(ClientAuthMethod::RequestBody, ClientType::Confidential),
			transport,
			Arc::new(FormDecoder),
		);
		let grant = AuthorizationCodeGrant::new(
			AuthorizationCodeTokenRequest::new("SplxlOBeZQQYbYS6WxSbIA")
				.expect("Authorization code should be accepted."),
		);
		let token = exchange.obtain(&grant).await.expect("Exchange should succeed.");

		assert_eq!(token.access_token.expose(), "abc");
		assert_eq!(token.token_type.as_str(), "Bearer");
		assert_eq!(token.expires_in.map(ExpiresIn::seconds), Some(3600));
	}
}
