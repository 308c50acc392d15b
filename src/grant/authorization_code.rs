//! Authorization Code grant (RFC 6749 §4.1), token-endpoint side.

// self
use crate::{
	_prelude::*,
	auth::Scope,
	grant::{BodyParameters, Grant, GrantType, GrantValidationError},
};

/// Typed token request payload for the Authorization Code grant (RFC 6749 §4.1.3).
///
/// The grant only accepts this type, so a request built for a different grant cannot be
/// attached by mistake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationCodeTokenRequest {
	code: String,
	redirect_uri: Option<Url>,
}
impl AuthorizationCodeTokenRequest {
	/// Creates a request for the provided authorization code.
	pub fn new(code: impl Into<String>) -> Result<Self, GrantValidationError> {
		let code = code.into();

		if code.is_empty() {
			return Err(GrantValidationError::EmptyAuthorizationCode);
		}

		Ok(Self { code, redirect_uri: None })
	}

	/// Attaches the redirect URI; required when the authorization request carried one.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Returns the authorization code.
	pub fn code(&self) -> &str {
		&self.code
	}

	/// Returns the redirect URI, when set.
	pub fn redirect_uri(&self) -> Option<&Url> {
		self.redirect_uri.as_ref()
	}
}

/// Data-only description of the authorization request half of the flow (RFC 6749 §4.1.1).
///
/// Building the browser-facing authorization URL and handling the redirect are outside this
/// crate; the description travels with the grant so callers can keep the two halves of the
/// flow together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// Redirect URI the authorization response should return to.
	pub redirect_uri: Option<Url>,
	/// Requested scope.
	pub scope: Option<Scope>,
	/// Opaque state value echoed back by the authorization server.
	pub state: Option<String>,
}

/// Authorization Code grant carrying its typed token request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationCodeGrant {
	token_request: AuthorizationCodeTokenRequest,
	authorization_request: Option<AuthorizationRequest>,
}
impl AuthorizationCodeGrant {
	/// Creates a grant from the typed token request.
	pub fn new(token_request: AuthorizationCodeTokenRequest) -> Self {
		Self { token_request, authorization_request: None }
	}

	/// Attaches the authorization request description.
	pub fn with_authorization_request(mut self, request: AuthorizationRequest) -> Self {
		self.authorization_request = Some(request);

		self
	}

	/// Returns the token request.
	pub fn token_request(&self) -> &AuthorizationCodeTokenRequest {
		&self.token_request
	}

	/// Returns the authorization request description, when attached.
	pub fn authorization_request(&self) -> Option<&AuthorizationRequest> {
		self.authorization_request.as_ref()
	}
}
impl Grant for AuthorizationCodeGrant {
	fn grant_type(&self) -> GrantType {
		GrantType::AuthorizationCode
	}

	fn body_parameters(&self) -> BodyParameters {
		let mut params = BodyParameters::new()
			.with("grant_type", GrantType::AuthorizationCode.as_str())
			.with("code", self.token_request.code());

		if let Some(redirect_uri) = self.token_request.redirect_uri() {
			params.insert("redirect_uri", redirect_uri.as_str());
		}

		params
	}
}
