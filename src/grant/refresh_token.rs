//! Refresh Token grant (RFC 6749 §6).

// self
use crate::{
	auth::Scope,
	grant::{BodyParameters, Grant, GrantType, GrantValidationError},
};

/// Refresh Token grant exchanging a refresh credential for a fresh access token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshTokenGrant {
	refresh_token: String,
	scope: Option<Scope>,
}
impl RefreshTokenGrant {
	/// Creates a grant for the provided refresh token.
	pub fn new(refresh_token: impl Into<String>) -> Result<Self, GrantValidationError> {
		let refresh_token = refresh_token.into();

		if refresh_token.is_empty() {
			return Err(GrantValidationError::EmptyRefreshToken);
		}

		Ok(Self { refresh_token, scope: None })
	}

	/// Narrows the requested scope; must not exceed the originally granted one.
	pub fn with_scope(mut self, scope: Scope) -> Self {
		self.scope = Some(scope);

		self
	}
}
impl Grant for RefreshTokenGrant {
	fn grant_type(&self) -> GrantType {
		GrantType::RefreshToken
	}

	fn body_parameters(&self) -> BodyParameters {
		let mut params = BodyParameters::new()
			.with("grant_type", GrantType::RefreshToken.as_str())
			.with("refresh_token", self.refresh_token.as_str());

		if let Some(scope) = self.scope.as_ref().filter(|scope| !scope.is_empty()) {
			params.insert("scope", scope.to_parameter());
		}

		params
	}
}
