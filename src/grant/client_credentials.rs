//! Client Credentials grant (RFC 6749 §4.4).

// self
use crate::{
	auth::Scope,
	grant::{BodyParameters, Grant, GrantType},
};

/// Client Credentials grant for service-to-service principals.
///
/// The client's own credentials are the grant, so the body carries nothing beyond
/// `grant_type` and an optional scope; authentication material is applied by the exchange
/// according to the configured method.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientCredentialsGrant {
	scope: Option<Scope>,
}
impl ClientCredentialsGrant {
	/// Creates a grant without scope restrictions.
	pub fn new() -> Self {
		Self::default()
	}

	/// Restricts the requested scope.
	pub fn with_scope(mut self, scope: Scope) -> Self {
		self.scope = Some(scope);

		self
	}
}
impl Grant for ClientCredentialsGrant {
	fn grant_type(&self) -> GrantType {
		GrantType::ClientCredentials
	}

	fn body_parameters(&self) -> BodyParameters {
		let mut params =
			BodyParameters::new().with("grant_type", GrantType::ClientCredentials.as_str());

		if let Some(scope) = self.scope.as_ref().filter(|scope| !scope.is_empty()) {
			params.insert("scope", scope.to_parameter());
		}

		params
	}
}
