//! Grant abstractions producing token request body parameters.

pub mod authorization_code;
pub mod client_credentials;
pub mod refresh_token;

pub use authorization_code::*;
pub use client_credentials::*;
pub use refresh_token::*;

// self
use crate::_prelude::*;

/// Grant kinds shipped with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant (RFC 6749 §4.1), token-endpoint side.
	AuthorizationCode,
	/// Refresh Token grant (RFC 6749 §6).
	RefreshToken,
	/// Client Credentials grant (RFC 6749 §4.4).
	ClientCredentials,
}
impl GrantType {
	/// Returns the `grant_type` wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
			GrantType::ClientCredentials => "client_credentials",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Structural validation failures raised while constructing grants.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum GrantValidationError {
	/// Authorization codes cannot be empty.
	#[error("Authorization code cannot be empty.")]
	EmptyAuthorizationCode,
	/// Refresh tokens cannot be empty.
	#[error("Refresh token cannot be empty.")]
	EmptyRefreshToken,
}

/// Body parameter mapping for one token request.
///
/// Keys are unique; inserting an existing key overwrites its value. Iteration order is
/// deterministic so the serialized body is reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BodyParameters(BTreeMap<String, String>);
impl BodyParameters {
	/// Creates an empty parameter mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a parameter, overwriting any existing value under the same name.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.insert(name.into(), value.into());
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);

		self
	}

	/// Returns the value stored under `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	/// Returns true if a value is stored under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Number of stored parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no parameters are stored.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over `(name, value)` pairs in deterministic order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
	}
}
impl<N, V> FromIterator<(N, V)> for BodyParameters
where
	N: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
		let mut params = Self::new();

		for (name, value) in iter {
			params.insert(name, value);
		}

		params
	}
}

/// Capability to produce the token request parameters for one grant.
///
/// Concrete grants validate their own structure at construction time; the exchange assumes
/// nothing about the produced mapping beyond the parameter interface and copies it before
/// augmenting with client authentication.
pub trait Grant
where
	Self: Send + Sync,
{
	/// Grant kind, used for observability labels.
	fn grant_type(&self) -> GrantType;

	/// Body parameters for the token request, including `grant_type`.
	fn body_parameters(&self) -> BodyParameters;
}
