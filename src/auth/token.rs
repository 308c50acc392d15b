//! Typed parameters of the successful token endpoint response.

// self
use crate::{_prelude::*, auth::Scope, error::ResponseError};

/// Access token credential issued by the authorization server (RFC 6749 §1.4).
///
/// The wrapper redacts the credential from `Debug`/`Display` output; callers reach the raw
/// string through [`expose`](Self::expose) only.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a new access token, rejecting empty values.
	pub fn new(value: impl Into<String>) -> Result<Self, ResponseError> {
		let owned = value.into();

		if owned.is_empty() {
			return Err(ResponseError::EmptyParameter { name: "access_token" });
		}

		Ok(Self(owned))
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Refresh token credential usable for follow-up exchanges (RFC 6749 §1.5).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken(String);
impl RefreshToken {
	/// Wraps a new refresh token, rejecting empty values.
	pub fn new(value: impl Into<String>) -> Result<Self, ResponseError> {
		let owned = value.into();

		if owned.is_empty() {
			return Err(ResponseError::EmptyParameter { name: "refresh_token" });
		}

		Ok(Self(owned))
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for RefreshToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for RefreshToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("RefreshToken").field(&"<redacted>").finish()
	}
}
impl Display for RefreshToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Case-normalized token type label (RFC 6749 §7.1).
///
/// Normalization is the literal lowercase-then-capitalize-first transform: "bearer" and
/// "BEARER" both become "Bearer", "MAC" becomes "Mac". Downstream comparisons may depend on
/// this exact convention, so nothing smarter is attempted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenType(String);
impl TokenType {
	/// Normalizes and wraps a raw token type label.
	pub fn new(raw: impl AsRef<str>) -> Self {
		let lowered = raw.as_ref().to_lowercase();
		let mut chars = lowered.chars();
		let normalized = match chars.next() {
			Some(first) => first.to_uppercase().chain(chars).collect(),
			None => lowered,
		};

		Self(normalized)
	}

	/// Returns the normalized label.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenType {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl Display for TokenType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Token lifetime in seconds, relative to the moment the response was generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpiresIn(u64);
impl ExpiresIn {
	/// Returns the lifetime in whole seconds.
	pub const fn seconds(self) -> u64 {
		self.0
	}
}
impl From<u64> for ExpiresIn {
	fn from(seconds: u64) -> Self {
		Self(seconds)
	}
}
impl Display for ExpiresIn {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}", self.0)
	}
}

/// Successful token endpoint response (RFC 6749 §5.1).
///
/// Only `access_token` and `token_type` are guaranteed; the remaining parameters are
/// populated when the server sent them and stay `None` otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Credential issued by the authorization server.
	pub access_token: AccessToken,
	/// Case-normalized token type label.
	pub token_type: TokenType,
	/// Remaining token lifetime, when advertised.
	pub expires_in: Option<ExpiresIn>,
	/// Refresh credential for follow-up exchanges, when issued.
	pub refresh_token: Option<RefreshToken>,
	/// Granted scope, when it differs from the requested one.
	pub scope: Option<Scope>,
}
