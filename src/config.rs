//! Immutable client configuration consumed by the exchange.

// self
use crate::{_prelude::*, error::ConfigError};

/// Whether the client can hold a secret securely (RFC 6749 §2.1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
	/// Client that cannot protect a secret (native app, browser app).
	Public,
	/// Client that can protect a secret (server-side service).
	Confidential,
}

/// How the client proves its identity to the token endpoint.
///
/// The set is closed but non-exhaustive; dispatch sites keep a fail-fast default arm so a
/// method added in a future release is rejected as a configuration error rather than sent
/// half-built onto the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ClientAuthMethod {
	/// `client_id` (and the secret for confidential clients) embedded as body parameters.
	RequestBody,
	#[default]
	/// HTTP Basic with `client_id`/`client_secret` credentials.
	HttpBasic,
}
impl ClientAuthMethod {
	/// Returns the stable wire label for this method.
	pub const fn as_str(self) -> &'static str {
		match self {
			ClientAuthMethod::RequestBody => "request_body",
			ClientAuthMethod::HttpBasic => "http_basic",
		}
	}
}
impl Display for ClientAuthMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ClientAuthMethod {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"request_body" => Ok(Self::RequestBody),
			"http_basic" => Ok(Self::HttpBasic),
			_ => Err(ConfigError::UnsupportedClientAuthMethod { method: s.to_owned() }),
		}
	}
}

/// Redacted client secret wrapper keeping credential material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecret(String);
impl ClientSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ClientSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ClientSecret").field(&"<redacted>").finish()
	}
}
impl Display for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Immutable client configuration for one token endpoint.
///
/// Built through [`Config::builder`], which validates the combination of client type and
/// secret: confidential clients must carry a non-empty secret, public clients must not
/// carry one at all.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
	/// Registered client identifier.
	pub client_id: String,
	/// Client secret; always `None` for public clients.
	pub client_secret: Option<ClientSecret>,
	/// Whether the client can hold its secret securely.
	pub client_type: ClientType,
	/// Client authentication mechanism used on token endpoint calls.
	pub auth_method: ClientAuthMethod,
	/// Token endpoint URI.
	pub token_endpoint: Url,
}
impl Config {
	/// Creates a new builder for the provided client identifier.
	///
	/// Defaults: confidential client, HTTP Basic authentication.
	pub fn builder(client_id: impl Into<String>) -> ConfigBuilder {
		ConfigBuilder {
			client_id: client_id.into(),
			client_secret: None,
			client_type: ClientType::Confidential,
			auth_method: ClientAuthMethod::default(),
			token_endpoint: None,
		}
	}

	/// Secret as credential material; empty for public clients.
	pub(crate) fn secret_str(&self) -> &str {
		self.client_secret.as_ref().map(ClientSecret::expose).unwrap_or("")
	}
}

/// Builder assembling a validated [`Config`].
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
	client_id: String,
	client_secret: Option<String>,
	client_type: ClientType,
	auth_method: ClientAuthMethod,
	token_endpoint: Option<Url>,
}
impl ConfigBuilder {
	/// Sets the client secret.
	pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets the client type.
	pub fn client_type(mut self, client_type: ClientType) -> Self {
		self.client_type = client_type;

		self
	}

	/// Sets the client authentication method.
	pub fn auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.auth_method = method;

		self
	}

	/// Sets the token endpoint URI.
	pub fn token_endpoint(mut self, endpoint: Url) -> Self {
		self.token_endpoint = Some(endpoint);

		self
	}

	/// Parses and sets the token endpoint URI from a string.
	pub fn token_endpoint_str(mut self, endpoint: &str) -> Result<Self, ConfigError> {
		self.token_endpoint =
			Some(Url::parse(endpoint).map_err(|source| ConfigError::InvalidTokenEndpoint { source })?);

		Ok(self)
	}

	/// Validates the accumulated fields and produces the immutable [`Config`].
	pub fn build(self) -> Result<Config, ConfigError> {
		let token_endpoint = self.token_endpoint.ok_or(ConfigError::MissingTokenEndpoint)?;
		let client_secret = match (self.client_type, self.client_secret) {
			(ClientType::Confidential, Some(secret)) if !secret.is_empty() =>
				Some(ClientSecret::new(secret)),
			(ClientType::Confidential, _) => return Err(ConfigError::MissingClientSecret),
			(ClientType::Public, None) => None,
			(ClientType::Public, Some(_)) => return Err(ConfigError::UnexpectedClientSecret),
		};

		Ok(Config {
			client_id: self.client_id,
			client_secret,
			client_type: self.client_type,
			auth_method: self.auth_method,
			token_endpoint,
		})
	}
}
