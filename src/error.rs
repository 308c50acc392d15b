//! Exchange-level error types shared across configuration, transport, and decoding.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical exchange error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Structurally invalid token endpoint response.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// OAuth error reported by the token endpoint.
	#[error(transparent)]
	Token(#[from] TokenError),
}
impl Error {
	/// Returns the server-reported token error when this is one.
	pub fn as_token_error(&self) -> Option<&TokenError> {
		match self {
			Self::Token(inner) => Some(inner),
			_ => None,
		}
	}
}

/// Configuration and request-assembly failures detected before any network call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Token endpoint was not provided to the builder.
	#[error("Token endpoint is required.")]
	MissingTokenEndpoint,
	/// Token endpoint URI cannot be parsed.
	#[error("Token endpoint URI is invalid.")]
	InvalidTokenEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Confidential clients must carry a secret.
	#[error("Confidential clients require a non-empty client secret.")]
	MissingClientSecret,
	/// Public clients must not carry a secret.
	#[error("Public clients cannot carry a client secret.")]
	UnexpectedClientSecret,
	/// Configured client authentication method has no implementation.
	#[error("Client authentication method `{method}` is not supported.")]
	UnsupportedClientAuthMethod {
		/// The unrecognized method label.
		method: String,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
}

/// Transport-level failures (DNS, TCP, TLS).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Structural validation failures for decoded token endpoint bodies.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Required parameter missing from the decoded body.
	#[error("Token endpoint response is missing the `{name}` parameter.")]
	MissingParameter {
		/// Wire name of the absent parameter.
		name: &'static str,
	},
	/// Parameter present but empty.
	#[error("Token endpoint response carries an empty `{name}` parameter.")]
	EmptyParameter {
		/// Wire name of the empty parameter.
		name: &'static str,
	},
	/// Parameter present but not representable as required.
	#[error("Token endpoint response carries an invalid `{name}` parameter: `{value}`.")]
	InvalidParameter {
		/// Wire name of the offending parameter.
		name: &'static str,
		/// Rendering of the rejected value.
		value: String,
	},
	/// Response body is not valid UTF-8.
	#[error("Token endpoint response body is not valid UTF-8.")]
	BodyNotUtf8 {
		/// Underlying decoding failure.
		#[source]
		source: std::str::Utf8Error,
	},
	/// Response body is not the JSON the decoder expected.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedJson {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// JSON body decoded to something other than an object.
	#[error("Token endpoint returned a JSON body that is not an object.")]
	JsonNotAnObject,
}

/// OAuth error response reported by the token endpoint (RFC 6749 §5.2).
///
/// This is the modeled alternate outcome of an exchange, not a defect: callers branch on
/// [`TokenExchange::is_successful_response`](crate::exchange::TokenExchange::is_successful_response)
/// first and treat this as the server saying no (`invalid_grant`, `invalid_client`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("Token endpoint reported an OAuth error: {error}.")]
pub struct TokenError {
	/// Error code registered by RFC 6749 §5.2, or a provider extension.
	pub error: String,
	/// Human-readable explanation, when the server supplied one.
	pub error_description: Option<String>,
	/// URI identifying a page with further details, when supplied.
	pub error_uri: Option<String>,
}
impl TokenError {
	/// Creates a token error carrying only the error code.
	pub fn new(error: impl Into<String>) -> Self {
		Self { error: error.into(), error_description: None, error_uri: None }
	}

	/// Attaches the server-supplied description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.error_description = Some(description.into());

		self
	}

	/// Attaches the server-supplied detail URI.
	pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
		self.error_uri = Some(uri.into());

		self
	}
}
