//! Response body decoders translating wire payloads into parameter maps.
//!
//! The decoder boundary owns the wire format of token endpoint responses: it turns raw body
//! bytes into a generic [`DecodedBody`] parameter map and advertises the MIME type the
//! request's `Accept` header should announce. The exchange stays format-agnostic; swapping
//! [`JsonDecoder`] for [`FormDecoder`] is a constructor argument, not a code change.

// std
use std::str;
// crates.io
use serde_json::{Deserializer as JsonDeserializer, Value};
use url::form_urlencoded;
// self
use crate::{_prelude::*, error::ResponseError, transport::HttpResponse};

/// Generic decoded token endpoint body.
///
/// Success and error payloads decode into the same string-keyed shape. Accessors normalize
/// the value forms the two wire formats produce: form decoding always yields strings, JSON
/// yields typed values, so numeric parameters accept both `3600` and `"3600"`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedBody(BTreeMap<String, Value>);
impl DecodedBody {
	/// Stores a decoded parameter, overwriting any previous value under the same name.
	pub fn insert(&mut self, name: impl Into<String>, value: Value) {
		self.0.insert(name.into(), value);
	}

	/// Returns true if a value is stored under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Returns the required string parameter `name`.
	pub fn require_str(&self, name: &'static str) -> Result<&str, ResponseError> {
		self.optional_str(name)?.ok_or(ResponseError::MissingParameter { name })
	}

	/// Returns the optional string parameter `name`; absence is not an error.
	pub fn optional_str(&self, name: &'static str) -> Result<Option<&str>, ResponseError> {
		match self.0.get(name) {
			None => Ok(None),
			Some(Value::String(value)) => Ok(Some(value.as_str())),
			Some(other) =>
				Err(ResponseError::InvalidParameter { name, value: other.to_string() }),
		}
	}

	/// Returns the optional non-negative integer parameter `name`, accepting either a JSON
	/// number or a numeric string.
	pub fn optional_u64(&self, name: &'static str) -> Result<Option<u64>, ResponseError> {
		let invalid = |value: &Value| ResponseError::InvalidParameter { name, value: value.to_string() };

		match self.0.get(name) {
			None => Ok(None),
			Some(value @ Value::Number(number)) =>
				number.as_u64().map(Some).ok_or_else(|| invalid(value)),
			Some(value @ Value::String(raw)) =>
				raw.parse::<u64>().map(Some).map_err(|_| invalid(value)),
			Some(other) => Err(invalid(other)),
		}
	}
}
impl From<BTreeMap<String, Value>> for DecodedBody {
	fn from(map: BTreeMap<String, Value>) -> Self {
		Self(map)
	}
}

/// Boundary turning raw HTTP response bodies into decoded parameter maps.
pub trait ResponseDecoder
where
	Self: 'static + Send + Sync,
{
	/// MIME type the token endpoint is expected to respond with.
	fn mime_type(&self) -> &'static str;

	/// Decodes the response body into a parameter map.
	fn decode(&self, response: &HttpResponse) -> Result<DecodedBody, ResponseError>;
}

/// Decoder for `application/x-www-form-urlencoded` bodies.
#[derive(Clone, Copy, Debug, Default)]
pub struct FormDecoder;
impl ResponseDecoder for FormDecoder {
	fn mime_type(&self) -> &'static str {
		"application/x-www-form-urlencoded"
	}

	fn decode(&self, response: &HttpResponse) -> Result<DecodedBody, ResponseError> {
		let body = str::from_utf8(response.body())
			.map_err(|source| ResponseError::BodyNotUtf8 { source })?;
		let mut decoded = DecodedBody::default();

		for (name, value) in form_urlencoded::parse(body.as_bytes()) {
			decoded.insert(name.into_owned(), Value::String(value.into_owned()));
		}

		Ok(decoded)
	}
}

/// Decoder for `application/json` bodies (RFC 6749 §5.1).
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonDecoder;
impl ResponseDecoder for JsonDecoder {
	fn mime_type(&self) -> &'static str {
		"application/json"
	}

	fn decode(&self, response: &HttpResponse) -> Result<DecodedBody, ResponseError> {
		let mut deserializer = JsonDeserializer::from_slice(response.body());
		let value: Value = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ResponseError::MalformedJson { source })?;
		let Value::Object(object) = value else {
			return Err(ResponseError::JsonNotAnObject);
		};

		Ok(object.into_iter().collect::<BTreeMap<_, _>>().into())
	}
}
