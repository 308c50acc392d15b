//! Scope modeling for token requests and responses.

// std
use std::slice::Iter;
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain embedded whitespace characters.
	#[error("Scope contains whitespace: {scope}.")]
	ContainsWhitespace {
		/// The offending scope string.
		scope: String,
	},
}

/// Ordered list of OAuth scope tokens.
///
/// The wire form is the space-delimited string of RFC 6749 §3.3. Parsing keeps the order the
/// peer sent and drops repeated tokens on their first occurrence; downstream comparisons may
/// rely on the server's ordering, so the list is never sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scope {
	tokens: Vec<String>,
}
impl Scope {
	/// Creates a scope list from any iterator, preserving first-occurrence order.
	pub fn new<I, S>(tokens: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut deduped = Vec::new();

		for token in tokens {
			let owned: String = token.into();

			if owned.is_empty() {
				return Err(ScopeValidationError::Empty);
			}
			if owned.chars().any(char::is_whitespace) {
				return Err(ScopeValidationError::ContainsWhitespace { scope: owned });
			}
			if !deduped.contains(&owned) {
				deduped.push(owned);
			}
		}

		Ok(Self { tokens: deduped })
	}

	/// Parses the space-delimited wire form.
	pub fn from_parameter(raw: &str) -> Result<Self, ScopeValidationError> {
		if raw.is_empty() {
			return Ok(Self::default());
		}
		if raw.chars().all(char::is_whitespace) {
			return Err(ScopeValidationError::Empty);
		}

		Self::new(raw.split_whitespace())
	}

	/// Number of distinct scope tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Returns true if the list contains the provided scope.
	pub fn contains(&self, scope: &str) -> bool {
		self.tokens.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scope tokens in wire order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(|s| s.as_str())
	}

	/// Returns the space-delimited wire representation.
	pub fn to_parameter(&self) -> String {
		self.tokens.join(" ")
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.tokens
	}
}
impl Display for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.to_parameter())
	}
}
impl FromStr for Scope {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_parameter(s)
	}
}

/// Iterator over scope strings.
pub struct ScopeIter<'a> {
	inner: Iter<'a, String>,
}
impl<'a> Iterator for ScopeIter<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|s| s.as_str())
	}
}
impl<'a> IntoIterator for &'a Scope {
	type IntoIter = ScopeIter<'a>;
	type Item = &'a str;

	fn into_iter(self) -> Self::IntoIter {
		ScopeIter { inner: self.tokens.iter() }
	}
}
impl TryFrom<Vec<String>> for Scope {
	type Error = ScopeValidationError;

	fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Serialize for Scope {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.tokens.len()))?;

		for token in &self.tokens {
			seq.serialize_element(token)?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for Scope {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		Scope::new(values).map_err(DeError::custom)
	}
}
