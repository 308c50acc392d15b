//! Rust's RFC 6749 token-endpoint exchange client—typed grants, pluggable transports, and
//! swappable response decoders in one focused crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod decoder;
pub mod error;
pub mod exchange;
pub mod grant;
pub mod obs;
pub mod transport;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{ClientAuthMethod, ClientType, Config},
		decoder::ResponseDecoder,
		exchange::TokenExchange,
		transport::ReqwestTransport,
	};

	/// Exchange type alias used by reqwest-backed integration tests.
	pub type ReqwestTestExchange = TokenExchange<ReqwestTransport>;

	/// Constructs a [`TokenExchange`] backed by the default reqwest transport, inferring the
	/// client type from the presence of a secret.
	pub fn build_reqwest_test_exchange(
		token_endpoint: Url,
		auth_method: ClientAuthMethod,
		client_id: &str,
		client_secret: Option<&str>,
		decoder: Arc<dyn ResponseDecoder>,
	) -> ReqwestTestExchange {
		let mut builder =
			Config::builder(client_id).auth_method(auth_method).token_endpoint(token_endpoint);

		builder = if let Some(secret) = client_secret {
			builder.client_type(ClientType::Confidential).client_secret(secret)
		} else {
			builder.client_type(ClientType::Public)
		};

		let config = builder.build().expect("Failed to build test config.");

		TokenExchange::new(config, ReqwestTransport::default(), decoder)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {httpmock as _, tokio as _};
