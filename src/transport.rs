//! Transport primitives for token-endpoint exchanges.
//!
//! The module exposes [`TokenTransport`], the exchange's only dependency on an HTTP stack,
//! together with the wire-level [`HttpRequest`]/[`HttpResponse`] aliases shared across the
//! crate. A reqwest-backed implementation ships behind the `reqwest` feature; custom stacks
//! implement the trait themselves.

// crates.io
use http::{Request, Response};
// self
use crate::{_prelude::*, error::TransportError};

/// Wire-level request handed to the transport: a POST against the token endpoint with a
/// form-encoded body.
pub type HttpRequest = Request<Vec<u8>>;
/// Wire-level response returned by the transport: status code, headers, and raw body bytes.
pub type HttpResponse = Response<Vec<u8>>;
/// Future alias returned by [`TokenTransport::send_request`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing one token-endpoint call.
///
/// One request in, one response out: retries, timeouts, pooling, and redirect policy are
/// transport concerns and never leak into the exchange. Implementations must be
/// `Send + Sync + 'static` so a single exchange can serve concurrent callers without
/// additional wrappers, and transport failures must surface as [`TransportError`] so the
/// exchange can propagate them unchanged.
pub trait TokenTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes a single HTTP exchange against the token endpoint.
	fn send_request(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Token requests must not follow redirects, matching OAuth 2.0 guidance that token
/// endpoints return results directly instead of delegating to another URI; the default
/// constructor disables redirect following. Configure any custom [`ReqwestClient`] the
/// same way before wrapping it with [`with_client`](Self::with_client).
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl Default for ReqwestTransport {
	fn default() -> Self {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build the default Reqwest client.");

		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenTransport for ReqwestTransport {
	fn send_request(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let request = reqwest::Request::try_from(request).map_err(TransportError::from)?;
			let response = client.execute(request).await.map_err(TransportError::from)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();
			let mut response_new = HttpResponse::new(body);

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
