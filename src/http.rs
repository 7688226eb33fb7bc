//! Transport primitives for the delegated login exchange.
//!
//! The module exposes [`DelegationHttpClient`] alongside the [`DelegatedRequest`] and
//! [`DelegatedResponse`] value types so downstream crates can plug in their own HTTP stack.
//! Implementations must give every call its own cookie jar: the cookies reported back belong to
//! exactly one login attempt and are never shared with a concurrent one.

// std
#[cfg(feature = "reqwest")] use std::time::Duration;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	cookie::{CookieStore, Jar},
	redirect::Policy,
};
// self
use crate::{
	_prelude::*,
	auth::{LoginForm, SessionCookie},
};
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Future returned by [`DelegationHttpClient::post_form`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Abstraction over HTTP transports able to run the delegated login exchange.
///
/// The trait is the strategy's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can back a strategy shared across tasks.
pub trait DelegationHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Posts `request.form` to `request.url` as `application/x-www-form-urlencoded`.
	///
	/// # Contract
	///
	/// - Use a cookie jar that lives only for this call.
	/// - Follow redirects until a final response arrives.
	/// - Resolve to `Ok` for any HTTP status; status classification belongs to the strategy.
	/// - Report the cookies the jar holds for `request.cookie_scope` once the exchange ends, in a
	///   deterministic order.
	/// - Report network failures as [`crate::error::TransportError`].
	fn post_form<'a>(&'a self, request: DelegatedRequest<'a>) -> HttpFuture<'a, DelegatedResponse>;
}

/// Outbound login exchange handed to a [`DelegationHttpClient`].
#[derive(Clone, Copy, Debug)]
pub struct DelegatedRequest<'a> {
	/// Domino login endpoint (`{remote_host}/names.nsf?login`).
	pub url: &'a Url,
	/// Form body carrying `username`, `password`, and `redirectTo`.
	pub form: &'a LoginForm,
	/// Address whose cookies are reported back in [`DelegatedResponse::cookies`].
	pub cookie_scope: &'a Url,
}

/// Final response of a delegated login exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelegatedResponse {
	/// HTTP status of the final response after redirects.
	pub status: u16,
	/// Raw response body.
	pub body: String,
	/// Cookies the per-call jar holds for the cookie scope.
	///
	/// [`ReqwestHttpClient`] reports them sorted by name, then value.
	pub cookies: Vec<SessionCookie>,
}

/// Reqwest-backed transport.
///
/// Each exchange builds a fresh [`ReqwestClient`] around a fresh cookie [`Jar`], because a
/// reqwest client is bound to one cookie provider for its whole lifetime.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
	/// Total request timeout applied to each exchange, if any.
	pub timeout: Option<Duration>,
	/// Maximum number of redirects followed before the exchange fails.
	pub max_redirects: usize,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	const DEFAULT_MAX_REDIRECTS: usize = 10;

	/// Sets a total timeout for each exchange.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Overrides the redirect limit (defaults to 10).
	pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
		self.max_redirects = max_redirects;

		self
	}

	fn build_client(&self, jar: Arc<Jar>) -> Result<ReqwestClient, ConfigError> {
		let mut builder = ReqwestClient::builder()
			.cookie_provider(jar)
			.redirect(Policy::limited(self.max_redirects));

		if let Some(timeout) = self.timeout {
			builder = builder.timeout(timeout);
		}

		builder.build().map_err(ConfigError::http_client_build)
	}
}
#[cfg(feature = "reqwest")]
impl Default for ReqwestHttpClient {
	fn default() -> Self {
		Self { timeout: None, max_redirects: Self::DEFAULT_MAX_REDIRECTS }
	}
}
#[cfg(feature = "reqwest")]
impl DelegationHttpClient for ReqwestHttpClient {
	fn post_form<'a>(&'a self, request: DelegatedRequest<'a>) -> HttpFuture<'a, DelegatedResponse> {
		Box::pin(async move {
			let jar = Arc::new(Jar::default());
			let client = self.build_client(Arc::clone(&jar))?;
			let response = client
				.post(request.url.clone())
				.form(request.form)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(TransportError::from)?;
			let mut cookies = jar
				.cookies(request.cookie_scope)
				.and_then(|header| header.to_str().map(SessionCookie::parse_header).ok())
				.unwrap_or_default();

			// The jar iterates in hash order.
			cookies.sort();

			Ok(DelegatedResponse { status, body, cookies })
		})
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	#[test]
	fn reqwest_defaults_follow_redirects() {
		let client = ReqwestHttpClient::default();

		assert_eq!(client.max_redirects, 10);
		assert!(client.timeout.is_none());

		let client = client.with_timeout(Duration::from_secs(5)).with_max_redirects(3);

		assert_eq!(client.timeout, Some(Duration::from_secs(5)));
		assert_eq!(client.max_redirects, 3);
	}
}
