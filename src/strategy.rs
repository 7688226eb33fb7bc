//! The SmartNSF credential-delegation strategy.
//!
//! [`SmartNsfStrategy`] holds the resolved configuration, the two application hooks, and the
//! HTTP transport. It keeps no per-request state: every call to
//! [`SmartNsfStrategy::authenticate`] extracts credentials, performs one delegated login
//! exchange with its own cookie jar, and verifies the returned identity.

/// Type-changing builder that validates every constructor input.
pub mod builder;
pub mod config;

mod authenticate;

pub use builder::*;
pub use config::*;

// self
use crate::{_prelude::*, http::DelegationHttpClient, outcome::Outcome};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

/// Name under which hosts register the strategy.
pub const STRATEGY_NAME: &str = "smartnsf";

/// Future returned by [`Strategy::authenticate`].
pub type AuthFuture<'a, U> = Pin<Box<dyn Future<Output = Outcome<U>> + 'a + Send>>;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestStrategy<E, V> = SmartNsfStrategy<E, V, ReqwestHttpClient>;

/// Capability a host authentication framework expects from a strategy.
pub trait Strategy<R>
where
	Self: Send + Sync,
	R: ?Sized,
{
	/// Application user produced on success.
	type User;

	/// Registration name of the strategy.
	fn name(&self) -> &'static str;

	/// Runs one authentication attempt for `request`.
	fn authenticate<'a>(&'a self, request: &'a R) -> AuthFuture<'a, Self::User>;
}

/// Credential-delegation strategy backed by a SmartNSF-enabled Domino server.
///
/// Construct it with [`SmartNsfStrategy::builder`] (or [`SmartNsfStrategy::new`]); both fail
/// immediately when a hook or configuration field is missing. The strategy is `Send + Sync`
/// when its hooks are, so share it behind an `Arc` across request handlers.
pub struct SmartNsfStrategy<E, V, C>
where
	C: ?Sized + DelegationHttpClient,
{
	config: StrategyConfig,
	endpoints: DelegationEndpoints,
	extractor: E,
	verifier: V,
	http_client: Arc<C>,
}
impl<E, V, C> SmartNsfStrategy<E, V, C>
where
	C: ?Sized + DelegationHttpClient,
{
	/// Returns the configuration the strategy was built with.
	pub fn config(&self) -> &StrategyConfig {
		&self.config
	}

	/// Returns the endpoints resolved from the configuration.
	pub fn endpoints(&self) -> &DelegationEndpoints {
		&self.endpoints
	}

	/// Returns the HTTP transport.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}
}
#[cfg(feature = "reqwest")]
impl SmartNsfStrategy<(), (), ReqwestHttpClient> {
	/// Starts a builder that uses the default reqwest transport.
	///
	/// Use [`SmartNsfStrategyBuilder::with_http_client`] to start from a custom transport.
	pub fn builder() -> SmartNsfStrategyBuilder<(), (), ReqwestHttpClient> {
		SmartNsfStrategyBuilder::with_http_client(Arc::new(ReqwestHttpClient::default()))
	}
}
#[cfg(feature = "reqwest")]
impl<E, V> SmartNsfStrategy<E, V, ReqwestHttpClient> {
	/// Creates a strategy from `config`, `verifier`, and `extractor` using the default reqwest
	/// transport.
	pub fn new(config: StrategyConfig, verifier: V, extractor: E) -> Result<Self, ConfigError> {
		SmartNsfStrategy::builder()
			.config(config)
			.verify(verifier)
			.extractor(extractor)
			.build()
	}
}
impl<E, V, C> Debug for SmartNsfStrategy<E, V, C>
where
	C: ?Sized + DelegationHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SmartNsfStrategy")
			.field("name", &STRATEGY_NAME)
			.field("config", &self.config)
			.field("login_url", &self.endpoints.login_url.as_str())
			.finish()
	}
}
