// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::DelegationHttpClient,
	strategy::{SmartNsfStrategy, StrategyConfig},
};

/// Builder for [`SmartNsfStrategy`] values.
///
/// The hook setters change the builder's type parameters, so a fresh builder starts as
/// `SmartNsfStrategyBuilder<(), (), C>` and [`build`](Self::build) reports whichever inputs were
/// never supplied.
pub struct SmartNsfStrategyBuilder<E, V, C>
where
	C: ?Sized + DelegationHttpClient,
{
	/// Path of the SmartNSF-enabled application.
	pub login_path_root: Option<String>,
	/// Base address of the Domino server.
	pub remote_host: Option<String>,
	/// Credential extractor hook.
	pub extractor: Option<E>,
	/// Identity verifier hook.
	pub verifier: Option<V>,
	/// Transport used for the delegated exchange.
	pub http_client: Arc<C>,
}
impl<C> SmartNsfStrategyBuilder<(), (), C>
where
	C: ?Sized + DelegationHttpClient,
{
	/// Creates an empty builder around a caller-provided transport.
	pub fn with_http_client(http_client: Arc<C>) -> Self {
		Self {
			login_path_root: None,
			remote_host: None,
			extractor: None,
			verifier: None,
			http_client,
		}
	}
}
impl<E, V, C> SmartNsfStrategyBuilder<E, V, C>
where
	C: ?Sized + DelegationHttpClient,
{
	/// Sets the path of the SmartNSF-enabled application (for example `/apps/app.nsf`).
	pub fn login_path_root(mut self, path: impl Into<String>) -> Self {
		self.login_path_root = Some(path.into());

		self
	}

	/// Sets the Domino server base address (for example `https://example.org`).
	pub fn remote_host(mut self, host: impl Into<String>) -> Self {
		self.remote_host = Some(host.into());

		self
	}

	/// Copies both fields from an existing configuration.
	pub fn config(self, config: StrategyConfig) -> Self {
		let StrategyConfig { login_path_root, remote_host } = config;

		self.login_path_root(login_path_root).remote_host(remote_host)
	}

	/// Sets the credential extractor.
	pub fn extractor<E2>(self, extractor: E2) -> SmartNsfStrategyBuilder<E2, V, C> {
		SmartNsfStrategyBuilder {
			login_path_root: self.login_path_root,
			remote_host: self.remote_host,
			extractor: Some(extractor),
			verifier: self.verifier,
			http_client: self.http_client,
		}
	}

	/// Sets the identity verifier.
	pub fn verify<V2>(self, verifier: V2) -> SmartNsfStrategyBuilder<E, V2, C> {
		SmartNsfStrategyBuilder {
			login_path_root: self.login_path_root,
			remote_host: self.remote_host,
			extractor: self.extractor,
			verifier: Some(verifier),
			http_client: self.http_client,
		}
	}

	/// Consumes the builder and validates the resulting strategy.
	///
	/// Fails with [`ConfigError::MissingOptions`] listing every absent input, or with a
	/// remote-host error when the address cannot serve as a base URL.
	pub fn build(self) -> Result<SmartNsfStrategy<E, V, C>, ConfigError> {
		let Self { login_path_root, remote_host, extractor, verifier, http_client } = self;
		let login_path_root = login_path_root.unwrap_or_default();
		let remote_host = remote_host.unwrap_or_default();
		let mut missing = Vec::new();

		if verifier.is_none() {
			missing.push("verify");
		}
		if extractor.is_none() {
			missing.push("extractor");
		}
		if login_path_root.is_empty() {
			missing.push("options.smartNSFPath");
		}
		if remote_host.is_empty() {
			missing.push("options.smartNSFHost");
		}

		match (extractor, verifier) {
			(Some(extractor), Some(verifier)) if missing.is_empty() => {
				let config = StrategyConfig { login_path_root, remote_host };
				let endpoints = config.endpoints()?;

				Ok(SmartNsfStrategy { config, endpoints, extractor, verifier, http_client })
			},
			_ => Err(ConfigError::MissingOptions { missing }),
		}
	}
}
impl<E, V, C> Debug for SmartNsfStrategyBuilder<E, V, C>
where
	C: ?Sized + DelegationHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SmartNsfStrategyBuilder")
			.field("login_path_root", &self.login_path_root)
			.field("remote_host", &self.remote_host)
			.field("extractor_set", &self.extractor.is_some())
			.field("verifier_set", &self.verifier.is_some())
			.finish()
	}
}
