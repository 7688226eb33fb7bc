//! Static strategy configuration and the endpoints derived from it.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, error::ConfigError};

/// Path suffix of the SmartNSF login REST endpoint inside the target application.
pub const LOGIN_REST_SUFFIX: &str = "/xsp/.xrest/?login";
/// Path and query of the Domino login form handler on the remote host.
pub const DOMINO_LOGIN_PATH: &str = "/names.nsf?login";

/// Configuration supplied once at construction.
///
/// Field aliases accept the `smartNSFPath`/`smartNSFHost` spelling used by existing
/// deployments. Absent fields deserialize as empty and are reported by
/// [`StrategyConfig::endpoints`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
	/// Path of the SmartNSF-enabled application, for example `/apps/app.nsf`.
	#[serde(default, alias = "smartNSFPath")]
	pub login_path_root: String,
	/// Base address of the Domino server including the scheme, for example
	/// `https://example.org`.
	#[serde(default, alias = "smartNSFHost")]
	pub remote_host: String,
}
impl StrategyConfig {
	/// Creates a configuration from its two fields.
	pub fn new(login_path_root: impl Into<String>, remote_host: impl Into<String>) -> Self {
		Self { login_path_root: login_path_root.into(), remote_host: remote_host.into() }
	}

	/// Reads a configuration from a host's JSON options object.
	///
	/// A field of the wrong type fails with [`ConfigError::InvalidOptions`] naming its path.
	pub fn from_options(options: Value) -> Result<Self, ConfigError> {
		serde_path_to_error::deserialize(options)
			.map_err(|source| ConfigError::InvalidOptions { source })
	}

	/// Validates the configuration and derives the delegation endpoints.
	pub fn endpoints(&self) -> Result<DelegationEndpoints, ConfigError> {
		let mut missing = Vec::new();

		if self.login_path_root.is_empty() {
			missing.push("options.smartNSFPath");
		}
		if self.remote_host.is_empty() {
			missing.push("options.smartNSFHost");
		}
		if !missing.is_empty() {
			return Err(ConfigError::MissingOptions { missing });
		}

		DelegationEndpoints::resolve(&self.login_path_root, &self.remote_host)
	}
}

/// Endpoints the strategy talks to, resolved once from [`StrategyConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelegationEndpoints {
	/// `{remote_host}/names.nsf?login`.
	pub login_url: Url,
	/// Remote host base address used to scope captured cookies.
	pub cookie_scope: Url,
	/// `{login_path_root}/xsp/.xrest/?login`, posted as `redirectTo`.
	pub redirect_to: String,
}
impl DelegationEndpoints {
	fn resolve(login_path_root: &str, remote_host: &str) -> Result<Self, ConfigError> {
		let base = remote_host.trim_end_matches('/');
		let invalid =
			|source| ConfigError::InvalidRemoteHost { remote_host: remote_host.into(), source };
		let cookie_scope = Url::parse(base).map_err(invalid)?;

		if !matches!(cookie_scope.scheme(), "http" | "https") || !cookie_scope.has_host() {
			return Err(ConfigError::UnsupportedRemoteHost { remote_host: remote_host.into() });
		}

		let login_url = Url::parse(&format!("{base}{DOMINO_LOGIN_PATH}")).map_err(invalid)?;
		let redirect_to =
			format!("{}{LOGIN_REST_SUFFIX}", login_path_root.trim_end_matches('/'));

		Ok(Self { login_url, cookie_scope, redirect_to })
	}
}
