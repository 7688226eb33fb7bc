//! Strategy-level error types shared by construction, transport, and verification.
//!
//! Everything in [`Error`] is reported as an *error* outcome: a fault in configuration, the
//! network, or the application's verifier. A rejected login is never an [`Error`]; it is an
//! [`crate::outcome::Failure`].

// self
use crate::{_prelude::*, auth::CredentialsError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Type-erased error accepted from application collaborators and custom transports.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical runtime error reported through the error outcome.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, body read).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Extractor did not produce both a username and a password.
	#[error("Expect username && password as part of credentials!")]
	MissingCredentials {
		/// Which field the extractor left empty.
		#[from]
		source: CredentialsError,
	},
	/// Remote host answered with a status other than 200.
	#[error("{status}: call to SmartNSF failed.")]
	UnexpectedStatus {
		/// HTTP status code returned by the remote host.
		status: u16,
	},
	/// Application verifier reported an error while resolving the identity.
	#[error("Identity verifier reported an error: {source}")]
	Verify {
		/// Error returned by the verifier.
		source: BoxError,
	},
	/// Application verifier resolved no user for a valid identity.
	#[error("No user defined!")]
	NoUser,
}
impl Error {
	/// Wraps an error returned by the application's verifier.
	pub fn verify(src: impl Into<BoxError>) -> Self {
		Self::Verify { source: src.into() }
	}
}

/// Configuration and construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// One or more required constructor inputs were not supplied.
	#[error(
		"SmartNSF authentication strategy requires a verify, extractor, options.smartNSFPath and options.smartNSFHost to work correct"
	)]
	MissingOptions {
		/// Labels of the absent inputs, in constructor order.
		missing: Vec<&'static str>,
	},
	/// Host-provided options do not describe a [`StrategyConfig`](crate::strategy::StrategyConfig).
	#[error("Strategy option `{}` has an unexpected type.", .source.path())]
	InvalidOptions {
		/// Deserialization failure with the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Remote host cannot be parsed as a URL.
	#[error("Remote host `{remote_host}` is not a valid URL.")]
	InvalidRemoteHost {
		/// Configured remote host.
		remote_host: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Remote host is not an absolute http(s) address.
	#[error("Remote host `{remote_host}` must be an absolute http or https address.")]
	UnsupportedRemoteHost {
		/// Configured remote host.
		remote_host: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures raised while talking to the remote host.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the SmartNSF login endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn runtime_messages_match_the_wire_contract() {
		assert_eq!(
			Error::from(CredentialsError::MissingPassword).to_string(),
			"Expect username && password as part of credentials!"
		);
		assert_eq!(
			Error::UnexpectedStatus { status: 503 }.to_string(),
			"503: call to SmartNSF failed."
		);
		assert_eq!(Error::NoUser.to_string(), "No user defined!");
	}

	#[test]
	fn missing_options_keep_the_fixed_message() {
		let err = ConfigError::MissingOptions { missing: vec!["verify", "options.smartNSFHost"] };
		let message = err.to_string();

		assert_eq!(
			message,
			"SmartNSF authentication strategy requires a verify, extractor, options.smartNSFPath and \
			 options.smartNSFHost to work correct"
		);
		assert!(!message.contains("missing"));
	}

	#[test]
	fn verify_errors_keep_their_source() {
		let err = Error::verify("directory offline");

		assert_eq!(err.to_string(), "Identity verifier reported an error: directory offline");
		assert!(err.source().is_some());
	}
}
