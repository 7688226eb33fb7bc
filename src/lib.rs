//! Delegate username/password logins to a SmartNSF-enabled Domino server, then resolve the
//! returned identity into your application's own user type.
//!
//! The crate exposes a single stateless strategy, [`strategy::SmartNsfStrategy`], that runs the
//! extract → delegate → verify protocol once per request and reports exactly one
//! [`outcome::Outcome`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod hooks;
pub mod http;
pub mod obs;
pub mod outcome;
pub mod strategy;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{Credentials, CredentialsError, RemoteIdentity},
		hooks::{IdentityVerifier, VerifyFuture},
		strategy::{ReqwestStrategy, SmartNsfStrategy},
	};

	/// Login path root shared by the integration tests.
	pub const TEST_LOGIN_PATH: &str = "/apps/app.nsf";

	/// Extractor signature used by [`TestStrategy`].
	pub type TestExtractor = fn(&TestRequest) -> Result<Credentials, CredentialsError>;
	/// Strategy type alias used by reqwest-backed integration tests.
	pub type TestStrategy = ReqwestStrategy<TestExtractor, RecordingVerifier>;

	/// Minimal stand-in for a host framework request carrying a submitted login form.
	#[derive(Clone, Debug, Default)]
	pub struct TestRequest {
		/// Submitted username, if any.
		pub username: Option<String>,
		/// Submitted password, if any.
		pub password: Option<String>,
	}
	impl TestRequest {
		/// Creates a request carrying both form fields.
		pub fn new(username: &str, password: &str) -> Self {
			Self { username: Some(username.into()), password: Some(password.into()) }
		}
	}

	/// Reads the login form fields off a [`TestRequest`].
	pub fn extract_test_credentials(
		request: &TestRequest,
	) -> Result<Credentials, CredentialsError> {
		Credentials::from_parts(request.username.clone(), request.password.clone())
	}

	/// Application user produced by [`RecordingVerifier`].
	#[derive(Clone, Debug, PartialEq, Eq)]
	pub struct TestUser {
		/// Sequential identifier, starting at 1 for the first resolved identity.
		pub id: u64,
		/// Domino username the user was resolved from.
		pub username: String,
	}

	/// Scripted verifier behaviors.
	#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
	pub enum VerifierBehavior {
		/// Resolve every identity into a [`TestUser`].
		#[default]
		Resolve,
		/// Report that no application user matches the identity.
		NoUser,
		/// Report a lookup error.
		Reject,
	}

	/// Verifier that records every identity it receives before applying a scripted behavior.
	#[derive(Clone, Debug, Default)]
	pub struct RecordingVerifier {
		behavior: VerifierBehavior,
		seen: Arc<Mutex<Vec<RemoteIdentity>>>,
	}
	impl RecordingVerifier {
		/// Creates a verifier with the provided behavior.
		pub fn new(behavior: VerifierBehavior) -> Self {
			Self { behavior, seen: Default::default() }
		}

		/// Returns a snapshot of the identities received so far.
		pub fn seen(&self) -> Vec<RemoteIdentity> {
			self.seen.lock().clone()
		}

		/// Returns how many times the verifier was invoked.
		pub fn calls(&self) -> usize {
			self.seen.lock().len()
		}
	}
	impl IdentityVerifier for RecordingVerifier {
		type User = TestUser;

		fn verify(&self, identity: RemoteIdentity) -> VerifyFuture<'_, Self::User> {
			Box::pin(async move {
				let id = {
					let mut seen = self.seen.lock();

					seen.push(identity.clone());

					seen.len() as u64
				};

				match self.behavior {
					VerifierBehavior::Resolve =>
						Ok(Some(TestUser { id, username: identity.username })),
					VerifierBehavior::NoUser => Ok(None),
					VerifierBehavior::Reject => Err("User directory lookup failed.".into()),
				}
			})
		}
	}

	/// Builds a reqwest-backed [`TestStrategy`] against `remote_host` using
	/// [`TEST_LOGIN_PATH`] and [`extract_test_credentials`].
	pub fn build_reqwest_test_strategy(
		remote_host: &str,
		verifier: RecordingVerifier,
	) -> TestStrategy {
		SmartNsfStrategy::builder()
			.login_path_root(TEST_LOGIN_PATH)
			.remote_host(remote_host)
			.extractor(extract_test_credentials as TestExtractor)
			.verify(verifier)
			.build()
			.expect("Test strategy should build from a valid configuration.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{BoxError, Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
