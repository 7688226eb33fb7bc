//! The extract → delegate → verify flow.
//!
//! Each stage either hands its product to the next one or ends the attempt with a single
//! [`Outcome`]:
//!
//! - extraction: missing credentials end in an error, before any network traffic;
//! - delegation: transport faults and non-200 statuses end in an error;
//! - parsing: an unreadable body or one without a username ends in the 401 failure;
//! - verification: verifier errors and unresolved users end in an error, anything else succeeds.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, RemoteIdentity},
	hooks::{CredentialExtractor, IdentityVerifier},
	http::{DelegatedRequest, DelegatedResponse, DelegationHttpClient},
	obs::{self, AuthOutcome, AuthSpan, AuthStage},
	outcome::{Failure, Outcome, OutcomeSink},
	strategy::{AuthFuture, STRATEGY_NAME, SmartNsfStrategy, Strategy},
};

impl<E, V, C> SmartNsfStrategy<E, V, C>
where
	V: IdentityVerifier,
	C: ?Sized + DelegationHttpClient,
{
	/// Runs one authentication attempt for `request` and returns its outcome.
	pub async fn authenticate<R>(&self, request: &R) -> Outcome<V::User>
	where
		R: ?Sized,
		E: CredentialExtractor<R>,
	{
		let span = AuthSpan::new(STRATEGY_NAME, &self.config.remote_host);

		obs::record_auth_outcome(AuthOutcome::Attempt);

		let outcome = span
			.instrument(async move {
				let outcome = self.run(request).await;

				obs::trace_outcome(&outcome);

				outcome
			})
			.await;

		obs::record_auth_outcome(outcome.kind());

		outcome
	}

	/// Runs one authentication attempt and reports its outcome to `sink`.
	pub async fn authenticate_into<R, S>(&self, request: &R, sink: S)
	where
		R: ?Sized,
		E: CredentialExtractor<R>,
		S: OutcomeSink<V::User>,
	{
		self.authenticate(request).await.report(sink);
	}

	async fn run<R>(&self, request: &R) -> Outcome<V::User>
	where
		R: ?Sized,
		E: CredentialExtractor<R>,
	{
		let credentials = match self.extractor.extract(request) {
			Ok(credentials) => credentials,
			Err(e) => return Outcome::Error(e.into()),
		};

		obs::trace_stage(AuthStage::Extracted);

		let response = match self.delegate(credentials).await {
			Ok(response) => response,
			Err(e) => return Outcome::Error(e),
		};

		obs::trace_stage(AuthStage::Delegated);

		let identity = match RemoteIdentity::from_body(&response.body) {
			Ok(identity) => identity.with_cookies(response.cookies),
			Err(rejection) => {
				obs::trace_rejection(&rejection);

				return Outcome::Fail(Failure::authentication_failed());
			},
		};

		obs::trace_stage(AuthStage::Parsed);

		match self.verifier.verify(identity).await {
			Ok(Some(user)) => {
				obs::trace_stage(AuthStage::Verified);

				Outcome::Success(user)
			},
			Ok(None) => Outcome::Error(Error::NoUser),
			Err(e) => Outcome::Error(Error::verify(e)),
		}
	}

	/// Posts the login form and returns the final response when its status is 200.
	async fn delegate(&self, credentials: Credentials) -> Result<DelegatedResponse> {
		let form = credentials.into_login_form(self.endpoints.redirect_to.as_str());
		let request = DelegatedRequest {
			url: &self.endpoints.login_url,
			form: &form,
			cookie_scope: &self.endpoints.cookie_scope,
		};
		let response = self.http_client.post_form(request).await?;

		if response.status != 200 {
			return Err(Error::UnexpectedStatus { status: response.status });
		}

		Ok(response)
	}
}
impl<R, E, V, C> Strategy<R> for SmartNsfStrategy<E, V, C>
where
	R: ?Sized + Sync,
	E: CredentialExtractor<R>,
	V: IdentityVerifier,
	C: ?Sized + DelegationHttpClient,
{
	type User = V::User;

	fn name(&self) -> &'static str {
		STRATEGY_NAME
	}

	fn authenticate<'a>(&'a self, request: &'a R) -> AuthFuture<'a, Self::User> {
		Box::pin(SmartNsfStrategy::authenticate(self, request))
	}
}
