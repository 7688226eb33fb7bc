//! Application hooks the strategy delegates to.
//!
//! Implementors are required to be `Send + Sync` so a single strategy can serve concurrent
//! requests. Plain closures work for both hooks through the blanket implementations below.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, CredentialsError, RemoteIdentity},
};

/// Future returned by [`IdentityVerifier::verify`].
pub type VerifyFuture<'a, U> =
	Pin<Box<dyn Future<Output = Result<Option<U>, BoxError>> + 'a + Send>>;

/// Reads the asserted credentials off an incoming request.
///
/// The request type belongs to the host framework; the strategy never inspects it and only
/// passes it here.
pub trait CredentialExtractor<R>
where
	Self: Send + Sync,
	R: ?Sized,
{
	/// Returns validated credentials, or which field the request is missing.
	fn extract(&self, request: &R) -> Result<Credentials, CredentialsError>;
}
impl<R, F> CredentialExtractor<R> for F
where
	R: ?Sized,
	F: Send + Sync + Fn(&R) -> Result<Credentials, CredentialsError>,
{
	fn extract(&self, request: &R) -> Result<Credentials, CredentialsError> {
		self(request)
	}
}

/// Resolves a remote identity into an application user.
///
/// Resolving to `Ok(None)` means no application user matches the identity, which the strategy
/// reports as an error outcome. The strategy awaits the future without imposing a timeout.
pub trait IdentityVerifier
where
	Self: Send + Sync,
{
	/// Application user type produced on success.
	type User: Send;

	/// Looks up the application user for `identity`.
	fn verify(&self, identity: RemoteIdentity) -> VerifyFuture<'_, Self::User>;
}
impl<F, Fut, U> IdentityVerifier for F
where
	F: Send + Sync + Fn(RemoteIdentity) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Option<U>, BoxError>>,
	U: Send,
{
	type User = U;

	fn verify(&self, identity: RemoteIdentity) -> VerifyFuture<'_, Self::User> {
		Box::pin(self(identity))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	struct FormRequest {
		fields: Vec<(&'static str, &'static str)>,
	}
	impl FormRequest {
		fn field(&self, name: &str) -> Option<String> {
			self.fields.iter().find(|(key, _)| *key == name).map(|(_, value)| (*value).into())
		}
	}

	fn extract_with<E>(extractor: &E, request: &FormRequest) -> Result<Credentials, CredentialsError>
	where
		E: CredentialExtractor<FormRequest>,
	{
		extractor.extract(request)
	}

	#[test]
	fn closures_act_as_extractors() {
		let extractor = |request: &FormRequest| {
			Credentials::from_parts(request.field("username"), request.field("password"))
		};
		let full = FormRequest { fields: vec![("username", "hans"), ("password", "secret")] };
		let partial = FormRequest { fields: vec![("username", "hans")] };

		assert_eq!(
			extract_with(&extractor, &full).map(|credentials| credentials.username().to_owned()),
			Ok("hans".into())
		);
		assert_eq!(extract_with(&extractor, &partial), Err(CredentialsError::MissingPassword));
	}

	#[tokio::test]
	async fn closures_act_as_verifiers() {
		let verifier = |identity: RemoteIdentity| async move {
			Ok::<_, BoxError>((identity.username == "Hans Muster/ACME").then_some(1_u64))
		};
		let known = RemoteIdentity::from_body("{\"username\":\"Hans Muster/ACME\"}")
			.expect("Known identity fixture should parse.");
		let unknown = RemoteIdentity::from_body("{\"username\":\"Eve/ACME\"}")
			.expect("Unknown identity fixture should parse.");

		assert_eq!(verifier.verify(known).await.expect("Verifier should not fail."), Some(1));
		assert_eq!(verifier.verify(unknown).await.expect("Verifier should not fail."), None);
	}
}
