//! Demonstrates plugging a custom [`DelegationHttpClient`] into the strategy and bridging the
//! outcome into a callback-style host through an [`OutcomeSink`].
//!
//! 1. Implement [`DelegationHttpClient`] so every exchange reports its status, body, and the
//!    cookies of its own jar.
//! 2. Pass the transport to [`SmartNsfStrategyBuilder::with_http_client`].
//! 3. Implement [`OutcomeSink`] for the host's `success`/`fail`/`error` channel.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
// self
use smartnsf_auth::{
	auth::{Credentials, CredentialsError, RemoteIdentity, SessionCookie},
	error::{BoxError, Error},
	http::{DelegatedRequest, DelegatedResponse, DelegationHttpClient, HttpFuture},
	outcome::{Failure, OutcomeSink},
	strategy::SmartNsfStrategyBuilder,
};

/// Transport that accepts a single hard-coded account.
struct StaticDirectory;
impl DelegationHttpClient for StaticDirectory {
	fn post_form<'a>(&'a self, request: DelegatedRequest<'a>) -> HttpFuture<'a, DelegatedResponse> {
		Box::pin(async move {
			let accepted =
				request.form.username() == "hans" && request.form.password().expose() == "secret";
			let (body, cookies) = if accepted {
				(
					"{\"username\":\"Hans Muster/ACME\"}".to_owned(),
					vec![SessionCookie::new("DomAuthSessId", "static-session")],
				)
			} else {
				("<html>Login form</html>".to_owned(), Vec::new())
			};

			Ok(DelegatedResponse { status: 200, body, cookies })
		})
	}
}

/// Host-side channel that prints whatever the strategy reports.
struct PrintingSink(&'static str);
impl OutcomeSink<String> for PrintingSink {
	fn success(self, user: String) {
		println!("[{}] success: {user}", self.0);
	}

	fn fail(self, failure: Failure) {
		println!("[{}] fail: {} ({})", self.0, failure.message, failure.status);
	}

	fn error(self, error: Error) {
		println!("[{}] error: {error}", self.0);
	}
}

fn extract(request: &(&'static str, &'static str)) -> Result<Credentials, CredentialsError> {
	Credentials::new(request.0, request.1)
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let strategy = SmartNsfStrategyBuilder::with_http_client(Arc::new(StaticDirectory))
		.login_path_root("/apps/app.nsf")
		.remote_host("https://domino.acme.example")
		.extractor(extract)
		.verify(|identity: RemoteIdentity| async move {
			let user = format!("{} ({} cookies)", identity.username, identity.cookies.len());

			Ok::<_, BoxError>(Some(user))
		})
		.build()?;

	strategy.authenticate_into(&("hans", "secret"), PrintingSink("valid")).await;
	strategy.authenticate_into(&("hans", "wrong"), PrintingSink("wrong password")).await;
	strategy.authenticate_into(&("", "secret"), PrintingSink("empty username")).await;

	Ok(())
}
