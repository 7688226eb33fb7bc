//! Demonstrates authenticating a submitted login form against a (mocked) SmartNSF server with the
//! default reqwest transport, then resolving the Domino identity into an application user.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use smartnsf_auth::{
	auth::{Credentials, CredentialsError, RemoteIdentity},
	error::BoxError,
	outcome::Outcome,
	strategy::{SmartNsfStrategy, StrategyConfig},
};

/// Stand-in for a web framework request carrying a decoded form body.
struct FormRequest {
	body: HashMap<&'static str, &'static str>,
}

#[derive(Debug)]
struct AppUser {
	id: u64,
	display_name: String,
	roles: Vec<String>,
}

fn extract(request: &FormRequest) -> Result<Credentials, CredentialsError> {
	Credentials::from_parts(
		request.body.get("username").map(|value| (*value).to_owned()),
		request.body.get("password").map(|value| (*value).to_owned()),
	)
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/names.nsf").form_urlencoded_tuple("username", "hans");
			then.status(200)
				.header("content-type", "application/json")
				.header("set-cookie", "DomAuthSessId=demo-session; Path=/; HttpOnly")
				.body(
					"{\"username\":\"CN=Hans Muster/O=ACME\",\"roles\":[\"[signer]\"],\"accesslevel\":3}",
				);
		})
		.await;
	let config = StrategyConfig::new("/apps/app.nsf", server.base_url());
	let strategy = SmartNsfStrategy::new(
		config,
		|identity: RemoteIdentity| async move {
			let user = AppUser {
				id: 42,
				display_name: identity.username.clone(),
				roles: identity.roles.clone(),
			};

			println!("Domino session cookies: {:?}", identity.cookies);

			Ok::<_, BoxError>(Some(user))
		},
		extract,
	)?;
	let request =
		FormRequest { body: HashMap::from([("username", "hans"), ("password", "secret")]) };

	match strategy.authenticate(&request).await {
		Outcome::Success(user) =>
			println!("Logged in as #{} {} with roles {:?}.", user.id, user.display_name, user.roles),
		Outcome::Fail(failure) => println!("Rejected: {failure}."),
		Outcome::Error(err) => println!("Errored: {err}."),
	}

	login_mock.assert_async().await;

	Ok(())
}
