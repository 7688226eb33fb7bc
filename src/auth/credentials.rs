//! Credentials produced by the extractor and the login form derived from them.

// self
use crate::{_prelude::*, auth::Password};

/// Error returned when an extractor cannot produce both credential fields.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CredentialsError {
	/// Username was absent or empty.
	#[error("Username is missing from the request.")]
	MissingUsername,
	/// Password was absent or empty.
	#[error("Password is missing from the request.")]
	MissingPassword,
}

/// Username and password asserted by an incoming request.
///
/// Both fields are guaranteed non-empty; construction fails otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	username: String,
	password: Password,
}
impl Credentials {
	/// Validates and wraps a username/password pair.
	pub fn new(
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, CredentialsError> {
		let username = username.into();
		let password = Password::new(password);

		if username.is_empty() {
			return Err(CredentialsError::MissingUsername);
		}
		if password.is_empty() {
			return Err(CredentialsError::MissingPassword);
		}

		Ok(Self { username, password })
	}

	/// Builds credentials from optional request fields, treating `None` like an empty value.
	pub fn from_parts(
		username: Option<String>,
		password: Option<String>,
	) -> Result<Self, CredentialsError> {
		let username = username.ok_or(CredentialsError::MissingUsername)?;
		let password = password.ok_or(CredentialsError::MissingPassword)?;

		Self::new(username, password)
	}

	/// Returns the asserted username.
	pub fn username(&self) -> &str {
		&self.username
	}

	/// Returns the asserted password.
	pub fn password(&self) -> &Password {
		&self.password
	}

	/// Consumes the credentials into the form posted to the Domino login endpoint.
	pub fn into_login_form(self, redirect_to: impl Into<String>) -> LoginForm {
		let Self { username, password } = self;

		LoginForm { username, password, redirect_to: redirect_to.into() }
	}
}

/// Form-encoded body of the delegated login request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginForm {
	username: String,
	password: Password,
	#[serde(rename = "redirectTo")]
	redirect_to: String,
}
impl LoginForm {
	/// Returns the username field.
	pub fn username(&self) -> &str {
		&self.username
	}

	/// Returns the password field.
	pub fn password(&self) -> &Password {
		&self.password
	}

	/// Returns the `redirectTo` field Domino follows after a successful login.
	pub fn redirect_to(&self) -> &str {
		&self.redirect_to
	}
}
