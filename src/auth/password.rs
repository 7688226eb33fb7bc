//! Password wrapper that redacts the submitted secret.

// self
use crate::_prelude::*;

/// Redacted password wrapper keeping the submitted secret out of logs.
///
/// The value serializes as a plain string because it has to travel in the login form body.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Password(String);
impl Password {
	/// Wraps a new password string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner password. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the password is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for Password {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for Password {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Password").field(&"<redacted>").finish()
	}
}
impl Display for Password {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn password_formatters_redact() {
		let password = Password::new("hunter2");

		assert_eq!(format!("{password:?}"), "Password(\"<redacted>\")");
		assert_eq!(format!("{password}"), "<redacted>");
		assert_eq!(password.expose(), "hunter2");
	}

	#[test]
	fn password_serializes_as_plain_string() {
		let json = serde_json::to_string(&Password::new("hunter2"))
			.expect("Password should serialize to JSON.");

		assert_eq!(json, "\"hunter2\"");
	}
}
