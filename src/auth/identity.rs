//! Identity returned by the SmartNSF login endpoint and the session cookies attached to it.

// crates.io
use serde_json::{Map, Value};
// self
use crate::_prelude::*;

/// Session cookie issued by the remote host during the delegated exchange.
///
/// Cookies order by name, then value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionCookie {
	/// Cookie name (for example `DomAuthSessId` or `LtpaToken`).
	pub name: String,
	/// Cookie value. Treat it like a bearer token.
	pub value: String,
}
impl SessionCookie {
	/// Creates a cookie from its name and value.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self { name: name.into(), value: value.into() }
	}

	/// Splits a `Cookie` request header (`a=1; b=2`) into ordered cookies.
	///
	/// Segments without a `=` or with an empty name are skipped.
	pub fn parse_header(raw: &str) -> Vec<Self> {
		raw.split(';')
			.filter_map(|pair| {
				let (name, value) = pair.split_once('=')?;
				let name = name.trim();

				if name.is_empty() {
					return None;
				}

				Some(Self::new(name, value.trim()))
			})
			.collect()
	}
}
impl Debug for SessionCookie {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionCookie")
			.field("name", &self.name)
			.field("value", &"<redacted>")
			.finish()
	}
}

/// Reasons a response body is not accepted as an identity.
///
/// Every variant collapses into the same authentication failure; the detail only reaches
/// debug logs.
#[derive(Debug, ThisError)]
pub enum IdentityRejection {
	/// Body is not JSON.
	#[error("Response body is not valid JSON.")]
	Malformed(#[source] serde_json::Error),
	/// Body is JSON but not an object.
	#[error("Response body is not a JSON object.")]
	NotAnObject,
	/// Body has no non-empty string `username`.
	#[error("Response body does not carry a username.")]
	MissingUsername,
}

/// Identity reported by the SmartNSF login endpoint.
///
/// A typical payload looks like:
///
/// ```json
/// {
///   "username": "Hans Muster/ACME",
///   "email": "hans.muster@acme.com",
///   "roles": ["[dbmanager]", "[signer]"],
///   "groups": ["*", "_ServerAccess"],
///   "accesslevel": 3
/// }
/// ```
///
/// Fields beyond the known ones, and known ones whose value has an unexpected type, are kept in
/// [`RemoteIdentity::extra`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RemoteIdentity {
	/// Canonical or abbreviated Notes name.
	pub username: String,
	/// Primary mail address, when the directory has one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Database ACL roles, in the order the server reported them.
	pub roles: Vec<String>,
	/// Group memberships, in the order the server reported them.
	pub groups: Vec<String>,
	/// Database ACL access level. Numeric strings such as `"3"` are accepted.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub accesslevel: Option<i64>,
	/// Session cookies the remote host set during the login exchange.
	pub cookies: Vec<SessionCookie>,
	/// Remaining response fields.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl RemoteIdentity {
	/// Parses a login endpoint response body.
	///
	/// The body must be a JSON object whose `username` is a non-empty string. Every other field
	/// is optional: `null` reads as absent, and a value of an unexpected type stays in
	/// [`RemoteIdentity::extra`] untouched.
	pub fn from_body(body: &str) -> Result<Self, IdentityRejection> {
		let value = serde_json::from_str::<Value>(body).map_err(IdentityRejection::Malformed)?;
		let Value::Object(mut extra) = value else {
			return Err(IdentityRejection::NotAnObject);
		};
		let username = match extra.remove("username") {
			Some(Value::String(username)) if !username.is_empty() => username,
			_ => return Err(IdentityRejection::MissingUsername),
		};
		let email = take_field(&mut extra, "email", |value| match value {
			Value::String(email) => Some(email.clone()),
			_ => None,
		});
		let roles = take_field(&mut extra, "roles", string_list).unwrap_or_default();
		let groups = take_field(&mut extra, "groups", string_list).unwrap_or_default();
		let accesslevel = take_field(&mut extra, "accesslevel", |value| match value {
			Value::Number(level) => level.as_i64(),
			Value::String(level) => level.trim().parse().ok(),
			_ => None,
		});

		Ok(Self { username, email, roles, groups, accesslevel, cookies: Vec::new(), extra })
	}

	/// Attaches the session cookies captured during the exchange.
	///
	/// A `cookies` key sent by the remote host is dropped from [`RemoteIdentity::extra`] so the
	/// captured cookies are the only ones that serialize.
	pub fn with_cookies(mut self, cookies: Vec<SessionCookie>) -> Self {
		self.extra.remove("cookies");
		self.cookies = cookies;

		self
	}
}

/// Removes `key` from `extra` when `read` accepts its value; `null` is dropped as absent.
fn take_field<T>(
	extra: &mut Map<String, Value>,
	key: &str,
	read: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
	match extra.get(key) {
		Some(Value::Null) => {
			extra.remove(key);

			None
		},
		Some(value) => {
			let field = read(value)?;

			extra.remove(key);

			Some(field)
		},
		None => None,
	}
}

fn string_list(value: &Value) -> Option<Vec<String>> {
	value.as_array()?.iter().map(|item| item.as_str().map(ToOwned::to_owned)).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn full_payload_parses() {
		let identity = RemoteIdentity::from_body(
			r#"{
				"username": "Hans Muster/ACME",
				"email": "hans.muster@acme.com",
				"roles": ["[dbmanager]", "[signer]"],
				"groups": ["*", "_ServerAccess"],
				"accesslevel": 3,
				"displayname": "Hans Muster"
			}"#,
		)
		.expect("Full identity payload should parse.");

		assert_eq!(identity.username, "Hans Muster/ACME");
		assert_eq!(identity.email.as_deref(), Some("hans.muster@acme.com"));
		assert_eq!(identity.roles, ["[dbmanager]", "[signer]"]);
		assert_eq!(identity.groups, ["*", "_ServerAccess"]);
		assert_eq!(identity.accesslevel, Some(3));
		assert_eq!(identity.extra.get("displayname"), Some(&Value::from("Hans Muster")));
		assert!(identity.cookies.is_empty());
	}

	#[test]
	fn bodies_without_identity_are_rejected() {
		assert!(matches!(
			RemoteIdentity::from_body("not json"),
			Err(IdentityRejection::Malformed(_))
		));
		assert!(matches!(
			RemoteIdentity::from_body("[\"username\"]"),
			Err(IdentityRejection::NotAnObject)
		));
		assert!(matches!(
			RemoteIdentity::from_body("{\"email\":\"x@acme.com\"}"),
			Err(IdentityRejection::MissingUsername)
		));
		assert!(matches!(
			RemoteIdentity::from_body("{\"username\":\"\"}"),
			Err(IdentityRejection::MissingUsername)
		));
		assert!(matches!(
			RemoteIdentity::from_body("{\"username\":42}"),
			Err(IdentityRejection::MissingUsername)
		));
	}

	#[test]
	fn null_optional_fields_read_as_absent() {
		let identity = RemoteIdentity::from_body(
			"{\"username\":\"Hans Muster/ACME\",\"email\":null,\"roles\":null,\"groups\":null,\
			 \"accesslevel\":null}",
		)
		.expect("Null optional fields should be accepted.");

		assert_eq!(identity.username, "Hans Muster/ACME");
		assert!(identity.email.is_none());
		assert!(identity.roles.is_empty());
		assert!(identity.groups.is_empty());
		assert!(identity.accesslevel.is_none());
		assert!(identity.extra.is_empty());
	}

	#[test]
	fn mistyped_optional_fields_are_kept_as_extra() {
		let identity = RemoteIdentity::from_body(
			"{\"username\":\"Hans Muster/ACME\",\"email\":false,\"roles\":\"[signer]\",\
			 \"groups\":[\"*\",7],\"accesslevel\":\"3\"}",
		)
		.expect("Mistyped optional fields should be accepted.");

		assert_eq!(identity.accesslevel, Some(3));
		assert!(identity.email.is_none());
		assert!(identity.roles.is_empty());
		assert!(identity.groups.is_empty());
		assert_eq!(identity.extra.get("email"), Some(&Value::Bool(false)));
		assert_eq!(identity.extra.get("roles"), Some(&Value::from("[signer]")));
		assert_eq!(identity.extra.get("groups"), Some(&serde_json::json!(["*", 7])));
		assert!(identity.extra.get("accesslevel").is_none());
	}

	#[test]
	fn cookies_sort_by_name() {
		let mut cookies = vec![
			SessionCookie::new("LtpaToken", "x"),
			SessionCookie::new("DomAuthSessId", "b"),
			SessionCookie::new("DomAuthSessId", "a"),
		];

		cookies.sort();

		assert_eq!(
			cookies,
			vec![
				SessionCookie::new("DomAuthSessId", "a"),
				SessionCookie::new("DomAuthSessId", "b"),
				SessionCookie::new("LtpaToken", "x"),
			]
		);
	}

	#[test]
	fn captured_cookies_replace_remote_cookies_field() {
		let identity = RemoteIdentity::from_body("{\"username\":\"hans\",\"cookies\":\"spoofed\"}")
			.expect("Identity with a cookies key should parse.")
			.with_cookies(vec![SessionCookie::new("DomAuthSessId", "abc")]);
		let value = serde_json::to_value(&identity).expect("Identity should serialize.");

		assert_eq!(value["cookies"][0]["name"], "DomAuthSessId");
		assert!(identity.extra.get("cookies").is_none());
	}

	#[test]
	fn cookie_header_splits_in_order() {
		let cookies = SessionCookie::parse_header("DomAuthSessId=abc; LtpaToken=x=y;  ; =bad");

		assert_eq!(
			cookies,
			vec![SessionCookie::new("DomAuthSessId", "abc"), SessionCookie::new("LtpaToken", "x=y")]
		);
		assert!(!format!("{:?}", cookies[0]).contains("abc"));
	}
}
