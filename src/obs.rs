//! Optional observability helpers for authentication attempts.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every attempt inside a span named `smartnsf_auth.authenticate` with
//!   the `strategy` and `remote_host` fields, and to emit stage and outcome events.
//! - Enable `metrics` to increment the `smartnsf_auth_total` counter for every
//!   attempt/success/fail/error, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Stages of the extract → delegate → verify protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthStage {
	/// Credentials were read from the request.
	Extracted,
	/// The login exchange with the remote host completed.
	Delegated,
	/// The response body was accepted as an identity.
	Parsed,
	/// The verifier resolved the identity.
	Verified,
}
impl AuthStage {
	/// Returns a stable label suitable for span or event fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthStage::Extracted => "extracted",
			AuthStage::Delegated => "delegated",
			AuthStage::Parsed => "parsed",
			AuthStage::Verified => "verified",
		}
	}
}
impl Display for AuthStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthOutcome {
	/// Entry to `authenticate`.
	Attempt,
	/// Success outcome.
	Success,
	/// Failure outcome (rejected login).
	Fail,
	/// Error outcome (fault).
	Error,
}
impl AuthOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthOutcome::Attempt => "attempt",
			AuthOutcome::Success => "success",
			AuthOutcome::Fail => "fail",
			AuthOutcome::Error => "error",
		}
	}
}
impl Display for AuthOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
