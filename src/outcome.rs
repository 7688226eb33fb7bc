//! Terminal outcomes of one authentication attempt and the sinks that receive them.
//!
//! Host frameworks built around `success`/`fail`/`error` callbacks implement [`OutcomeSink`].
//! Every sink method consumes the sink, so an attempt can report at most once; the strategy
//! produces exactly one [`Outcome`] per call, so it reports at least once.

// self
use crate::{_prelude::*, obs::AuthOutcome};

/// Result of one authentication attempt.
#[derive(Debug)]
pub enum Outcome<U> {
	/// The remote host accepted the credentials and the verifier resolved a user.
	Success(U),
	/// The remote host did not vouch for the credentials.
	Fail(Failure),
	/// Configuration, transport, or verifier fault.
	Error(Error),
}
impl<U> Outcome<U> {
	/// Returns the label used for metrics and logs.
	pub const fn kind(&self) -> AuthOutcome {
		match self {
			Self::Success(_) => AuthOutcome::Success,
			Self::Fail(_) => AuthOutcome::Fail,
			Self::Error(_) => AuthOutcome::Error,
		}
	}

	/// Returns `true` for [`Outcome::Success`].
	pub const fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	/// Returns the resolved user, if any.
	pub fn user(&self) -> Option<&U> {
		match self {
			Self::Success(user) => Some(user),
			_ => None,
		}
	}

	/// Splits the outcome into a system result wrapping the authentication judgment.
	pub fn into_result(self) -> Result<Result<U, Failure>> {
		match self {
			Self::Success(user) => Ok(Ok(user)),
			Self::Fail(failure) => Ok(Err(failure)),
			Self::Error(err) => Err(err),
		}
	}

	/// Hands the outcome to `sink`, calling exactly one of its methods.
	pub fn report<S>(self, sink: S)
	where
		S: OutcomeSink<U>,
	{
		match self {
			Self::Success(user) => sink.success(user),
			Self::Fail(failure) => sink.fail(failure),
			Self::Error(err) => sink.error(err),
		}
	}
}

/// Authentication judgment: the remote host did not vouch for the credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
	/// Human-readable message for the client.
	pub message: String,
	/// HTTP status the host should answer with.
	pub status: u16,
}
impl Failure {
	/// The failure reported for every rejected or unreadable login response.
	pub fn authentication_failed() -> Self {
		Self { message: "Authentication failed".into(), status: 401 }
	}
}
impl Display for Failure {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} ({})", self.message, self.status)
	}
}

/// Host-framework outcome channel.
pub trait OutcomeSink<U>
where
	Self: Sized,
{
	/// Authentication succeeded with `user`.
	fn success(self, user: U);

	/// Authentication was rejected.
	fn fail(self, failure: Failure);

	/// Authentication could not be judged because of a fault.
	fn error(self, error: Error);
}

/// Shared slot that stores the reported outcome for later retrieval.
///
/// Clones share the same slot: keep one clone, report through another, then [`take`] the
/// outcome.
///
/// [`take`]: OutcomeSlot::take
pub struct OutcomeSlot<U>(Arc<Mutex<Option<Outcome<U>>>>);
impl<U> OutcomeSlot<U> {
	/// Returns the stored outcome, if any, consuming it from the slot.
	pub fn take(&self) -> Option<Outcome<U>> {
		self.0.lock().take()
	}

	/// Returns `true` once an outcome has been stored and not yet taken.
	pub fn is_filled(&self) -> bool {
		self.0.lock().is_some()
	}

	fn store(&self, outcome: Outcome<U>) {
		*self.0.lock() = Some(outcome);
	}
}
impl<U> Clone for OutcomeSlot<U> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}
impl<U> Default for OutcomeSlot<U> {
	fn default() -> Self {
		Self(Default::default())
	}
}
impl<U> Debug for OutcomeSlot<U> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("OutcomeSlot").field(&self.0.lock().as_ref().map(Outcome::kind)).finish()
	}
}
impl<U> OutcomeSink<U> for OutcomeSlot<U> {
	fn success(self, user: U) {
		self.store(Outcome::Success(user));
	}

	fn fail(self, failure: Failure) {
		self.store(Outcome::Fail(failure));
	}

	fn error(self, error: Error) {
		self.store(Outcome::Error(error));
	}
}
