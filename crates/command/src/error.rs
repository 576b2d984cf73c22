//! Error types surfaced by the permission engine and redirect forwarding.

use thiserror::Error;

/// Fallback text for denials raised without their own message.
pub const GENERIC_DENIAL: &str = "You do not meet the required permissions for this command.";

/// Failure of an external collaborator (subscription lookup, guild settings,
/// magic-role resolution).
#[derive(Debug, Error)]
pub enum ServiceError {
	#[error("service unavailable: {0}")]
	Unavailable(String),

	#[error("invalid value for '{key}': {reason}")]
	InvalidData { key: String, reason: String },
}

/// Outcome of a permission check that did not grant access.
///
/// `Denied` and `Notice` are expected, user-facing results. `Internal` means
/// the engine could not reach a decision and must never be shown as "not
/// authorized".
#[derive(Debug, Error)]
pub enum AuthFailure {
	/// Hard denial; the message is always populated.
	#[error("{0}")]
	Denied(String),

	/// Denial-shaped but informational, e.g. a premium upsell.
	#[error("{0}")]
	Notice(String),

	#[error("could not determine authorization: {0}")]
	Internal(#[from] ServiceError),
}

impl AuthFailure {
	pub fn is_denied(&self) -> bool {
		matches!(self, Self::Denied(_))
	}

	pub fn is_notice(&self) -> bool {
		matches!(self, Self::Notice(_))
	}

	pub fn is_internal(&self) -> bool {
		matches!(self, Self::Internal(_))
	}

	/// User-facing text for denials and notices.
	pub fn message(&self) -> Option<&str> {
		match self {
			Self::Denied(msg) | Self::Notice(msg) => Some(msg),
			Self::Internal(_) => None,
		}
	}
}

/// Errors returned by a dispatcher when executing a forwarded command.
#[derive(Debug, Error)]
pub enum DispatchError {
	/// Cooperative cancellation raised by the downstream command.
	#[error("invocation cancelled")]
	Cancelled,

	#[error("unknown command '{0}'")]
	UnknownCommand(String),

	#[error(transparent)]
	Auth(#[from] AuthFailure),

	#[error("command failed: {0}")]
	Failed(String),
}

/// Errors raised while building an engine.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("invalid dashboard url '{url}': {reason}")]
	InvalidDashboardUrl { url: String, reason: String },
}
