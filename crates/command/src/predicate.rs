//! Custom permission predicates.
//!
//! A predicate inspects the invoking [`Actor`] and answers pass/fail, with an
//! optional message for failures. Synchronous closures and async closures are
//! both adapted to the one async [`Predicate`] trait so the engine calls them
//! the same way.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::actor::Actor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateOutcome {
	pub ok: bool,
	pub message: Option<String>,
}

impl PredicateOutcome {
	pub fn pass() -> Self {
		Self {
			ok: true,
			message: None,
		}
	}

	pub fn fail() -> Self {
		Self {
			ok: false,
			message: None,
		}
	}

	pub fn fail_with(message: impl Into<String>) -> Self {
		Self {
			ok: false,
			message: Some(message.into()),
		}
	}
}

impl From<bool> for PredicateOutcome {
	fn from(ok: bool) -> Self {
		Self { ok, message: None }
	}
}

impl From<(bool, &str)> for PredicateOutcome {
	fn from((ok, message): (bool, &str)) -> Self {
		Self {
			ok,
			message: Some(message.to_string()),
		}
	}
}

impl From<(bool, String)> for PredicateOutcome {
	fn from((ok, message): (bool, String)) -> Self {
		Self {
			ok,
			message: Some(message),
		}
	}
}

#[async_trait]
pub trait Predicate: Send + Sync {
	async fn evaluate(&self, actor: &Actor) -> PredicateOutcome;
}

pub type SharedPredicate = Arc<dyn Predicate>;

/// Adapter for synchronous closures.
pub struct FnPredicate<F>(F);

#[async_trait]
impl<F, O> Predicate for FnPredicate<F>
where
	F: Fn(&Actor) -> O + Send + Sync,
	O: Into<PredicateOutcome>,
{
	async fn evaluate(&self, actor: &Actor) -> PredicateOutcome {
		(self.0)(actor).into()
	}
}

/// Adapter for closures returning a future. The actor is cloned into the
/// call so the future does not borrow from the engine.
pub struct AsyncFnPredicate<F>(F);

#[async_trait]
impl<F, Fut, O> Predicate for AsyncFnPredicate<F>
where
	F: Fn(Actor) -> Fut + Send + Sync,
	Fut: Future<Output = O> + Send,
	O: Into<PredicateOutcome>,
{
	async fn evaluate(&self, actor: &Actor) -> PredicateOutcome {
		(self.0)(actor.clone()).await.into()
	}
}

pub fn from_fn<F, O>(f: F) -> SharedPredicate
where
	F: Fn(&Actor) -> O + Send + Sync + 'static,
	O: Into<PredicateOutcome> + 'static,
{
	Arc::new(FnPredicate(f))
}

pub fn from_async_fn<F, Fut, O>(f: F) -> SharedPredicate
where
	F: Fn(Actor) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = O> + Send + 'static,
	O: Into<PredicateOutcome> + 'static,
{
	Arc::new(AsyncFnPredicate(f))
}

impl fmt::Debug for dyn Predicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Predicate")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_sync_bool_predicate() {
		let p = from_fn(|actor: &Actor| actor.id == 7);
		assert_eq!(p.evaluate(&Actor::new(7)).await, PredicateOutcome::pass());
		assert_eq!(p.evaluate(&Actor::new(8)).await, PredicateOutcome::fail());
	}

	#[tokio::test]
	async fn test_sync_tuple_predicate() {
		let p = from_fn(|_: &Actor| (false, "not verified"));
		assert_eq!(
			p.evaluate(&Actor::new(1)).await,
			PredicateOutcome::fail_with("not verified")
		);
	}

	#[tokio::test]
	async fn test_async_predicate() {
		let p = from_async_fn(|actor: Actor| async move {
			(actor.id > 10, format!("id {} too low", actor.id))
		});
		let outcome = p.evaluate(&Actor::new(3)).await;
		assert!(!outcome.ok);
		assert_eq!(outcome.message.as_deref(), Some("id 3 too low"));
		assert!(p.evaluate(&Actor::new(11)).await.ok);
	}
}
