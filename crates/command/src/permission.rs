//! Declarative access rules attached to a command.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::actor::Actor;
use crate::predicate;
use crate::predicate::PredicateOutcome;
use crate::predicate::SharedPredicate;

/// Fixed hierarchy of administrative roles a command can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BloxlinkRole {
	Manager,
	Moderator,
	Updater,
	Admin,
}

impl BloxlinkRole {
	pub fn as_str(self) -> &'static str {
		match self {
			BloxlinkRole::Manager => "Bloxlink Manager",
			BloxlinkRole::Moderator => "Bloxlink Moderator",
			BloxlinkRole::Updater => "Bloxlink Updater",
			BloxlinkRole::Admin => "Bloxlink Admin",
		}
	}
}

impl fmt::Display for BloxlinkRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for BloxlinkRole {
	type Err = String;

	/// Accepts both the display name ("Bloxlink Admin") and the bare level ("Admin").
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lower = s.to_lowercase();
		match lower.strip_prefix("bloxlink ").unwrap_or(&lower) {
			"manager" => Ok(BloxlinkRole::Manager),
			"moderator" => Ok(BloxlinkRole::Moderator),
			"updater" => Ok(BloxlinkRole::Updater),
			"admin" => Ok(BloxlinkRole::Admin),
			_ => Err(format!("unknown Bloxlink role '{s}'")),
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct Exceptions {
	/// Holding any of these role names bypasses every remaining check.
	pub roles: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Allowed {
	/// Every listed role name must be held.
	pub roles: Vec<String>,
	/// Every listed native permission name must be held.
	pub discord_perms: Vec<String>,
	/// Every predicate must pass, evaluated in order.
	pub functions: Vec<SharedPredicate>,
}

/// Access rules for a command. Immutable once the command is registered.
#[derive(Debug, Clone, Default)]
pub struct PermissionSpec {
	pub developer_only: bool,
	pub premium: bool,
	pub exceptions: Exceptions,
	pub bloxlink_role: Option<BloxlinkRole>,
	pub allowed: Allowed,
}

impl PermissionSpec {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn developer_only(mut self) -> Self {
		self.developer_only = true;
		self
	}

	pub fn premium(mut self) -> Self {
		self.premium = true;
		self
	}

	pub fn exception_role(mut self, name: impl Into<String>) -> Self {
		self.exceptions.roles.insert(name.into());
		self
	}

	pub fn bloxlink_role(mut self, role: BloxlinkRole) -> Self {
		self.bloxlink_role = Some(role);
		self
	}

	pub fn allow_role(mut self, name: impl Into<String>) -> Self {
		let name = name.into();
		if !self.allowed.roles.contains(&name) {
			self.allowed.roles.push(name);
		}
		self
	}

	pub fn allow_discord_perm(mut self, name: impl Into<String>) -> Self {
		self.allowed.discord_perms.push(name.into());
		self
	}

	pub fn allow_function(mut self, predicate: SharedPredicate) -> Self {
		self.allowed.functions.push(predicate);
		self
	}

	/// Shorthand for [`allow_function`](Self::allow_function) with a sync closure.
	pub fn check<F, O>(self, f: F) -> Self
	where
		F: Fn(&Actor) -> O + Send + Sync + 'static,
		O: Into<PredicateOutcome> + 'static,
	{
		self.allow_function(predicate::from_fn(f))
	}

	/// True when no role, permission, predicate or hierarchy rule is set.
	pub fn is_open(&self) -> bool {
		self.bloxlink_role.is_none()
			&& self.allowed.roles.is_empty()
			&& self.allowed.discord_perms.is_empty()
			&& self.allowed.functions.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("Bloxlink Manager", BloxlinkRole::Manager)]
	#[case("Moderator", BloxlinkRole::Moderator)]
	#[case("bloxlink updater", BloxlinkRole::Updater)]
	#[case("Bloxlink Admin", BloxlinkRole::Admin)]
	fn test_role_from_str(#[case] input: &str, #[case] expected: BloxlinkRole) {
		assert_eq!(input.parse::<BloxlinkRole>().unwrap(), expected);
	}

	#[test]
	fn test_role_display_roundtrip() {
		for role in [
			BloxlinkRole::Manager,
			BloxlinkRole::Moderator,
			BloxlinkRole::Updater,
			BloxlinkRole::Admin,
		] {
			assert_eq!(role.to_string().parse::<BloxlinkRole>().unwrap(), role);
		}
	}

	#[test]
	fn test_builder() {
		let spec = PermissionSpec::new()
			.premium()
			.exception_role("Bypass")
			.allow_role("Staff")
			.allow_role("Staff")
			.allow_discord_perm("Manage Server")
			.check(|actor: &Actor| actor.id != 0);

		assert!(spec.premium);
		assert!(!spec.developer_only);
		assert!(spec.exceptions.roles.contains("Bypass"));
		assert_eq!(spec.allowed.roles, vec!["Staff".to_string()]);
		assert_eq!(spec.allowed.discord_perms, vec!["Manage Server".to_string()]);
		assert_eq!(spec.allowed.functions.len(), 1);
		assert!(!spec.is_open());
	}

	#[test]
	fn test_open_spec() {
		assert!(PermissionSpec::new().is_open());
		// Premium and exceptions gate nothing by themselves.
		assert!(PermissionSpec::new().premium().exception_role("x").is_open());
		assert!(!PermissionSpec::new().bloxlink_role(BloxlinkRole::Admin).is_open());
	}
}
