//! Declaration traits implemented by bot commands and applications.
//!
//! Every method has a default, so a declaration only overrides what it
//! actually sets:
//!
//! ```
//! use command::cmd::{Argument, CommandDeclaration, Declaration};
//!
//! struct KickCommand;
//!
//! impl Declaration for KickCommand {
//!     fn description(&self) -> Option<&str> {
//!         Some("Kick a member from the server")
//!     }
//!
//!     fn arguments(&self) -> Vec<Argument> {
//!         vec![Argument::required("user"), Argument::optional("reason")]
//!     }
//! }
//!
//! impl CommandDeclaration for KickCommand {}
//! ```

use crate::permission::PermissionSpec;

use super::cmd_meta::Argument;

/// Length of the `Command` suffix carried by command type names.
pub const COMMAND_SUFFIX_LEN: usize = 7;

pub trait Declaration: Send + Sync {
	/// Short description; defaults to "N/A".
	fn description(&self) -> Option<&str> {
		None
	}

	/// Long description; defaults to the short one.
	fn full_description(&self) -> Option<&str> {
		None
	}

	fn permissions(&self) -> PermissionSpec {
		PermissionSpec::default()
	}

	fn arguments(&self) -> Vec<Argument> {
		Vec::new()
	}

	/// Help category; defaults to "Miscellaneous".
	fn category(&self) -> Option<&str> {
		None
	}

	fn examples(&self) -> Vec<String> {
		Vec::new()
	}

	/// Hide from help listings; defaults to true only for the Developer category.
	fn hidden(&self) -> Option<bool> {
		None
	}

	fn free_to_use(&self) -> bool {
		false
	}

	/// Cooldown in seconds.
	fn cooldown(&self) -> u64 {
		0
	}

	fn developer_only(&self) -> bool {
		false
	}

	fn slash_defer(&self) -> bool {
		false
	}

	fn slash_ephemeral(&self) -> bool {
		false
	}

	fn slash_args(&self) -> Option<Vec<Argument>> {
		None
	}

	fn slash_guilds(&self) -> Vec<u64> {
		Vec::new()
	}

	fn dm_allowed(&self) -> bool {
		false
	}

	fn bypass_channel_perms(&self) -> bool {
		false
	}

	fn premium_bypass_channel_perms(&self) -> bool {
		false
	}

	fn aliases(&self) -> Vec<String> {
		Vec::new()
	}
}

/// A text/slash command, named after its type (`KickCommand` -> `kick`).
pub trait CommandDeclaration: Declaration {
	fn type_name(&self) -> &'static str
	where
		Self: Sized,
	{
		short_type_name(std::any::type_name::<Self>())
	}

	fn slash_enabled(&self) -> bool {
		false
	}

	fn slash_only(&self) -> bool {
		false
	}

	fn auto_complete(&self) -> bool {
		false
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationKind {
	/// Context-menu entry on a user.
	User,
	/// Context-menu entry on a message.
	Message,
}

/// A context-menu application, named explicitly.
pub trait ApplicationDeclaration: Declaration {
	fn name(&self) -> &str;

	fn kind(&self) -> ApplicationKind;
}

/// Last path segment of a type name, without generic parameters.
pub fn short_type_name(full: &'static str) -> &'static str {
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}

/// Strip the fixed `Command` suffix length and lower-case the rest.
pub fn command_name_from_type(type_name: &str) -> String {
	let keep = type_name.chars().count().saturating_sub(COMMAND_SUFFIX_LEN);
	type_name.chars().take(keep).collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("VerifyCommand", "verify")]
	#[case("GetRoleCommand", "getrole")]
	#[case("Command", "")]
	#[case("Ping", "")]
	fn test_command_name_from_type(#[case] type_name: &str, #[case] expected: &str) {
		assert_eq!(command_name_from_type(type_name), expected);
	}

	#[rstest]
	#[case("my_bot::commands::VerifyCommand", "VerifyCommand")]
	#[case("VerifyCommand", "VerifyCommand")]
	#[case("a::Wrapper<b::Inner>", "Wrapper")]
	fn test_short_type_name(#[case] full: &'static str, #[case] expected: &str) {
		assert_eq!(short_type_name(full), expected);
	}
}
