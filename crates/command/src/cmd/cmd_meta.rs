use std::fmt;
use std::time::Duration;

use crate::permission::PermissionSpec;

use super::declaration::Declaration;

pub const DEFAULT_DESCRIPTION: &str = "N/A";
pub const DEFAULT_CATEGORY: &str = "Miscellaneous";
pub const PREMIUM_CATEGORY: &str = "Premium";
pub const DEVELOPER_CATEGORY: &str = "Developer";

/// One declared argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
	pub name: String,
	pub optional: bool,
	pub default: Option<String>,
}

impl Argument {
	pub fn required(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			optional: false,
			default: None,
		}
	}

	pub fn optional(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			optional: true,
			default: None,
		}
	}

	pub fn with_default(mut self, default: impl Into<String>) -> Self {
		self.default = Some(default.into());
		self
	}

	/// `<name>`, `[name=default]` or `[name]`.
	pub fn usage(&self) -> String {
		if !self.optional {
			return format!("<{}>", self.name);
		}
		match self.default.as_deref() {
			Some(default) if !default.is_empty() => format!("[{}={}]", self.name, default),
			_ => format!("[{}]", self.name),
		}
	}
}

/// Usage string for an argument list, e.g. `<user> [reason=none]`.
pub fn usage_of(arguments: &[Argument]) -> String {
	arguments
		.iter()
		.map(Argument::usage)
		.collect::<Vec<_>>()
		.join(" ")
}

/// Slash-command related settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlashOptions {
	pub enabled: bool,
	pub only: bool,
	pub defer: bool,
	pub ephemeral: bool,
	pub args: Option<Vec<Argument>>,
	pub guilds: Vec<u64>,
}

/// Canonical metadata for a registered command or application.
///
/// Built once from a [`Declaration`]; `usage`, `premium` and
/// `developer_only` are derived at construction and never change.
#[derive(Debug, Clone)]
pub struct ExecutableMeta {
	pub name: String,
	pub description: String,
	pub full_description: String,
	pub category: String,
	pub hidden: bool,
	pub free_to_use: bool,
	pub cooldown: Duration,
	pub examples: Vec<String>,
	pub arguments: Vec<Argument>,
	pub usage: String,
	pub slash: SlashOptions,
	pub dm_allowed: bool,
	pub bypass_channel_perms: bool,
	pub premium_bypass_channel_perms: bool,
	pub aliases: Vec<String>,
	pub permissions: PermissionSpec,
	pub premium: bool,
	pub developer_only: bool,
}

impl ExecutableMeta {
	/// Normalize a declaration. Never fails; absent fields take their defaults.
	pub fn from_declaration<D: Declaration + ?Sized>(decl: &D, name: String) -> Self {
		let description = decl
			.description()
			.unwrap_or(DEFAULT_DESCRIPTION)
			.to_string();
		let full_description = decl
			.full_description()
			.map_or_else(|| description.clone(), str::to_string);
		let category = decl.category().unwrap_or(DEFAULT_CATEGORY).to_string();
		let permissions = decl.permissions();
		let arguments = decl.arguments();

		let premium = permissions.premium || category == PREMIUM_CATEGORY;
		let developer_only =
			permissions.developer_only || category == DEVELOPER_CATEGORY || decl.developer_only();

		Self {
			name,
			description,
			full_description,
			hidden: decl.hidden().unwrap_or(category == DEVELOPER_CATEGORY),
			free_to_use: decl.free_to_use(),
			cooldown: Duration::from_secs(decl.cooldown()),
			examples: decl.examples(),
			usage: usage_of(&arguments),
			arguments,
			slash: SlashOptions {
				enabled: false,
				only: false,
				defer: decl.slash_defer(),
				ephemeral: decl.slash_ephemeral(),
				args: decl.slash_args(),
				guilds: decl.slash_guilds(),
			},
			dm_allowed: decl.dm_allowed(),
			bypass_channel_perms: decl.bypass_channel_perms(),
			premium_bypass_channel_perms: decl.premium_bypass_channel_perms(),
			aliases: decl.aliases(),
			category,
			permissions,
			premium,
			developer_only,
		}
	}
}

impl fmt::Display for ExecutableMeta {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}
