//! Platform value types read by the permission engine.
//!
//! These mirror what the chat platform client hands the dispatcher: the
//! invoking member, the roles they hold and their resolved guild-level
//! permission names.

use std::collections::BTreeSet;

pub type UserId = u64;
pub type RoleId = u64;
pub type GuildId = u64;
pub type ChannelId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role {
	pub id: RoleId,
	pub name: String,
}

impl Role {
	pub fn new(id: RoleId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}
}

/// Native permission names granted to a member in a guild.
///
/// Names are matched exactly. The well-known names used by the hierarchy
/// ladder are exposed as constants and typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
	granted: BTreeSet<String>,
}

impl Permissions {
	pub const ADMINISTRATOR: &'static str = "administrator";
	pub const MANAGE_GUILD: &'static str = "manage_guild";
	pub const KICK_MEMBERS: &'static str = "kick_members";
	pub const BAN_MEMBERS: &'static str = "ban_members";
	pub const MANAGE_ROLES: &'static str = "manage_roles";

	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, name: impl Into<String>) -> Self {
		self.insert(name);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>) {
		self.granted.insert(name.into());
	}

	pub fn has(&self, name: &str) -> bool {
		self.granted.contains(name)
	}

	pub fn administrator(&self) -> bool {
		self.has(Self::ADMINISTRATOR)
	}

	pub fn manage_guild(&self) -> bool {
		self.has(Self::MANAGE_GUILD)
	}

	pub fn kick_members(&self) -> bool {
		self.has(Self::KICK_MEMBERS)
	}

	pub fn ban_members(&self) -> bool {
		self.has(Self::BAN_MEMBERS)
	}

	pub fn manage_roles(&self) -> bool {
		self.has(Self::MANAGE_ROLES)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.granted.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for Permissions {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self {
			granted: iter.into_iter().map(Into::into).collect(),
		}
	}
}

/// The member invoking a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
	pub id: UserId,
	pub roles: Vec<Role>,
	pub permissions: Permissions,
}

impl Actor {
	pub fn new(id: UserId) -> Self {
		Self {
			id,
			roles: Vec::new(),
			permissions: Permissions::default(),
		}
	}

	pub fn with_role(mut self, role: Role) -> Self {
		self.roles.push(role);
		self
	}

	pub fn with_permissions(mut self, permissions: Permissions) -> Self {
		self.permissions = permissions;
		self
	}

	pub fn has_role_named(&self, name: &str) -> bool {
		self.roles.iter().any(|r| r.name == name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
	pub id: GuildId,
	pub name: String,
}

impl Guild {
	pub fn new(id: GuildId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}
}
