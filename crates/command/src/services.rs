//! Interfaces to the services the engine consults while checking a command.
//!
//! Implementations live in the bot process (HTTP clients, caches); the engine
//! only sees these traits, injected at construction.

use std::collections::HashMap;
use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::actor::Actor;
use crate::actor::Guild;
use crate::error::ServiceError;
use crate::permission::BloxlinkRole;

/// Guild setting holding the magic-role mapping.
pub const MAGIC_ROLES_KEY: &str = "magicRoles";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PremiumStatus {
	pub features: HashSet<String>,
}

impl PremiumStatus {
	pub const PREMIUM_FEATURE: &'static str = "premium";

	pub fn with_features<I, S>(features: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			features: features.into_iter().map(Into::into).collect(),
		}
	}

	pub fn is_premium(&self) -> bool {
		self.features.contains(Self::PREMIUM_FEATURE)
	}
}

#[async_trait]
pub trait PremiumService: Send + Sync {
	/// Subscription status of `guild`; `None` for direct messages.
	async fn has_premium(&self, guild: Option<&Guild>) -> Result<PremiumStatus, ServiceError>;
}

#[async_trait]
pub trait GuildSettings: Send + Sync {
	/// Raw stored value for `key`, or `None` when the guild never set it.
	async fn get_guild_value(
		&self,
		guild: &Guild,
		key: &str,
	) -> Result<Option<serde_json::Value>, ServiceError>;
}

/// Role ID (as stored, stringified) to the magic role names it carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MagicRoles(HashMap<String, Vec<String>>);

impl MagicRoles {
	pub fn from_value(value: serde_json::Value) -> Result<Self, ServiceError> {
		serde_json::from_value(value).map_err(|e| ServiceError::InvalidData {
			key: MAGIC_ROLES_KEY.to_string(),
			reason: e.to_string(),
		})
	}

	pub fn insert(&mut self, role_id: u64, magic_role: BloxlinkRole) {
		self.0
			.entry(role_id.to_string())
			.or_default()
			.push(magic_role.as_str().to_string());
	}

	/// Whether the native role `role_id` is mapped to `magic_role`.
	pub fn grants(&self, role_id: u64, magic_role: BloxlinkRole) -> bool {
		self.0
			.get(&role_id.to_string())
			.is_some_and(|names| names.iter().any(|n| n == magic_role.as_str()))
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[async_trait]
pub trait MagicRoleResolver: Send + Sync {
	async fn has_magic_role(
		&self,
		actor: &Actor,
		guild: Option<&Guild>,
		magic_role: BloxlinkRole,
		magic_roles: &MagicRoles,
	) -> Result<bool, ServiceError>;
}

/// Resolves magic roles from the actor's own roles: a role literally named
/// after the magic role, or a role the guild mapped to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleNameResolver;

#[async_trait]
impl MagicRoleResolver for RoleNameResolver {
	async fn has_magic_role(
		&self,
		actor: &Actor,
		_guild: Option<&Guild>,
		magic_role: BloxlinkRole,
		magic_roles: &MagicRoles,
	) -> Result<bool, ServiceError> {
		Ok(actor
			.roles
			.iter()
			.any(|role| role.name == magic_role.as_str() || magic_roles.grants(role.id, magic_role)))
	}
}
