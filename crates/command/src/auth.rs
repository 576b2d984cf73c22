//! The permission decision procedure.
//!
//! Checks run in a fixed order and the first conclusive one wins:
//!
//! ```text
//! owner bypass -> developer gate -> premium gate
//!     -> [guild only] role exceptions -> hierarchy role -> native perms -> role list
//!     -> predicates
//! ```
//!
//! Earlier steps short-circuit before later ones run, so cheap checks (owner,
//! exceptions) save the collaborator round-trips of the expensive ones.

use std::sync::Arc;

use config::AuthConfig;
use config::Release;
use tracing::debug;
use tracing::warn;
use url::Url;

use crate::actor::Actor;
use crate::actor::Guild;
use crate::actor::Permissions;
use crate::cmd::ExecutableMeta;
use crate::error::AuthFailure;
use crate::error::EngineError;
use crate::error::GENERIC_DENIAL;
use crate::error::ServiceError;
use crate::permission::BloxlinkRole;
use crate::permission::PermissionSpec;
use crate::predicate::SharedPredicate;
use crate::services::GuildSettings;
use crate::services::MAGIC_ROLES_KEY;
use crate::services::MagicRoleResolver;
use crate::services::MagicRoles;
use crate::services::PremiumService;

pub const DEVELOPER_ONLY_DENIAL: &str = "This command is reserved for the Bloxlink Developer.";
pub const MANAGE_SERVER_DENIAL: &str = "You need the `Manage Server` permission to run this command.";
pub const MODERATOR_DENIAL: &str = "You need the `Kick` or `Ban` permission to run this command.";
pub const UPDATER_DENIAL: &str = "You either need: a role called `Bloxlink Updater`, the `Manage Roles` \
	role permission, or the `Manage Server` role permission.";
pub const ADMIN_DENIAL: &str = "You need the `Administrator` role permission to run this command.";

/// Native permission name that requires `manage_guild` or `administrator`.
pub const MANAGE_SERVER_PERM: &str = "Manage Server";

/// Who is invoking, and where.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
	pub actor: &'a Actor,
	pub guild: Option<&'a Guild>,
	pub locale: &'a str,
	/// Direct-message invocation; guild-context checks are skipped.
	pub dm: bool,
}

impl<'a> CheckContext<'a> {
	pub fn in_guild(actor: &'a Actor, guild: &'a Guild) -> Self {
		Self {
			actor,
			guild: Some(guild),
			locale: "en",
			dm: false,
		}
	}

	pub fn direct_message(actor: &'a Actor) -> Self {
		Self {
			actor,
			guild: None,
			locale: "en",
			dm: true,
		}
	}

	pub fn with_locale(mut self, locale: &'a str) -> Self {
		self.locale = locale;
		self
	}
}

/// Per-call replacements for the descriptor's premium settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
	pub premium: Option<bool>,
	pub free_to_use: Option<bool>,
}

/// Collaborators consulted during a check.
#[derive(Clone)]
pub struct Services {
	pub premium: Arc<dyn PremiumService>,
	pub settings: Arc<dyn GuildSettings>,
	pub magic_roles: Arc<dyn MagicRoleResolver>,
}

/// Internal rejection; message-less denials are normalized on the way out.
#[derive(Debug)]
enum Rejection {
	Denied(Option<String>),
	Notice(String),
	Internal(ServiceError),
}

impl Rejection {
	fn denied(message: impl Into<String>) -> Self {
		Rejection::Denied(Some(message.into()))
	}
}

impl From<ServiceError> for Rejection {
	fn from(e: ServiceError) -> Self {
		Rejection::Internal(e)
	}
}

enum Flow {
	Granted,
	Continue,
}

pub struct AuthorizationEngine {
	owner_id: u64,
	release: Release,
	dashboard_url: Url,
	services: Services,
}

impl AuthorizationEngine {
	pub fn new(config: &AuthConfig, services: Services) -> Result<Self, EngineError> {
		let invalid = |reason: String| EngineError::InvalidDashboardUrl {
			url: config.dashboard_url.clone(),
			reason,
		};
		let dashboard_url = Url::parse(&config.dashboard_url).map_err(|e| invalid(e.to_string()))?;
		if dashboard_url.cannot_be_a_base() {
			return Err(invalid("not a base url".to_string()));
		}

		Ok(Self {
			owner_id: config.owner_id,
			release: config.release,
			dashboard_url,
			services,
		})
	}

	pub fn owner_id(&self) -> u64 {
		self.owner_id
	}

	pub fn release(&self) -> Release {
		self.release
	}

	/// Decide whether `ctx.actor` may run the command described by `meta`.
	///
	/// `spec` replaces the descriptor's own rules when given. Collaborator
	/// failures come back as [`AuthFailure::Internal`], never as a denial.
	pub async fn check_permissions(
		&self,
		meta: &ExecutableMeta,
		ctx: &CheckContext<'_>,
		spec: Option<&PermissionSpec>,
		overrides: Overrides,
	) -> Result<(), AuthFailure> {
		let spec = spec.unwrap_or(&meta.permissions);

		match self.evaluate(meta, ctx, spec, overrides).await {
			Ok(()) => Ok(()),
			Err(Rejection::Denied(message)) => {
				let message = message.unwrap_or_else(|| GENERIC_DENIAL.to_string());
				debug!(
					command = %meta.name,
					actor = ctx.actor.id,
					reason = %message,
					"permission denied"
				);
				Err(AuthFailure::Denied(message))
			}
			Err(Rejection::Notice(message)) => Err(AuthFailure::Notice(message)),
			Err(Rejection::Internal(e)) => {
				warn!(command = %meta.name, actor = ctx.actor.id, error = %e, "permission check failed");
				Err(AuthFailure::Internal(e))
			}
		}
	}

	async fn evaluate(
		&self,
		meta: &ExecutableMeta,
		ctx: &CheckContext<'_>,
		spec: &PermissionSpec,
		overrides: Overrides,
	) -> Result<(), Rejection> {
		let actor = ctx.actor;

		if !self.release.is_local() && actor.id == self.owner_id {
			debug!(command = %meta.name, actor = actor.id, "owner bypass");
			return Ok(());
		}

		if (spec.developer_only || meta.developer_only) && actor.id != self.owner_id {
			return Err(Rejection::denied(DEVELOPER_ONLY_DENIAL));
		}

		self.check_premium(meta, ctx, spec, overrides).await?;

		if !ctx.dm {
			if let Flow::Granted = self.check_guild_context(ctx, spec).await? {
				return Ok(());
			}
		}

		check_predicates(actor, &spec.allowed.functions).await
	}

	async fn check_premium(
		&self,
		meta: &ExecutableMeta,
		ctx: &CheckContext<'_>,
		spec: &PermissionSpec,
		overrides: Overrides,
	) -> Result<(), Rejection> {
		let premium = overrides.premium.unwrap_or(meta.premium) || spec.premium;
		let free_to_use = overrides.free_to_use.unwrap_or(meta.free_to_use);
		if !premium || free_to_use {
			return Ok(());
		}

		let status = self.services.premium.has_premium(ctx.guild).await?;
		if status.is_premium() {
			return Ok(());
		}

		Err(Rejection::Notice(format!(
			"This command is reserved for Bloxlink Premium subscribers!\n\
			 You may subscribe to Bloxlink Premium from our dashboard: <{}>",
			self.premium_url(ctx.guild)
		)))
	}

	/// Dashboard page where `guild` can subscribe, or the dashboard root.
	pub fn premium_url(&self, guild: Option<&Guild>) -> Url {
		let mut url = self.dashboard_url.clone();
		if let Some(guild) = guild {
			// Checked in `new`: the dashboard url can be a base.
			let guild_id = guild.id.to_string();
			if let Ok(mut segments) = url.path_segments_mut() {
				segments
					.pop_if_empty()
					.extend(["guilds", guild_id.as_str(), "premium"]);
			}
		}
		url
	}

	async fn check_guild_context(
		&self,
		ctx: &CheckContext<'_>,
		spec: &PermissionSpec,
	) -> Result<Flow, Rejection> {
		let actor = ctx.actor;
		let perms = &actor.permissions;

		if let Some(role) = actor
			.roles
			.iter()
			.find(|r| spec.exceptions.roles.contains(&r.name))
		{
			debug!(actor = actor.id, role = %role.name, "role exception bypass");
			return Ok(Flow::Granted);
		}

		if let Some(required) = spec.bloxlink_role {
			let magic_roles = self.magic_roles(ctx.guild).await?;
			if self
				.has_magic_role(ctx, BloxlinkRole::Admin, &magic_roles)
				.await?
			{
				debug!(actor = actor.id, "magic admin bypass");
				return Ok(Flow::Granted);
			}
			self.check_hierarchy(ctx, required, &magic_roles).await?;
		}

		for perm in &spec.allowed.discord_perms {
			if perm == MANAGE_SERVER_PERM {
				if !(perms.manage_guild() || perms.administrator()) {
					return Err(Rejection::denied(MANAGE_SERVER_DENIAL));
				}
			} else if perm != Permissions::ADMINISTRATOR && !perms.has(perm) {
				return Err(Rejection::denied(format!("Missing permission: {perm}")));
			}
		}

		for role in &spec.allowed.roles {
			if !actor.has_role_named(role) {
				return Err(Rejection::denied(format!("Missing role: {role}")));
			}
		}

		Ok(Flow::Continue)
	}

	async fn check_hierarchy(
		&self,
		ctx: &CheckContext<'_>,
		required: BloxlinkRole,
		magic_roles: &MagicRoles,
	) -> Result<(), Rejection> {
		let perms = &ctx.actor.permissions;

		let (allowed, denial) = match required {
			BloxlinkRole::Manager => (
				perms.manage_guild() || perms.administrator(),
				MANAGE_SERVER_DENIAL,
			),
			BloxlinkRole::Moderator => (
				perms.kick_members() || perms.ban_members() || perms.administrator(),
				MODERATOR_DENIAL,
			),
			BloxlinkRole::Updater => (
				perms.manage_guild()
					|| perms.administrator()
					|| perms.manage_roles()
					|| self
						.has_magic_role(ctx, BloxlinkRole::Updater, magic_roles)
						.await?,
				UPDATER_DENIAL,
			),
			BloxlinkRole::Admin => (perms.administrator(), ADMIN_DENIAL),
		};

		if allowed {
			Ok(())
		} else {
			Err(Rejection::denied(denial))
		}
	}

	async fn magic_roles(&self, guild: Option<&Guild>) -> Result<MagicRoles, ServiceError> {
		let Some(guild) = guild else {
			return Ok(MagicRoles::default());
		};
		match self
			.services
			.settings
			.get_guild_value(guild, MAGIC_ROLES_KEY)
			.await?
		{
			Some(value) => MagicRoles::from_value(value),
			None => Ok(MagicRoles::default()),
		}
	}

	async fn has_magic_role(
		&self,
		ctx: &CheckContext<'_>,
		role: BloxlinkRole,
		magic_roles: &MagicRoles,
	) -> Result<bool, ServiceError> {
		self.services
			.magic_roles
			.has_magic_role(ctx.actor, ctx.guild, role, magic_roles)
			.await
	}
}

async fn check_predicates(actor: &Actor, predicates: &[SharedPredicate]) -> Result<(), Rejection> {
	for predicate in predicates {
		let outcome = predicate.evaluate(actor).await;
		if !outcome.ok {
			return Err(Rejection::Denied(outcome.message));
		}
	}
	Ok(())
}
