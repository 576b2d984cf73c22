//! Forwarding an authorized invocation to another command.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::actor::Actor;
use crate::actor::ChannelId;
use crate::actor::Guild;
use crate::auth::CheckContext;
use crate::error::DispatchError;

/// Dispatcher namespace holding regular commands.
pub const COMMANDS_NAMESPACE: &str = "commands";

pub type Arguments = HashMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
	pub id: u64,
	pub channel_id: ChannelId,
	pub token: String,
}

/// Handle used to reply to an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHandle {
	pub interaction_id: u64,
	pub deferred: bool,
}

/// Everything a running command knows about its own invocation.
#[derive(Debug, Clone)]
pub struct CommandArgs {
	pub interaction: Interaction,
	pub response: ResponseHandle,
	pub actor: Actor,
	pub guild: Option<Guild>,
	pub locale: String,
}

impl CommandArgs {
	pub fn check_context(&self) -> CheckContext<'_> {
		CheckContext {
			actor: &self.actor,
			guild: self.guild.as_ref(),
			locale: &self.locale,
			dm: self.guild.is_none(),
		}
	}
}

/// Request handed to the dispatcher for a forwarded command.
#[derive(Debug, Clone)]
pub struct ForwardedInvocation {
	pub channel_id: ChannelId,
	pub response: ResponseHandle,
	pub interaction: Interaction,
	pub subcommand: Option<String>,
	pub arguments: Option<Arguments>,
	pub command_args: CommandArgs,
	/// Set on every redirect so the dispatcher skips first-hop-only rules
	/// such as channel-permission bypasses.
	pub forwarded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RedirectOptions {
	pub arguments: Option<Arguments>,
	pub new_channel: Option<ChannelId>,
}

#[async_trait]
pub trait Dispatcher: Send + Sync {
	async fn execute_interaction_command(
		&self,
		namespace: &str,
		command_name: &str,
		invocation: ForwardedInvocation,
	) -> Result<(), DispatchError>;
}

/// Run `new_command_name` with the current interaction and response handles.
///
/// A [`DispatchError::Cancelled`] raised downstream is absorbed and reported
/// as success; every other dispatch error is returned.
pub async fn redirect(
	dispatcher: &dyn Dispatcher,
	args: &CommandArgs,
	new_command_name: &str,
	options: RedirectOptions,
) -> Result<(), DispatchError> {
	let invocation = ForwardedInvocation {
		channel_id: options
			.new_channel
			.unwrap_or(args.interaction.channel_id),
		response: args.response.clone(),
		interaction: args.interaction.clone(),
		subcommand: None,
		arguments: options.arguments,
		command_args: args.clone(),
		forwarded: true,
	};

	match dispatcher
		.execute_interaction_command(COMMANDS_NAMESPACE, new_command_name, invocation)
		.await
	{
		Err(DispatchError::Cancelled) => {
			tracing::debug!(command = new_command_name, "forwarded invocation cancelled");
			Ok(())
		}
		result => result,
	}
}
