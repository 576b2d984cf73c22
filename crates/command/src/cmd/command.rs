use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::redirect;
use crate::redirect::CommandArgs;
use crate::redirect::Dispatcher;
use crate::redirect::RedirectOptions;

use super::Executable;
use super::ExecutableMeta;
use super::declaration::CommandDeclaration;
use super::declaration::command_name_from_type;

/// A registered text/slash command.
#[derive(Debug, Clone)]
pub struct Command {
	meta: ExecutableMeta,
	subcommands: HashMap<String, Arc<Command>>,
	auto_complete: bool,
}

impl Command {
	pub fn new<D: CommandDeclaration>(decl: &D) -> Self {
		let name = command_name_from_type(decl.type_name());
		let mut meta = ExecutableMeta::from_declaration(decl, name);
		meta.slash.enabled = decl.slash_enabled();
		meta.slash.only = decl.slash_only();

		Self {
			meta,
			subcommands: HashMap::new(),
			auto_complete: decl.auto_complete(),
		}
	}

	pub fn with_subcommand(mut self, subcommand: Command) -> Self {
		self.subcommands
			.insert(subcommand.meta.name.clone(), Arc::new(subcommand));
		self
	}

	pub fn subcommand(&self, name: &str) -> Option<&Arc<Command>> {
		self.subcommands.get(&name.to_lowercase())
	}

	pub fn subcommands(&self) -> impl Iterator<Item = &Arc<Command>> {
		self.subcommands.values()
	}

	pub fn auto_complete(&self) -> bool {
		self.auto_complete
	}

	/// Hand the current invocation over to `new_command_name`.
	///
	/// See [`redirect::redirect`] for the forwarding rules.
	pub async fn redirect(
		&self,
		dispatcher: &dyn Dispatcher,
		args: &CommandArgs,
		new_command_name: &str,
		options: RedirectOptions,
	) -> Result<(), DispatchError> {
		tracing::debug!(from = %self.meta.name, to = new_command_name, "redirecting command");
		redirect::redirect(dispatcher, args, new_command_name, options).await
	}
}

impl Executable for Command {
	fn meta(&self) -> &ExecutableMeta {
		&self.meta
	}
}

impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.meta.name)
	}
}
