use std::sync::Arc;

use dashmap::DashMap;

use super::Application;
use super::Command;
use super::Executable;

/// Process-wide registry of commands and applications.
///
/// Entries are created once at registration and shared read-only
/// afterwards. Command lookups are case-insensitive and resolve aliases.
#[derive(Default)]
pub struct CmdTable {
	commands: DashMap<String, Arc<Command>>,
	aliases: DashMap<String, String>,
	applications: DashMap<String, Arc<Application>>,
}

impl CmdTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&self, cmd: Command) -> Arc<Command> {
		let name = cmd.name().to_lowercase();
		let cmd = Arc::new(cmd);

		self.aliases.retain(|_, target| *target != name);
		for alias in &cmd.meta().aliases {
			self.aliases.insert(alias.to_lowercase(), name.clone());
		}
		if self.commands.insert(name.clone(), cmd.clone()).is_some() {
			tracing::warn!(command = %name, "command registered twice, replacing previous entry");
		} else {
			tracing::debug!(command = %name, category = %cmd.meta().category, "registered command");
		}
		cmd
	}

	pub fn register_application(&self, app: Application) -> Arc<Application> {
		let name = app.name().to_string();
		let app = Arc::new(app);
		if self.applications.insert(name.clone(), app.clone()).is_some() {
			tracing::warn!(application = %name, "application registered twice, replacing previous entry");
		}
		app
	}

	/// Look up a command by name or alias.
	pub fn get_cmd(&self, name: &str) -> Option<Arc<Command>> {
		let name = name.to_lowercase();
		if let Some(cmd) = self.commands.get(&name) {
			return Some(cmd.clone());
		}
		let target = self.aliases.get(&name)?.clone();
		self.commands.get(&target).map(|cmd| cmd.clone())
	}

	pub fn get_application(&self, name: &str) -> Option<Arc<Application>> {
		self.applications.get(name).map(|app| app.clone())
	}

	/// Non-hidden commands sorted by name, for help listings.
	pub fn visible_commands(&self) -> Vec<Arc<Command>> {
		let mut visible: Vec<_> = self
			.commands
			.iter()
			.filter(|entry| !entry.meta().hidden)
			.map(|entry| entry.value().clone())
			.collect();
		visible.sort_by(|a, b| a.name().cmp(b.name()));
		visible
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}
}
