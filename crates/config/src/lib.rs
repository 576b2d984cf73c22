//! Process configuration for the permission engine.
//!
//! The engine only needs a handful of values that are fixed at startup: the
//! owner's user ID, the release mode the process runs in, and the dashboard
//! URL premium notices point at. They can come from a TOML, JSON or YAML file
//! and be overridden from the command line.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use config::{AUTH_CONF, Cli, setup};
//!
//! #[derive(Parser)]
//! struct Args {
//!     #[command(flatten)]
//!     auth: Cli,
//! }
//!
//! let args = Args::parse();
//! setup(args.auth)?;
//!
//! let config = AUTH_CONF.load();
//! println!("owner: {}", config.owner_id);
//! # Ok::<(), config::ConfigError>(())
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::OnceLock;

use arc_swap::ArcSwap;
pub use clap::Args;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";
pub const DEFAULT_DASHBOARD_URL: &str = "https://blox.link/dashboard";

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to read configuration file '{path}': {source}")]
	Io {
		source: std::io::Error,
		path: String,
	},

	#[error("Failed to parse TOML configuration: {0}")]
	TomlParse(#[from] toml::de::Error),

	#[error("Failed to parse JSON configuration: {0}")]
	JsonParse(#[from] serde_json::Error),

	#[error("Failed to parse YAML configuration: {0}")]
	YamlParse(#[from] serde_yaml::Error),

	#[error("Unsupported configuration format: {0}")]
	UnsupportedFormat(String),

	#[error("Configuration file has no extension")]
	NoExtension,

	#[error(transparent)]
	Telemetry(#[from] telemetry::TelemetryError),
}

/// Deployment mode of the running process.
///
/// Only [`Release::Local`] changes engine behavior: the owner bypass is
/// disabled so developers see the same checks as everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Release {
	Local,
	Canary,
	#[default]
	Main,
	Pro,
}

impl Release {
	pub fn is_local(self) -> bool {
		self == Release::Local
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Release::Local => "LOCAL",
			Release::Canary => "CANARY",
			Release::Main => "MAIN",
			Release::Pro => "PRO",
		}
	}
}

impl fmt::Display for Release {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Release {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_uppercase().as_str() {
			"LOCAL" => Ok(Release::Local),
			"CANARY" => Ok(Release::Canary),
			"MAIN" => Ok(Release::Main),
			"PRO" => Ok(Release::Pro),
			_ => Err(format!("unknown release mode '{s}'")),
		}
	}
}

/// Command-line overrides, meant to be flattened into the host binary's
/// own parser.
#[derive(Args, Debug, Default, Clone)]
pub struct Cli {
	/// Configuration file path (TOML, JSON, or YAML).
	/// Defaults to conf/config.toml if it exists.
	#[arg(short, long)]
	pub config: Option<String>,

	/// User ID of the bot owner
	#[arg(long)]
	pub owner_id: Option<u64>,

	/// Release mode (LOCAL, CANARY, MAIN, PRO)
	#[arg(long)]
	pub release: Option<Release>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long)]
	pub log_level: Option<String>,

	/// Base URL of the web dashboard used in premium notices
	#[arg(long)]
	pub dashboard_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
	pub owner_id: u64,
	pub release: Release,
	pub dashboard_url: String,
	pub log_level: String,
}

impl AuthConfig {
	/// Change the log level and push it to the running logger.
	pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
		let level = telemetry::logger::normalize_level(level)?;
		telemetry::reload_log_level(&level)?;
		self.log_level = level;
		Ok(())
	}
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			owner_id: 0,
			release: Release::default(),
			dashboard_url: DEFAULT_DASHBOARD_URL.into(),
			log_level: "info".into(),
		}
	}
}

pub struct GlobalConfig {
	inner: OnceLock<ArcSwap<AuthConfig>>,
}

impl GlobalConfig {
	pub const fn new() -> Self {
		Self {
			inner: OnceLock::new(),
		}
	}

	pub fn init(&self, config: AuthConfig) {
		let _ = self.inner.set(ArcSwap::from_pointee(config));
	}

	pub fn is_initialized(&self) -> bool {
		self.inner.get().is_some()
	}

	pub fn load(&self) -> arc_swap::Guard<Arc<AuthConfig>> {
		self.inner.get().expect("Config is not initialized").load()
	}

	/// Update the configuration with a new one
	pub fn update(&self, new_config: AuthConfig) {
		self.inner
			.get()
			.expect("Config is not initialized")
			.store(Arc::new(new_config));
	}
}

impl Default for GlobalConfig {
	fn default() -> Self {
		Self::new()
	}
}

pub static AUTH_CONF: GlobalConfig = GlobalConfig::new();

/// Read one field of the global configuration.
///
/// Usage:
/// - For Copy types: `let owner = auth_config!(owner_id);`
/// - For Strings: `let url = auth_config!(dashboard_url).clone();`
#[macro_export]
macro_rules! auth_config {
	($field:ident) => {
		$crate::AUTH_CONF.load().$field
	};
}

/// Resolve the effective configuration and install it globally.
///
/// Precedence: CLI flags, then the configuration file, then defaults.
pub fn setup(args: Cli) -> Result<AuthConfig, ConfigError> {
	let config = resolve(args)?;
	init_logging(&config.log_level)?;
	AUTH_CONF.init(config.clone());
	log::info!(
		"Configuration loaded: release={}, owner_id={}",
		config.release,
		config.owner_id
	);
	Ok(config)
}

/// Install the logger at `level`, or switch an already installed one to it.
fn init_logging(level: &str) -> Result<(), ConfigError> {
	match telemetry::init(level) {
		Err(telemetry::TelemetryError::AlreadyInitialized) => telemetry::reload_log_level(level)?,
		result => result?,
	}
	Ok(())
}

/// Resolve the effective configuration without touching the global.
pub fn resolve(args: Cli) -> Result<AuthConfig, ConfigError> {
	let mut config = match args.config.as_deref() {
		Some(p) => load_from_file(p)?,
		None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH)?,
		None => {
			log::debug!("No configuration file found, using defaults");
			AuthConfig::default()
		}
	};

	if let Some(owner_id) = args.owner_id {
		config.owner_id = owner_id;
	}
	if let Some(release) = args.release {
		config.release = release;
	}
	if let Some(log_level) = args.log_level {
		config.log_level = log_level;
	}
	if let Some(dashboard_url) = args.dashboard_url {
		config.dashboard_url = dashboard_url;
	}

	if config.release.is_local() {
		log::warn!("Running in LOCAL release mode, owner bypass is disabled");
	}

	Ok(config)
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AuthConfig, ConfigError> {
	let path_ref = path.as_ref();
	let content = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
		path: path_ref.display().to_string(),
		source,
	})?;

	let extension = path_ref
		.extension()
		.and_then(|ext| ext.to_str())
		.ok_or(ConfigError::NoExtension)?;

	match extension.to_lowercase().as_str() {
		"toml" => Ok(toml::from_str(&content)?),
		"json" => Ok(serde_json::from_str(&content)?),
		"yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
		_ => Err(ConfigError::UnsupportedFormat(extension.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_parse_toml() {
		let dir = tempfile::tempdir().unwrap();
		let file_path = dir.path().join("config.toml");
		let content = r#"
owner_id = 84117866944663552
release = "PRO"
dashboard_url = "https://example.com/dashboard"
log_level = "debug"
"#;
		std::fs::write(&file_path, content).unwrap();

		let config = load_from_file(&file_path).unwrap();
		assert_eq!(config.owner_id, 84117866944663552);
		assert_eq!(config.release, Release::Pro);
		assert_eq!(config.dashboard_url, "https://example.com/dashboard");
		assert_eq!(config.log_level, "debug");
	}

	#[test]
	fn test_parse_json() {
		let dir = tempfile::tempdir().unwrap();
		let file_path = dir.path().join("config.json");
		let content = r#"
{
  "owner_id": 42,
  "release": "LOCAL"
}
"#;
		std::fs::write(&file_path, content).unwrap();

		let config = load_from_file(&file_path).unwrap();
		assert_eq!(config.owner_id, 42);
		assert!(config.release.is_local());
		assert_eq!(config.dashboard_url, DEFAULT_DASHBOARD_URL);
		assert_eq!(config.log_level, "info");
	}

	#[test]
	fn test_parse_yaml() {
		let dir = tempfile::tempdir().unwrap();
		let file_path = dir.path().join("config.yml");
		let content = r#"
owner_id: 7
release: "CANARY"
log_level: "warn"
"#;
		std::fs::write(&file_path, content).unwrap();

		let config = load_from_file(&file_path).unwrap();
		assert_eq!(config.owner_id, 7);
		assert_eq!(config.release, Release::Canary);
		assert_eq!(config.log_level, "warn");
	}

	#[test]
	fn test_unsupported_extension() {
		let dir = tempfile::tempdir().unwrap();
		let file_path = dir.path().join("config.ini");
		std::fs::write(&file_path, "owner_id=1").unwrap();

		let err = load_from_file(&file_path).unwrap_err();
		assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "ini"));
	}

	#[test]
	fn test_missing_file() {
		let err = load_from_file("/nonexistent/warden.toml").unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}

	#[test]
	fn test_cli_overrides_file() {
		let dir = tempfile::tempdir().unwrap();
		let file_path = dir.path().join("config.toml");
		std::fs::write(&file_path, "owner_id = 1\nrelease = \"MAIN\"\n").unwrap();

		let config = resolve(Cli {
			config: Some(file_path.display().to_string()),
			owner_id: Some(2),
			release: Some(Release::Local),
			..Cli::default()
		})
		.unwrap();
		assert_eq!(config.owner_id, 2);
		assert_eq!(config.release, Release::Local);
		assert_eq!(config.dashboard_url, DEFAULT_DASHBOARD_URL);
	}

	#[rstest]
	#[case("local", Release::Local)]
	#[case("Canary", Release::Canary)]
	#[case("MAIN", Release::Main)]
	#[case("pro", Release::Pro)]
	fn test_release_from_str(#[case] input: &str, #[case] expected: Release) {
		assert_eq!(input.parse::<Release>().unwrap(), expected);
	}

	#[test]
	fn test_release_from_str_unknown() {
		assert!("staging".parse::<Release>().is_err());
	}

	#[test]
	fn test_set_log_level_rejects_unknown() {
		let mut config = AuthConfig::default();
		assert!(config.set_log_level("verbose").is_err());
		assert_eq!(config.log_level, "info");
	}
}
