use config::AUTH_CONF;
use config::AuthConfig;
use config::Cli;
use config::Release;
use config::auth_config;
use serial_test::serial;

#[test]
#[serial]
fn test_setup_installs_global() {
	let dir = tempfile::tempdir().unwrap();
	let file_path = dir.path().join("config.toml");
	std::fs::write(&file_path, "owner_id = 99\nrelease = \"PRO\"\n").unwrap();

	let config = config::setup(Cli {
		config: Some(file_path.display().to_string()),
		..Cli::default()
	})
	.unwrap();

	assert!(AUTH_CONF.is_initialized());
	assert_eq!(config.owner_id, 99);
	assert_eq!(auth_config!(owner_id), 99);
	assert_eq!(auth_config!(release), Release::Pro);
}

#[test]
#[serial]
fn test_update_replaces_global() {
	// init is idempotent, so this is a no-op when the other test ran first.
	AUTH_CONF.init(AuthConfig::default());

	let mut next = (**AUTH_CONF.load()).clone();
	next.release = Release::Local;
	next.owner_id = 5;
	AUTH_CONF.update(next);

	assert!(auth_config!(release).is_local());
	assert_eq!(auth_config!(owner_id), 5);
}

#[test]
#[serial]
fn test_setup_installs_logger() {
	let config = config::setup(Cli {
		log_level: Some("warn".to_string()),
		..Cli::default()
	})
	.unwrap();
	assert_eq!(config.log_level, "warn");

	telemetry::reload_log_level("debug").unwrap();

	// A second setup reuses the installed logger.
	config::setup(Cli {
		log_level: Some("info".to_string()),
		..Cli::default()
	})
	.unwrap();
}

#[test]
#[serial]
fn test_setup_rejects_unknown_log_level() {
	let result = config::setup(Cli {
		log_level: Some("loud".to_string()),
		..Cli::default()
	});
	assert!(matches!(result, Err(config::ConfigError::Telemetry(_))));
}
