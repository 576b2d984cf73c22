use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TelemetryError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Local wall-clock timestamps as "[YYYY-MM-DD HH:MM:SS.micros]"
struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
		let datetime = chrono::Local::now();
		write!(w, "{}", datetime.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

type ReloadHandle = reload::Handle<EnvFilter, Registry>;

static RELOAD_HANDLE: OnceLock<ReloadHandle> = OnceLock::new();

/// Validate a log level name, returning it lower-cased.
pub fn normalize_level(level: &str) -> Result<String, TelemetryError> {
	let level_lower = level.to_lowercase();
	if VALID_LEVELS.contains(&level_lower.as_str()) {
		Ok(level_lower)
	} else {
		Err(TelemetryError::InvalidLogLevel(level.to_string()))
	}
}

/// Initialize the global logger.
///
/// `RUST_LOG` takes precedence over `level` when it is set, so operators can
/// scope filters per module (e.g. `command::auth=trace`) without touching the
/// configuration file.
///
/// # Example
///
/// ```no_run
/// telemetry::init("info")?;
/// tracing::info!("permission engine starting");
/// # Ok::<(), telemetry::TelemetryError>(())
/// ```
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidLogLevel`] for an unknown level and
/// [`TelemetryError::AlreadyInitialized`] when a global subscriber exists.
pub fn init(level: &str) -> Result<(), TelemetryError> {
	let level = normalize_level(level)?;
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

	let (filter_layer, reload_handle) = reload::Layer::new(env_filter);

	tracing_subscriber::registry()
		.with(filter_layer)
		.with(
			fmt::layer()
				.with_timer(LocalTimestamp)
				.with_target(true)
				.with_thread_ids(true)
				.with_line_number(false)
				.with_file(false),
		)
		.try_init()
		.map_err(|_| TelemetryError::AlreadyInitialized)?;

	let _ = RELOAD_HANDLE.set(reload_handle);
	Ok(())
}

/// Swap the active filter for a new level.
///
/// # Errors
///
/// Returns an error if the level is unknown, the logger was never
/// initialized, or the subscriber rejects the new filter.
pub fn reload_log_level(level: &str) -> Result<(), TelemetryError> {
	let level = normalize_level(level)?;
	let handle = RELOAD_HANDLE.get().ok_or(TelemetryError::NotInitialized)?;

	handle
		.reload(EnvFilter::new(&level))
		.map_err(|e| TelemetryError::ReloadFailed(e.to_string()))?;
	tracing::info!(level = %level, "log level reloaded");
	Ok(())
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("trace", "trace")]
	#[case("INFO", "info")]
	#[case("DeBuG", "debug")]
	#[case("warn", "warn")]
	fn test_normalize_valid_levels(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(normalize_level(input).unwrap(), expected);
	}

	// init() is never called in this binary, so reload can only report
	// NotInitialized once validation passes.
	#[rstest]
	#[case("error")]
	#[case("Debug")]
	fn test_reload_before_init(#[case] level: &str) {
		assert_eq!(reload_log_level(level), Err(TelemetryError::NotInitialized));
	}

	#[rstest]
	#[case("warning")]
	#[case("critical")]
	#[case("")]
	fn test_invalid_log_levels(#[case] level: &str) {
		assert!(matches!(
			reload_log_level(level),
			Err(TelemetryError::InvalidLogLevel(_))
		));
	}
}
