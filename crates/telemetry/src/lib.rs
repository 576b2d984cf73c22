//! Logging bootstrap shared by every warden crate.
//!
//! Library code only emits `tracing` events; the host process calls
//! [`init`] once at startup and may later call [`reload_log_level`] when the
//! configured level changes.

mod error;
pub mod logger;

pub use error::TelemetryError;
pub use logger::init;
pub use logger::reload_log_level;
