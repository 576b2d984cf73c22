//! Command metadata and permission evaluation for chat bot commands.
//!
//! A command is declared once (see [`cmd::Declaration`]), normalized into an
//! [`cmd::ExecutableMeta`] at registration, and checked on every invocation
//! by the [`AuthorizationEngine`]:
//!
//! ```text
//! Declaration ──► Command / Application ──► CmdTable (process lifetime)
//!                                               │
//!   dispatcher: actor + guild ──► AuthorizationEngine::check_permissions
//!                                               │
//!                                 Ok(()) │ AuthFailure::{Denied, Notice, Internal}
//! ```
//!
//! The engine never looks anything up globally: subscription status, guild
//! settings and magic-role resolution are injected as [`auth::Services`].

pub mod actor;
pub mod auth;
pub mod cmd;
pub mod error;
pub mod flags;
pub mod permission;
pub mod predicate;
pub mod redirect;
pub mod services;

pub use actor::Actor;
pub use actor::Guild;
pub use actor::Permissions;
pub use actor::Role;
pub use auth::AuthorizationEngine;
pub use auth::CheckContext;
pub use auth::Overrides;
pub use auth::Services;
pub use error::AuthFailure;
pub use error::DispatchError;
pub use error::ServiceError;
pub use flags::parse_flags;
pub use permission::BloxlinkRole;
pub use permission::PermissionSpec;
pub use predicate::Predicate;
pub use predicate::PredicateOutcome;
