use async_trait::async_trait;

use crate::auth::AuthorizationEngine;
use crate::auth::CheckContext;
use crate::auth::Overrides;
use crate::error::AuthFailure;

use super::cmd_meta::ExecutableMeta;

/// Anything the dispatcher can run: commands and applications.
#[async_trait]
pub trait Executable: Send + Sync {
	/// Get executable metadata
	fn meta(&self) -> &ExecutableMeta;

	fn name(&self) -> &str {
		&self.meta().name
	}

	/// Check the invoking actor against this executable's own rules.
	async fn authorize(
		&self,
		engine: &AuthorizationEngine,
		ctx: &CheckContext<'_>,
	) -> Result<(), AuthFailure> {
		engine
			.check_permissions(self.meta(), ctx, None, Overrides::default())
			.await
	}
}
