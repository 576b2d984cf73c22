#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use command::AuthorizationEngine;
use command::Guild;
use command::ServiceError;
use command::Services;
use command::services::GuildSettings;
use command::services::PremiumService;
use command::services::PremiumStatus;
use command::services::RoleNameResolver;
use config::AuthConfig;
use config::Release;

pub const OWNER_ID: u64 = 84117866944663552;
pub const GUILD_ID: u64 = 372036754078826496;

#[derive(Default)]
pub struct FakePremium {
	pub features: Vec<&'static str>,
	pub unavailable: bool,
	pub calls: AtomicUsize,
}

impl FakePremium {
	pub fn with_features(features: &[&'static str]) -> Self {
		Self {
			features: features.to_vec(),
			..Self::default()
		}
	}

	pub fn unavailable() -> Self {
		Self {
			unavailable: true,
			..Self::default()
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl PremiumService for FakePremium {
	async fn has_premium(&self, _guild: Option<&Guild>) -> Result<PremiumStatus, ServiceError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.unavailable {
			return Err(ServiceError::Unavailable("premium api timed out".to_string()));
		}
		Ok(PremiumStatus::with_features(self.features.iter().copied()))
	}
}

#[derive(Default)]
pub struct FakeSettings {
	pub magic_roles: Option<serde_json::Value>,
	pub unavailable: bool,
	pub calls: AtomicUsize,
}

impl FakeSettings {
	pub fn with_magic_roles(value: serde_json::Value) -> Self {
		Self {
			magic_roles: Some(value),
			..Self::default()
		}
	}

	pub fn unavailable() -> Self {
		Self {
			unavailable: true,
			..Self::default()
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl GuildSettings for FakeSettings {
	async fn get_guild_value(
		&self,
		_guild: &Guild,
		key: &str,
	) -> Result<Option<serde_json::Value>, ServiceError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.unavailable {
			return Err(ServiceError::Unavailable("settings cache down".to_string()));
		}
		assert_eq!(key, "magicRoles");
		Ok(self.magic_roles.clone())
	}
}

pub struct Harness {
	pub engine: AuthorizationEngine,
	pub premium: Arc<FakePremium>,
	pub settings: Arc<FakeSettings>,
}

pub fn harness(release: Release, premium: FakePremium, settings: FakeSettings) -> Harness {
	let premium = Arc::new(premium);
	let settings = Arc::new(settings);
	let config = AuthConfig {
		owner_id: OWNER_ID,
		release,
		..AuthConfig::default()
	};
	let engine = AuthorizationEngine::new(
		&config,
		Services {
			premium: premium.clone(),
			settings: settings.clone(),
			magic_roles: Arc::new(RoleNameResolver),
		},
	)
	.unwrap();

	Harness {
		engine,
		premium,
		settings,
	}
}

pub fn default_harness() -> Harness {
	harness(Release::Pro, FakePremium::default(), FakeSettings::default())
}

pub fn guild() -> Guild {
	Guild::new(GUILD_ID, "Bloxlink HQ")
}
