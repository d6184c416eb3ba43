//! Configuration management utilities
//!
//! The Forge API settings are read through a [`ConfigProvider`] on every use
//! instead of being captured once, so a change to the environment (or to a
//! [`SharedConfigProvider`]) is picked up by the next call.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::constants::{FORGE_API_KEY_ENV, FORGE_API_URL_ENV};
use crate::utils::mask_sensitive;

/// Forge API connection settings
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Base URL of the Forge API, e.g. `https://forge.example.com`
    pub forge_api_url: String,
    /// Secret API key sent as a bearer credential
    pub forge_api_key: String,
}

impl std::fmt::Debug for ForgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForgeConfig")
            .field("forge_api_url", &self.forge_api_url)
            .field("forge_api_key", &mask_sensitive(&self.forge_api_key))
            .finish()
    }
}

impl ForgeConfig {
    pub fn new(forge_api_url: impl Into<String>, forge_api_key: impl Into<String>) -> Self {
        Self {
            forge_api_url: forge_api_url.into(),
            forge_api_key: forge_api_key.into(),
        }
    }

    /// Load settings from `BUILT_IN_FORGE_API_URL` / `BUILT_IN_FORGE_API_KEY`.
    /// Unset variables become empty strings.
    pub fn from_env() -> Self {
        Self {
            forge_api_url: read_env(FORGE_API_URL_ENV),
            forge_api_key: read_env(FORGE_API_KEY_ENV),
        }
    }
}

fn read_env(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| {
        debug!("{} is not set, using an empty value", name);
        String::new()
    })
}

/// Source of the Forge configuration, consulted on every call
pub trait ConfigProvider: Send + Sync {
    /// Returns the configuration values current at the time of the call
    fn current(&self) -> ForgeConfig;
}

pub type DynConfigProvider = Arc<dyn ConfigProvider>;

/// Reads the process environment each time it is asked
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigProvider;

impl ConfigProvider for EnvConfigProvider {
    fn current(&self) -> ForgeConfig {
        ForgeConfig::from_env()
    }
}

/// In-memory configuration that can be changed at runtime.
///
/// Clones share the same underlying values.
#[derive(Debug, Clone, Default)]
pub struct SharedConfigProvider {
    inner: Arc<RwLock<ForgeConfig>>,
}

impl SharedConfigProvider {
    pub fn new(config: ForgeConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    pub fn set_forge_api_url(&self, url: impl Into<String>) {
        self.write(|config| config.forge_api_url = url.into());
    }

    pub fn set_forge_api_key(&self, key: impl Into<String>) {
        self.write(|config| config.forge_api_key = key.into());
    }

    /// Replace every setting at once
    pub fn replace(&self, config: ForgeConfig) {
        self.write(|current| *current = config);
    }

    fn write(&self, update: impl FnOnce(&mut ForgeConfig)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut *guard);
    }
}

impl ConfigProvider for SharedConfigProvider {
    fn current(&self) -> ForgeConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl From<ForgeConfig> for SharedConfigProvider {
    fn from(config: ForgeConfig) -> Self {
        Self::new(config)
    }
}
