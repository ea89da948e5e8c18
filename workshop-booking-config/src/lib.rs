use core::fmt::{Debug, Display};
use core::time::Duration;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "workshop-booking.toml";
pub const ENV_PREFIX: &str = "WSB_";

/// The identity the client acts as. Written by the external login flow.
#[derive(Deserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Opaque session token, usually `Bearer <jwt>`.
    pub token: Option<String>,
    /// Presence flag, any value means admin.
    pub admin: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base url of the workshop service.
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            request_timeout_secs: default_request_timeout_secs(),
            session: SessionConfig::default(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:5000/api/workshops".to_owned()
}

const fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
    #[error("config error: request_timeout_secs must be at least 1")]
    ZeroTimeout,
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

pub fn get_config() -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::ZeroTimeout);
    }
    Ok(config)
}
