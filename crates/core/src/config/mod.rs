//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (EIREGION_*)
//! 2. TOML config file (if EIREGION_CONFIG_FILE set)
//! 3. Built-in defaults

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::freshness::{FreshnessPolicy, STALE_AFTER_DAYS};

mod validation;

pub use validation::ConfigError;

/// Which inbound surface the binary serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// JSON over HTTP on `bind_address:port`.
    Http,
    /// MCP over stdin/stdout.
    Stdio,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (EIREGION_*)
/// 2. TOML config file (if EIREGION_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to SQLite cache database.
    ///
    /// Set via EIREGION_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// HTTP listening port.
    ///
    /// Set via EIREGION_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Inbound surface: `http` or `stdio`.
    #[serde(default = "default_transport")]
    pub transport: Transport,

    /// Root of the EI economic region site; must end with `/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Postal code search page relative to `base_url`, with a
    /// `{postal_code}` placeholder for the normalized code.
    #[serde(default = "default_postal_path")]
    pub postal_path: String,

    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per request.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Age in days after which cached rows are refetched.
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: u32,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./eiregion-cache.sqlite")
}

fn default_port() -> u16 {
    8080
}

fn default_bind_address() -> String {
    "0.0.0.0".into()
}

fn default_transport() -> Transport {
    Transport::Http
}

fn default_base_url() -> String {
    "https://srv129.services.gc.ca/ei_regions/eng/".into()
}

fn default_postal_path() -> String {
    "postalcode_search.aspx?_code={postal_code}".into()
}

fn default_user_agent() -> String {
    "eiregion/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_stale_after_days() -> u32 {
    STALE_AFTER_DAYS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            port: default_port(),
            bind_address: default_bind_address(),
            transport: default_transport(),
            base_url: default_base_url(),
            postal_path: default_postal_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            stale_after_days: default_stale_after_days(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Freshness policy derived from `stale_after_days`.
    pub fn freshness(&self) -> FreshnessPolicy {
        FreshnessPolicy::from_days(self.stale_after_days)
    }

    /// Socket address for the HTTP listener.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `bind_address` is not an IP address.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self.bind_address.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            field: "bind_address".into(),
            reason: e.to_string(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `EIREGION_`
    /// 2. TOML file from `EIREGION_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("EIREGION_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("EIREGION_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
