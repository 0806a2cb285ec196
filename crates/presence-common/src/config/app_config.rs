//! Application configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub redis: RedisConfig,
    pub presence: PresenceConfig,
    pub demo: DemoConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(format!("unknown environment: {s}")),
        }
    }
}

/// Redis configuration
///
/// The logical database is selected through the URL path (`redis://host:6379/15`).
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Presence set configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    /// Sorted-set key holding the presence collection
    #[serde(default = "default_presence_key")]
    pub key: String,
    /// How long a heartbeat keeps a member online
    #[serde(default = "default_presence_ttl_ms")]
    pub ttl_ms: i64,
    /// Period of the background sweeper
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

impl PresenceConfig {
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            key: default_presence_key(),
            ttl_ms: default_presence_ttl_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

/// Timing of the demo scenario
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Delay between two demo logins
    #[serde(default = "default_demo_step_ms")]
    pub step_ms: u64,
    /// Wait after the last login before the final sweep
    #[serde(default = "default_demo_settle_ms")]
    pub settle_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            step_ms: default_demo_step_ms(),
            settle_ms: default_demo_settle_ms(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "presence-tracker".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_redis_max_connections() -> u32 {
    16
}

fn default_presence_key() -> String {
    "online".to_string()
}

fn default_presence_ttl_ms() -> i64 {
    60_000 // 1 minute
}

fn default_sweep_interval_ms() -> u64 {
    5_000
}

fn default_demo_step_ms() -> u64 {
    10_000
}

fn default_demo_settle_ms() -> u64 {
    35_000
}

/// Parse an optional variable, falling back to `default` only when it is unset
fn parse_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("APP_ENV", raw))?,
            None => default_env(),
        };

        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            redis: RedisConfig {
                url: lookup("REDIS_URL").ok_or(ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: parse_or(
                    &lookup,
                    "REDIS_MAX_CONNECTIONS",
                    default_redis_max_connections(),
                )?,
            },
            presence: PresenceConfig {
                key: lookup("PRESENCE_KEY").unwrap_or_else(default_presence_key),
                ttl_ms: parse_or(&lookup, "PRESENCE_TTL_MS", default_presence_ttl_ms())?,
                sweep_interval_ms: parse_or(
                    &lookup,
                    "PRESENCE_SWEEP_INTERVAL_MS",
                    default_sweep_interval_ms(),
                )?,
            },
            demo: DemoConfig {
                step_ms: parse_or(&lookup, "DEMO_STEP_MS", default_demo_step_ms())?,
                settle_ms: parse_or(&lookup, "DEMO_SETTLE_MS", default_demo_settle_ms())?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.presence.key.is_empty() {
            return Err(ConfigError::InvalidValue("PRESENCE_KEY", String::new()));
        }
        if self.presence.ttl_ms <= 0 {
            return Err(ConfigError::InvalidValue(
                "PRESENCE_TTL_MS",
                self.presence.ttl_ms.to_string(),
            ));
        }
        if self.presence.sweep_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "PRESENCE_SWEEP_INTERVAL_MS",
                "0".to_string(),
            ));
        }
        if self.redis.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "REDIS_MAX_CONNECTIONS",
                "0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
