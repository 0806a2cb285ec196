//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, DemoConfig, Environment, PresenceConfig, RedisConfig,
};
