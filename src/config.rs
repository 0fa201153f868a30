//! Runtime configuration read from the environment (and `.env`).

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub allow_origin: String,
    pub port: u16,
    /// `ENV=DEV` applies embedded migrations at startup.
    pub run_migrations: bool,
    pub max_connections: u32,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable optional values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let allow_origin =
            lookup("ALLOW_ORIGIN_URL").ok_or(ConfigError::Missing("ALLOW_ORIGIN_URL"))?;

        Ok(Self {
            database_url,
            allow_origin,
            port: parse_or(lookup("PORT"), 8080),
            run_migrations: lookup("ENV").is_some_and(|env| env == "DEV"),
            max_connections: parse_or(lookup("DATABASE_MAX_CONNECTIONS"), 5),
            rate_limit_per_second: parse_or(lookup("RATE_LIMIT_PER_SECOND"), 2),
            rate_limit_burst: parse_or(lookup("RATE_LIMIT_BURST"), 5),
        })
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
