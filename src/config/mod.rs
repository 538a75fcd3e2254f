//! Environment-driven configuration.
//!
//! Values are read from the process environment; binaries call
//! `dotenvy::dotenv()` first so a local `.env` file is honoured.

use crate::error::ConfigError;
use std::env;
use std::str::FromStr;

pub const DEFAULT_MEXC_BASE_URL: &str = "https://api.mexc.com";

/// Deployment environment (`sandbox`, `production`, ...).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_mexc_base_url() -> String {
    env::var("MEXC_BASE_URL").unwrap_or_else(|_| DEFAULT_MEXC_BASE_URL.to_string())
}

/// Read and parse an environment variable, falling back to `default` when unset.
pub fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Comma-separated list, empty entries dropped.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
