//! Runtime configuration from the environment (and `.env` via dotenvy).

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the booking backend API
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub space_cache_ttl: Duration,
    pub space_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            backend_url: "http://localhost:8000/api".to_string(),
            backend_timeout: Duration::from_secs(30),
            space_cache_ttl: Duration::from_secs(5 * 60),
            space_cache_capacity: 500,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: load(&lookup, "PORT", defaults.port)?,
            backend_url: lookup("BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            backend_timeout: Duration::from_secs(load(
                &lookup,
                "BACKEND_TIMEOUT_SECS",
                defaults.backend_timeout.as_secs(),
            )?),
            space_cache_ttl: Duration::from_secs(load(
                &lookup,
                "SPACE_CACHE_TTL_SECS",
                defaults.space_cache_ttl.as_secs(),
            )?),
            space_cache_capacity: load(&lookup, "SPACE_CACHE_CAPACITY", defaults.space_cache_capacity)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {} value '{}': {}", key, raw, e)),
        None => {
            info!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.backend_url, "http://localhost:8000/api");
        assert_eq!(config.space_cache_ttl, Duration::from_secs(300));
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("BACKEND_URL", "https://api.example.com/v1/"),
            ("BACKEND_TIMEOUT_SECS", "5"),
            ("SPACE_CACHE_CAPACITY", "10"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.backend_url, "https://api.example.com/v1");
        assert_eq!(config.backend_timeout, Duration::from_secs(5));
        assert_eq!(config.space_cache_capacity, 10);
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
