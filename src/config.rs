//! Runtime configuration read from the environment
//!
//! Both binaries call `dotenvy::dotenv()` first, so values may also come from
//! a `.env` file in the working directory.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Per-service fallbacks used when a variable is not set
#[derive(Debug, Clone, Copy)]
pub struct ServiceDefaults {
    pub name: &'static str,
    pub port: u16,
    pub database_path: &'static str,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service_name: &'static str,
    pub host: String,
    pub port: u16,
    /// Location of the embedded database file
    pub database_path: PathBuf,
    /// Prefix for generated short links, e.g. `https://sho.rt`
    pub public_base_url: Option<String>,
}

impl Config {
    /// Reads `HOST`, `PORT`, `DATABASE_URL` and `PUBLIC_BASE_URL`.
    pub fn from_env(defaults: &ServiceDefaults) -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), defaults)
    }

    pub fn from_lookup<F>(lookup: F, defaults: &ServiceDefaults) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number (0-65535), got {raw:?}"))?,
            None => defaults.port,
        };

        let database_path = lookup("DATABASE_URL")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(defaults.database_path));

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Config {
            service_name: defaults.name,
            host,
            port,
            database_path,
            public_base_url,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded for {}:", self.service_name);
        tracing::info!("  Listening on: {}", self.bind_addr());
        tracing::info!("  Database: {}", self.database_path.display());
        if let Some(base) = &self.public_base_url {
            tracing::info!("  Public base URL: {}", base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DEFAULTS: ServiceDefaults = ServiceDefaults {
        name: "test-service",
        port: 9000,
        database_path: "data/test.db",
    };

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_with_defaults() {
        let config = Config::from_lookup(lookup_from(&[]), &DEFAULTS).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("data/test.db"));
        assert_eq!(config.public_base_url, None);
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_config_with_all_vars() {
        let lookup = lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DATABASE_URL", "/tmp/custom.db"),
            ("PUBLIC_BASE_URL", "https://sho.rt/"),
        ]);

        let config = Config::from_lookup(lookup, &DEFAULTS).unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.database_path, PathBuf::from("/tmp/custom.db"));
        assert_eq!(config.public_base_url.as_deref(), Some("https://sho.rt"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let lookup = lookup_from(&[("DATABASE_URL", "  "), ("PUBLIC_BASE_URL", "")]);

        let config = Config::from_lookup(lookup, &DEFAULTS).unwrap();

        assert_eq!(config.database_path, PathBuf::from("data/test.db"));
        assert_eq!(config.public_base_url, None);
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "not-a-number")]), &DEFAULTS);

        let error = result.unwrap_err();
        assert!(error.to_string().contains("PORT"));
    }

    #[test]
    fn test_port_out_of_range() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "99999")]), &DEFAULTS);
        assert!(result.is_err());
    }
}
