//! Service configuration loaded from environment variables.
//!
//! - `DATABASE_URL` - PostgreSQL connection string. Optional: without it the
//!   service keeps all state in memory.
//! - `HOST` - bind address (default: 0.0.0.0)
//! - `PORT` - listen port (default: 8080)
//! - `FREE_DELIVERY_THRESHOLD` - net subtotal in won that ships free (default: 30000)
//! - `FLAT_DELIVERY_FEE` - delivery fee in won below the threshold (default: 3000)

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::pricing::{
    PricingConfig, DEFAULT_FLAT_DELIVERY_FEE, DEFAULT_FREE_DELIVERY_THRESHOLD,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub pricing: PricingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 8080u16)?;
        let threshold = parse_or(&lookup, "FREE_DELIVERY_THRESHOLD", DEFAULT_FREE_DELIVERY_THRESHOLD)?;
        let fee = parse_or(&lookup, "FLAT_DELIVERY_FEE", DEFAULT_FLAT_DELIVERY_FEE)?;

        let pricing = PricingConfig::default().with_delivery(threshold, fee);
        pricing.validate().map_err(|e| {
            ConfigError::InvalidEnvVar("FREE_DELIVERY_THRESHOLD/FLAT_DELIVERY_FEE".into(), e.to_string())
        })?;

        Ok(Self {
            database_url,
            host,
            port,
            pricing,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), format!("'{raw}': {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_run_in_memory() {
        let cfg = config(&[]).expect("defaults");
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.pricing.free_delivery_threshold, 30000);
        assert_eq!(cfg.pricing.flat_delivery_fee, 3000);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://u:p@localhost/bento"),
            ("PORT", "9090"),
            ("FREE_DELIVERY_THRESHOLD", "50000"),
            ("FLAT_DELIVERY_FEE", "2500"),
        ])
        .expect("config");
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://u:p@localhost/bento"));
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.pricing.free_delivery_threshold, 50000);
        assert_eq!(cfg.pricing.flat_delivery_fee, 2500);
    }

    #[test]
    fn blank_database_url_is_unset() {
        assert!(config(&[("DATABASE_URL", "  ")]).expect("config").database_url.is_none());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn negative_fee_is_rejected() {
        assert!(config(&[("FLAT_DELIVERY_FEE", "-1")]).is_err());
    }
}
