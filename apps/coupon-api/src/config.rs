//! Coupon API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                          | Default   |
//! |-----------------------------------|-----------|
//! | `COUPON_API_HOST`                 | `0.0.0.0` |
//! | `COUPON_API_PORT` (else `PORT`)   | `5000`    |
//! | `COUPON_API_SEED`                 | `true`    |
//! | `COUPON_API_LOG_LEVEL`            | `info`    |

use std::env;
use std::net::{IpAddr, SocketAddr};

use serde::Serialize;

/// Coupon API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiConfig {
    /// Bind address
    pub host: IpAddr,

    /// HTTP port
    pub port: u16,

    /// Load the fixture coupons at startup
    pub seed: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
            seed: true,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let host = match env::var("COUPON_API_HOST") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("COUPON_API_HOST".to_string()))?,
            Err(_) => defaults.host,
        };

        let (port_var, port_raw) = match env::var("COUPON_API_PORT") {
            Ok(raw) => ("COUPON_API_PORT", Some(raw)),
            Err(_) => ("PORT", env::var("PORT").ok()),
        };
        let port = match port_raw {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue(port_var.to_string()))?,
            None => defaults.port,
        };

        let seed = match env::var("COUPON_API_SEED") {
            Ok(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("COUPON_API_SEED".to_string()))?,
            Err(_) => defaults.seed,
        };

        let log_level = env::var("COUPON_API_LOG_LEVEL").unwrap_or(defaults.log_level);
        if log_level.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "COUPON_API_LOG_LEVEL".to_string(),
            ));
        }

        Ok(ApiConfig {
            host,
            port,
            seed,
            log_level,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in [
            "COUPON_API_HOST",
            "COUPON_API_PORT",
            "PORT",
            "COUPON_API_SEED",
            "COUPON_API_LOG_LEVEL",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = ApiConfig::load().expect("config loads with defaults");
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn port_falls_back_to_generic_port_var() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PORT", "8080");
        assert_eq!(ApiConfig::load().expect("config loads").port, 8080);

        env::set_var("COUPON_API_PORT", "9090");
        assert_eq!(ApiConfig::load().expect("config loads").port, 9090);
        reset_env();
    }

    #[test]
    fn rejects_invalid_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        env::set_var("COUPON_API_PORT", "not-a-port");
        let err = ApiConfig::load().unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for COUPON_API_PORT");
        reset_env();

        env::set_var("COUPON_API_SEED", "maybe");
        assert!(matches!(
            ApiConfig::load(),
            Err(ConfigError::InvalidValue(var)) if var == "COUPON_API_SEED"
        ));
        reset_env();

        env::set_var("COUPON_API_HOST", "not an ip");
        assert!(ApiConfig::load().is_err());
        reset_env();
    }

    #[test]
    fn seed_flag_parses_common_spellings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("COUPON_API_SEED", "off");
        assert!(!ApiConfig::load().expect("config loads").seed);
        env::set_var("COUPON_API_SEED", "TRUE");
        assert!(ApiConfig::load().expect("config loads").seed);
        reset_env();
    }
}
