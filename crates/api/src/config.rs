//! Application configuration loaded from environment variables.
//!
//! Built once at startup and passed to the components that need it.

use std::time::Duration;

use aggregator::{AggregationPolicy, Url};
use thiserror::Error;

/// A configuration value could not be used.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {key} ({value:?}): {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl ConfigError {
    fn new(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default `"0.0.0.0"`)
/// - `PORT`: listen port (default `3000`)
/// - `RUST_LOG`: tracing filter directive (default `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default `text`)
/// - `DATABASE_URL`: PostgreSQL URL; unset selects the in-memory stores
/// - `ORDER_SERVICE_URL`: remote order service; unset calls the in-process one
/// - `AGGREGATION_POLICY`: `strict` or `degrade` (default `degrade`)
/// - `ORDER_CALL_TIMEOUT_MS` (default `3000`)
/// - `STORAGE_TIMEOUT_MS` (default `5000`)
/// - `PASSWORD_HASH_TIMEOUT_MS` (default `5000`)
/// - `BCRYPT_COST`: 4 to 31 (default `12`)
/// - `GREETING_MESSAGE`: body of `/user-service/welcome`
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
    pub order_service_url: Option<Url>,
    pub aggregation_policy: AggregationPolicy,
    pub order_call_timeout: Duration,
    pub storage_timeout: Duration,
    pub password_hash_timeout: Duration,
    pub bcrypt_cost: u32,
    pub greeting: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from `lookup`; unset or empty keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::new("PORT", &v, e.to_string()))?,
            None => defaults.port,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::new("LOG_FORMAT", &v, "expected 'text' or 'json'")),
            },
            None => defaults.log_format,
        };

        let order_service_url = get("ORDER_SERVICE_URL")
            .map(|v| {
                let url = Url::parse(v.trim())
                    .map_err(|e| ConfigError::new("ORDER_SERVICE_URL", &v, e.to_string()))?;
                if url.cannot_be_a_base() {
                    return Err(ConfigError::new(
                        "ORDER_SERVICE_URL",
                        &v,
                        "not a base URL",
                    ));
                }
                Ok(url)
            })
            .transpose()?;

        let aggregation_policy = match get("AGGREGATION_POLICY") {
            Some(v) => v
                .parse::<AggregationPolicy>()
                .map_err(|e| ConfigError::new("AGGREGATION_POLICY", &v, e.to_string()))?,
            None => defaults.aggregation_policy,
        };

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(v) => {
                let cost: u32 = v
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| ConfigError::new("BCRYPT_COST", &v, e.to_string()))?;
                if !(4..=31).contains(&cost) {
                    return Err(ConfigError::new("BCRYPT_COST", &v, "must be between 4 and 31"));
                }
                cost
            }
            None => defaults.bcrypt_cost,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
            log_format,
            database_url: get("DATABASE_URL"),
            order_service_url,
            aggregation_policy,
            order_call_timeout: millis(&get, "ORDER_CALL_TIMEOUT_MS", defaults.order_call_timeout)?,
            storage_timeout: millis(&get, "STORAGE_TIMEOUT_MS", defaults.storage_timeout)?,
            password_hash_timeout: millis(
                &get,
                "PASSWORD_HASH_TIMEOUT_MS",
                defaults.password_hash_timeout,
            )?,
            bcrypt_cost,
            greeting: get("GREETING_MESSAGE").unwrap_or(defaults.greeting),
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn millis(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(v) = get(key) else {
        return Ok(default);
    };
    let ms: u64 = v
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::new(key, &v, e.to_string()))?;
    if ms == 0 {
        return Err(ConfigError::new(key, &v, "must be greater than zero"));
    }
    Ok(Duration::from_millis(ms))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            database_url: None,
            order_service_url: None,
            aggregation_policy: AggregationPolicy::Degrade,
            order_call_timeout: aggregator::DEFAULT_CALL_TIMEOUT,
            storage_timeout: Duration::from_secs(5),
            password_hash_timeout: Duration::from_secs(5),
            bcrypt_cost: 12,
            greeting: "Welcome to the storefront.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.database_url.is_none());
        assert!(config.order_service_url.is_none());
        assert_eq!(config.aggregation_policy, AggregationPolicy::Degrade);
        assert_eq!(config.order_call_timeout, Duration::from_millis(3000));
        assert_eq!(config.storage_timeout, Duration::from_millis(5000));
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.greeting, "Welcome to the storefront.");
    }

    #[test]
    fn test_values_from_lookup() {
        let config = from_pairs(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOG_FORMAT", "json"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("ORDER_SERVICE_URL", "http://orders:3000"),
            ("AGGREGATION_POLICY", "strict"),
            ("ORDER_CALL_TIMEOUT_MS", "250"),
            ("BCRYPT_COST", "4"),
            ("GREETING_MESSAGE", "hi"),
        ])
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(
            config.order_service_url.unwrap().as_str(),
            "http://orders:3000/"
        );
        assert_eq!(config.aggregation_policy, AggregationPolicy::Strict);
        assert_eq!(config.order_call_timeout, Duration::from_millis(250));
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.greeting, "hi");
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = from_pairs(&[("PORT", ""), ("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let err = from_pairs(&[("AGGREGATION_POLICY", "sometimes")]).unwrap_err();
        assert_eq!(err.key, "AGGREGATION_POLICY");
    }

    #[test]
    fn test_malformed_numbers_are_rejected() {
        assert_eq!(from_pairs(&[("PORT", "http")]).unwrap_err().key, "PORT");
        assert_eq!(
            from_pairs(&[("STORAGE_TIMEOUT_MS", "0")]).unwrap_err().key,
            "STORAGE_TIMEOUT_MS"
        );
        assert_eq!(
            from_pairs(&[("BCRYPT_COST", "99")]).unwrap_err().key,
            "BCRYPT_COST"
        );
    }

    #[test]
    fn test_invalid_order_service_url_is_rejected() {
        let err = from_pairs(&[("ORDER_SERVICE_URL", "not a url")]).unwrap_err();
        assert_eq!(err.key, "ORDER_SERVICE_URL");
    }

    #[test]
    fn test_addr_default() {
        assert_eq!(Config::default().addr(), "0.0.0.0:3000");
    }
}
