//! Runtime configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first when present; variables already
//! set in the environment win over it.
//!
//! ## Variables
//!
//! - `MAILBOX_CAPACITY` - Requests each actor buffers before callers wait (default: 32)
//! - `STORE_POOL_SIZE` - Concurrent operations each store admits (default: 10)
//! - `STORE_ACQUIRE_TIMEOUT_MS` - How long a store operation waits for a slot (default: 5000)
//! - `REQUEST_TIMEOUT_MS` - Deadline for calls between components (default: none)
//! - `DATABASE_URL` - PostgreSQL connection string; needs the `postgres` feature
//!   (default: none, records stay in memory)
//! - `RUST_LOG` - Log filter (default: `info`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use actor_framework::PoolOptions;
use anyhow::{Context, Result};
use tokio::sync::Semaphore;

/// Largest `STORE_POOL_SIZE` any store backend accepts.
pub const MAX_STORE_POOL_SIZE: usize = if (u32::MAX as usize) < Semaphore::MAX_PERMITS {
    u32::MAX as usize
} else {
    Semaphore::MAX_PERMITS
};

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
#[error("expected 'text' or 'json'")]
pub struct UnknownLogFormat;

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> std::result::Result<Self, UnknownLogFormat> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(UnknownLogFormat),
        }
    }
}

/// Settings shared by every component of the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mailbox_capacity: usize,
    pub store_pool_size: usize,
    pub store_acquire_timeout: Duration,
    /// When set, every call one component makes to another gives up after this long.
    pub request_timeout: Option<Duration>,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            store_pool_size: 10,
            store_acquire_timeout: Duration::from_millis(5000),
            request_timeout: None,
            log_format: LogFormat::Text,
            database_url: None,
        }
    }
}

impl Config {
    /// Loads configuration from the environment, after reading `.env` if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but does not parse, or if the result fails
    /// [`validate`](Self::validate).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let mailbox_capacity =
            parse_var(&lookup, "MAILBOX_CAPACITY")?.unwrap_or(defaults.mailbox_capacity);
        let store_pool_size =
            parse_var(&lookup, "STORE_POOL_SIZE")?.unwrap_or(defaults.store_pool_size);
        let store_acquire_timeout = parse_var(&lookup, "STORE_ACQUIRE_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.store_acquire_timeout);
        let request_timeout =
            parse_var(&lookup, "REQUEST_TIMEOUT_MS")?.map(Duration::from_millis);
        let log_format = parse_var(&lookup, "LOG_FORMAT")?.unwrap_or(defaults.log_format);
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        Ok(Self {
            mailbox_capacity,
            store_pool_size,
            store_acquire_timeout,
            request_timeout,
            log_format,
            database_url,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the mailbox or pool size is zero, the pool size is larger than
    /// a store can admit, or a timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.mailbox_capacity == 0 {
            anyhow::bail!("MAILBOX_CAPACITY must be at least 1");
        }
        if self.store_pool_size == 0 {
            anyhow::bail!("STORE_POOL_SIZE must be at least 1");
        }
        if self.store_pool_size > MAX_STORE_POOL_SIZE {
            anyhow::bail!("STORE_POOL_SIZE must be at most {}", MAX_STORE_POOL_SIZE);
        }
        if self.store_acquire_timeout.is_zero() {
            anyhow::bail!("STORE_ACQUIRE_TIMEOUT_MS must be greater than 0");
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("REQUEST_TIMEOUT_MS must be greater than 0 when set");
        }
        Ok(())
    }

    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_connections: self.store_pool_size,
            acquire_timeout: self.store_acquire_timeout,
        }
    }

    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Mailbox capacity: {}", self.mailbox_capacity);
        tracing::info!(
            "  Store pool: {} slots, {:?} acquire timeout",
            self.store_pool_size,
            self.store_acquire_timeout
        );
        match self.request_timeout {
            Some(timeout) => tracing::info!("  Request timeout: {:?}", timeout),
            None => tracing::info!("  Request timeout: none"),
        }
        tracing::info!("  Log format: {:?}", self.log_format);
        // The URL may carry credentials.
        match self.database_url {
            Some(_) => tracing::info!("  Storage: PostgreSQL"),
            None => tracing::info!("  Storage: in-memory"),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} has an invalid value '{}'", key, raw)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pool_options().max_connections, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("MAILBOX_CAPACITY", "8"),
            ("STORE_POOL_SIZE", "2"),
            ("STORE_ACQUIRE_TIMEOUT_MS", "250"),
            ("REQUEST_TIMEOUT_MS", "1000"),
            ("LOG_FORMAT", "json"),
            ("DATABASE_URL", "postgres://localhost/orders"),
        ]))
        .unwrap();

        assert_eq!(config.mailbox_capacity, 8);
        assert_eq!(config.store_pool_size, 2);
        assert_eq!(config.store_acquire_timeout, Duration::from_millis(250));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(1)));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/orders"));

        let blank = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(blank.database_url, None);
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        let err = Config::from_lookup(lookup(&[("MAILBOX_CAPACITY", "lots")])).unwrap_err();
        assert!(err.to_string().contains("MAILBOX_CAPACITY"));

        assert!(Config::from_lookup(lookup(&[("LOG_FORMAT", "yaml")])).is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.store_pool_size = 0;
        assert!(config.validate().is_err());

        config.store_pool_size = 1;
        config.request_timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = Config {
            mailbox_capacity: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pool_size_upper_bound() {
        let huge = usize::MAX.to_string();
        let config = Config::from_lookup(lookup(&[("STORE_POOL_SIZE", huge.as_str())])).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("STORE_POOL_SIZE"));

        let config = Config {
            store_pool_size: MAX_STORE_POOL_SIZE,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
