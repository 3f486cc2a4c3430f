//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::lookup::LookupSettings;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the remote bank directory; `None` uses the built-in table
    pub bank_lookup_url: Option<String>,

    /// Bearer token for the remote bank directory
    pub bank_lookup_api_key: Option<String>,

    /// Upper bound for one lookup call
    pub bank_lookup_timeout: Duration,

    /// Quiet period after the last BIC keystroke
    pub lookup_debounce: Duration,

    /// Emit JSON log lines instead of text
    pub log_json: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let bank_lookup_url = non_empty("BANK_LOOKUP_URL");
        let bank_lookup_api_key = non_empty("BANK_LOOKUP_API_KEY");

        let bank_lookup_timeout = millis(
            var("BANK_LOOKUP_TIMEOUT_MS"),
            "BANK_LOOKUP_TIMEOUT_MS",
            5000,
        )?;

        let lookup_debounce = millis(var("LOOKUP_DEBOUNCE_MS"), "LOOKUP_DEBOUNCE_MS", 800)?;

        let log_json = match var("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => false,
            Some("json") => true,
            Some(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT")),
        };

        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        Ok(Self {
            bank_lookup_url,
            bank_lookup_api_key,
            bank_lookup_timeout,
            lookup_debounce,
            log_json,
            environment,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Gateway timing derived from this configuration
    pub fn lookup_settings(&self) -> LookupSettings {
        LookupSettings {
            debounce: self.lookup_debounce,
            timeout: self.bank_lookup_timeout,
        }
    }
}

fn millis(value: Option<String>, key: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(Duration::from_millis(default)),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidValue(key)),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
