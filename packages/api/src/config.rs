//! Backend connection settings.

use std::str::FromStr;
use std::time::Duration;

/// Default Beer-Garden REST endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:2337";

/// Where and how to reach the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the Beer-Garden web server, with or without a path prefix.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Read `BEERGARDEN_URL` and `BEERGARDEN_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("BEERGARDEN_URL").unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(env_or("BEERGARDEN_TIMEOUT_SECS", 30)),
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse an environment variable, keeping `default` when unset or malformed.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring unparseable {}={:?}", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = ApiConfig::default()
            .with_base_url("http://bg.example:2337/prefix/")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://bg.example:2337/prefix/");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn env_or_keeps_default_for_missing_key() {
        let value: u64 = env_or("BEERGARDEN_TEST_SURELY_UNSET_KEY", 42);
        assert_eq!(value, 42);
    }
}
