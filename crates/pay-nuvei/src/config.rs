//! # Nuvei Configuration
//!
//! Configuration management for the Nuvei integration.
//! Credentials are loaded from environment variables once at start-up.

use pay_core::{Credentials, Environment, PaymentError};
use std::env;
use std::time::Duration;

/// REST base URL of the Nuvei sandbox
pub const INTEGRATION_BASE_URL: &str = "https://ppp-test.nuvei.com/ppp/api/v1";

/// REST base URL of the Nuvei live environment
pub const PRODUCTION_BASE_URL: &str = "https://secure.safecharge.com/ppp/api/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Nuvei API configuration
#[derive(Debug, Clone)]
pub struct NuveiConfig {
    /// Merchant credentials
    pub credentials: Credentials,

    /// API base URL (overridable for testing/mocking)
    pub api_base_url: String,

    /// Per-request timeout for gateway calls
    pub timeout: Duration,
}

impl NuveiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `MERCHANT_ID`
    /// - `MERCHANT_SITE_ID`
    /// - `SECRET_KEY`
    ///
    /// Optional: `NUVEI_ENV` (`int` by default), `NUVEI_API_BASE_URL`,
    /// `NUVEI_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            var(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| PaymentError::Configuration(format!("{} not set", key)))
        };

        let merchant_id = required("MERCHANT_ID")?;
        let merchant_site_id = required("MERCHANT_SITE_ID")?;
        let secret_key = required("SECRET_KEY")?;

        let environment = match var("NUVEI_ENV") {
            Some(value) => value.parse::<Environment>()?,
            None => Environment::Integration,
        };

        let timeout = match var("NUVEI_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                PaymentError::Configuration(format!(
                    "NUVEI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    value
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self::new(Credentials::new(
            merchant_id,
            merchant_site_id,
            secret_key,
            environment,
        ))
        .with_timeout(Duration::from_secs(timeout));

        if let Some(url) = var("NUVEI_API_BASE_URL").filter(|url| !url.trim().is_empty()) {
            config = config.with_api_base_url(url);
        }

        Ok(config)
    }

    /// Create config with explicit credentials (for testing)
    pub fn new(credentials: Credentials) -> Self {
        let api_base_url = base_url_for(credentials.environment).to_string();
        Self {
            credentials,
            api_base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn environment(&self) -> Environment {
        self.credentials.environment
    }

    /// Full URL of a gateway operation, e.g. `getSessionToken.do`
    pub fn endpoint(&self, operation: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), operation)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Default REST base URL for an environment
pub fn base_url_for(environment: Environment) -> &'static str {
    match environment {
        Environment::Integration => INTEGRATION_BASE_URL,
        Environment::Production => PRODUCTION_BASE_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_to_integration() {
        let source = vars(&[
            ("MERCHANT_ID", "m1"),
            ("MERCHANT_SITE_ID", "s1"),
            ("SECRET_KEY", "key"),
        ]);

        let config = NuveiConfig::from_vars(|k| source.get(k).cloned()).unwrap();
        assert_eq!(config.environment(), Environment::Integration);
        assert_eq!(config.api_base_url, INTEGRATION_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.credentials.merchant_id, "m1");
    }

    #[test]
    fn test_production_environment() {
        let source = vars(&[
            ("MERCHANT_ID", "m1"),
            ("MERCHANT_SITE_ID", "s1"),
            ("SECRET_KEY", "key"),
            ("NUVEI_ENV", "prod"),
            ("NUVEI_TIMEOUT_SECS", "5"),
        ]);

        let config = NuveiConfig::from_vars(|k| source.get(k).cloned()).unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.api_base_url, PRODUCTION_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_base_url_override() {
        let source = vars(&[
            ("MERCHANT_ID", "m1"),
            ("MERCHANT_SITE_ID", "s1"),
            ("SECRET_KEY", "key"),
            ("NUVEI_API_BASE_URL", "http://localhost:9999/api/"),
        ]);

        let config = NuveiConfig::from_vars(|k| source.get(k).cloned()).unwrap();
        assert_eq!(
            config.endpoint("getSessionToken.do"),
            "http://localhost:9999/api/getSessionToken.do"
        );
    }

    #[test]
    fn test_missing_secret_key() {
        let source = vars(&[("MERCHANT_ID", "m1"), ("MERCHANT_SITE_ID", "s1")]);

        let err = NuveiConfig::from_vars(|k| source.get(k).cloned()).unwrap_err();
        assert!(matches!(err, PaymentError::Configuration(ref msg) if msg.contains("SECRET_KEY")));
    }

    #[test]
    fn test_unknown_environment() {
        let source = vars(&[
            ("MERCHANT_ID", "m1"),
            ("MERCHANT_SITE_ID", "s1"),
            ("SECRET_KEY", "key"),
            ("NUVEI_ENV", "qa"),
        ]);

        assert!(NuveiConfig::from_vars(|k| source.get(k).cloned()).is_err());
    }
}
