//! # Merchant Credentials
//!
//! Merchant identity and secret, loaded once at start-up and shared
//! read-only with every request.

use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gateway environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Sandbox (`int`)
    #[default]
    Integration,
    /// Live (`prod`)
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Integration => "int",
            Environment::Production => "prod",
        }
    }
}

impl FromStr for Environment {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integration" | "test" => Ok(Environment::Integration),
            "prod" | "production" | "live" => Ok(Environment::Production),
            other => Err(PaymentError::Configuration(format!(
                "Unknown gateway environment '{}', expected 'int' or 'prod'",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merchant credentials
#[derive(Clone)]
pub struct Credentials {
    pub merchant_id: String,
    pub merchant_site_id: String,
    pub secret_key: String,
    pub environment: Environment,
}

impl Credentials {
    pub fn new(
        merchant_id: impl Into<String>,
        merchant_site_id: impl Into<String>,
        secret_key: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            merchant_site_id: merchant_site_id.into(),
            secret_key: secret_key.into(),
            environment,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("merchant_site_id", &self.merchant_site_id)
            .field("secret_key", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}
