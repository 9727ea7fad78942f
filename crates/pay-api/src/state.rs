//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the gateway client, merchant credentials and server configuration,
//! all immutable after start-up.

use pay_core::{BoxedPaymentGateway, Credentials};
use pay_nuvei::{NuveiConfig, NuveiGateway};
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway client
    pub gateway: BoxedPaymentGateway,
    /// Merchant credentials used to sign requests
    pub credentials: Arc<Credentials>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Nuvei REST gateway
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let nuvei_config = NuveiConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load Nuvei config: {}", e))?;
        let credentials = nuvei_config.credentials.clone();

        let gateway = NuveiGateway::new(nuvei_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Nuvei: {}", e))?;

        Ok(Self::with_gateway(Arc::new(gateway), credentials, config))
    }

    /// Assemble state from parts (tests, alternative gateways)
    pub fn with_gateway(
        gateway: BoxedPaymentGateway,
        credentials: Credentials,
        config: AppConfig,
    ) -> Self {
        Self {
            gateway,
            credentials: Arc::new(credentials),
            config,
        }
    }
}
