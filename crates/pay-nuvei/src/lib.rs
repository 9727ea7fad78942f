//! # pay-nuvei
//!
//! Nuvei (SafeCharge) gateway client for the payment facade.
//!
//! `NuveiGateway` implements `PaymentGateway` over the Nuvei REST API:
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | `get_session_token` | `getSessionToken.do` |
//! | `create_payment` | `payment.do` |
//! | `open_order` | `openOrder.do` |
//! | `get_payment_status` | `getPaymentStatus.do` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_core::{PaymentGateway, SessionTokenRequest};
//! use pay_nuvei::NuveiGateway;
//!
//! // MERCHANT_ID, MERCHANT_SITE_ID, SECRET_KEY, NUVEI_ENV
//! let gateway = NuveiGateway::from_env()?;
//!
//! let request = SessionTokenRequest::build(&gateway.config().credentials, chrono::Utc::now());
//! let response = gateway.get_session_token(&request).await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::NuveiGateway;
pub use config::NuveiConfig;
