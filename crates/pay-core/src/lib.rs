//! # pay-core
//!
//! Core types and traits for the Nuvei gateway facade.
//!
//! This crate provides:
//! - `sign` and `SignedRequest` for request checksums
//! - `Credentials` and `Environment` for merchant configuration
//! - Vendor-shaped request payloads with their builders
//! - `VendorResponse` for gateway replies
//! - `PaymentGateway` trait for the gateway client
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{Credentials, Environment, SessionTokenRequest, PaymentGateway};
//!
//! let credentials = Credentials::new("merchant", "site", "secret", Environment::Integration);
//!
//! // Build and sign a session-token request for the current instant
//! let request = SessionTokenRequest::build(&credentials, chrono::Utc::now());
//!
//! let response = gateway.get_session_token(&request).await?;
//! if response.is_success() {
//!     println!("token: {:?}", response.session_token());
//! }
//! ```

pub mod checksum;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod request;
pub mod response;

// Re-exports for convenience
pub use checksum::{sign, SignedRequest};
pub use credentials::{Credentials, Environment};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use request::{
    Amount, BillingAddress, CardDetails, DeviceDetails, OpenOrder, OpenOrderRequest, Payment,
    PaymentOption, PaymentRequest, PaymentStatusRequest, SessionTokenRequest,
};
pub use response::{VendorResponse, STATUS_SUCCESS};
