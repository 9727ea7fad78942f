//! # Payment Gateway Trait
//!
//! The seam between the HTTP layer and the payment gateway client.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentGateway (trait)                   │
//! │  ├── get_session_token()                                    │
//! │  ├── create_payment()                                       │
//! │  ├── open_order()                                           │
//! │  └── get_payment_status()                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                   ┌────────┴────────┐
//!                   │  NuveiGateway   │
//!                   │  (REST client)  │
//!                   └─────────────────┘
//! ```
//!
//! Each operation is a single request/response exchange. Implementations
//! must not retry: a failure is returned to the caller of the same request.

use crate::error::PaymentResult;
use crate::request::{OpenOrderRequest, PaymentRequest, PaymentStatusRequest, SessionTokenRequest};
use crate::response::VendorResponse;
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the facade forwards to the payment gateway.
///
/// `Err` means the gateway could not be reached or its answer could not be
/// read. A reachable gateway that rejects the request returns `Ok` with a
/// non-success [`VendorResponse`]; the caller decides what that means.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Request a session token for a later payment.
    async fn get_session_token(&self, request: &SessionTokenRequest) -> PaymentResult<VendorResponse>;

    /// Create a card payment within an existing session.
    async fn create_payment(&self, request: &PaymentRequest) -> PaymentResult<VendorResponse>;

    /// Open an order for an amount and currency.
    async fn open_order(&self, request: &OpenOrderRequest) -> PaymentResult<VendorResponse>;

    /// Query the status of the payment made in a session.
    async fn get_payment_status(
        &self,
        request: &PaymentStatusRequest,
    ) -> PaymentResult<VendorResponse>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway handle (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;
    use serde_json::json;

    struct EchoGateway;

    #[async_trait]
    impl PaymentGateway for EchoGateway {
        async fn get_session_token(
            &self,
            request: &SessionTokenRequest,
        ) -> PaymentResult<VendorResponse> {
            Ok(VendorResponse::new(json!({
                "status": "SUCCESS",
                "sessionToken": request.client_request_id,
            })))
        }

        async fn create_payment(&self, _request: &PaymentRequest) -> PaymentResult<VendorResponse> {
            Err(PaymentError::NetworkError("unreachable".into()))
        }

        async fn open_order(&self, request: &OpenOrderRequest) -> PaymentResult<VendorResponse> {
            Ok(VendorResponse::new(json!({ "orderId": request.client_unique_id })))
        }

        async fn get_payment_status(
            &self,
            _request: &PaymentStatusRequest,
        ) -> PaymentResult<VendorResponse> {
            Ok(VendorResponse::new(json!({ "status": "SUCCESS" })))
        }

        fn provider_name(&self) -> &'static str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_dynamic_dispatch() {
        let gateway: BoxedPaymentGateway = Arc::new(EchoGateway);
        let request = SessionTokenRequest {
            merchant_id: "m1".into(),
            merchant_site_id: "s1".into(),
            client_request_id: "42".into(),
            time_stamp: "20240102030405".into(),
            checksum: "abc".into(),
        };

        let response = gateway.get_session_token(&request).await.unwrap();
        assert_eq!(response.session_token(), Some("42"));
        assert_eq!(gateway.provider_name(), "echo");
    }
}
