//! # Nuvei REST Gateway
//!
//! `PaymentGateway` implementation over the Nuvei REST API. Every operation
//! is a JSON `POST` to `{base}/{operation}.do`; the reply body is returned
//! untouched so callers can branch on its `status` field.

use crate::config::NuveiConfig;
use async_trait::async_trait;
use pay_core::{
    OpenOrderRequest, PaymentError, PaymentGateway, PaymentRequest, PaymentResult,
    PaymentStatusRequest, SessionTokenRequest, VendorResponse,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "nuvei";

/// Gateway operation paths
pub mod operation {
    pub const GET_SESSION_TOKEN: &str = "getSessionToken.do";
    pub const PAYMENT: &str = "payment.do";
    pub const OPEN_ORDER: &str = "openOrder.do";
    pub const GET_PAYMENT_STATUS: &str = "getPaymentStatus.do";
}

/// Nuvei REST client
pub struct NuveiGateway {
    config: NuveiConfig,
    client: Client,
}

impl NuveiGateway {
    /// Create a new gateway client
    pub fn new(config: NuveiConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = NuveiConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &NuveiConfig {
        &self.config
    }

    /// Send one request. No retries: every failure goes straight back.
    async fn post<T>(&self, operation: &str, payload: &T) -> PaymentResult<VendorResponse>
    where
        T: Serialize + ?Sized,
    {
        let url = self.config.endpoint(operation);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Nuvei request failed: operation={}, error={}", operation, e);
                PaymentError::NetworkError(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!(
                "Nuvei API error: operation={}, status={}, body={}",
                operation, status, body
            );

            let body = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
            return Err(PaymentError::ProviderError {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Nuvei response: {}", e))
        })?;

        let response = VendorResponse::new(body);
        debug!(
            "Nuvei response: operation={}, status={:?}",
            operation,
            response.status()
        );

        Ok(response)
    }
}

#[async_trait]
impl PaymentGateway for NuveiGateway {
    #[instrument(skip(self, request), fields(client_request_id = %request.client_request_id))]
    async fn get_session_token(&self, request: &SessionTokenRequest) -> PaymentResult<VendorResponse> {
        let response = self.post(operation::GET_SESSION_TOKEN, request).await?;
        info!("Session token response: status={:?}", response.status());
        Ok(response)
    }

    #[instrument(skip(self, request), fields(amount = %request.amount))]
    async fn create_payment(&self, request: &PaymentRequest) -> PaymentResult<VendorResponse> {
        debug!("Creating payment: card={:?}", request.payment_option.card);
        let response = self.post(operation::PAYMENT, request).await?;
        info!(
            "Payment response: status={:?}, reason={:?}",
            response.status(),
            response.reason()
        );
        Ok(response)
    }

    #[instrument(
        skip(self, request),
        fields(client_unique_id = %request.client_unique_id, client_request_id = %request.client_request_id)
    )]
    async fn open_order(&self, request: &OpenOrderRequest) -> PaymentResult<VendorResponse> {
        let response = self.post(operation::OPEN_ORDER, request).await?;
        info!("Open order response: status={:?}", response.status());
        Ok(response)
    }

    #[instrument(skip(self, request))]
    async fn get_payment_status(
        &self,
        request: &PaymentStatusRequest,
    ) -> PaymentResult<VendorResponse> {
        self.post(operation::GET_PAYMENT_STATUS, request).await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
