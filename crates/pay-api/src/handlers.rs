//! # Request Handlers
//!
//! Axum request handlers for the gateway facade.
//!
//! Result mapping differs by endpoint. Session-token and payment branch on
//! the gateway `status` (non-success is a 400); open-order and
//! payment-status treat any readable gateway reply as success and answer
//! failures in plain text.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use pay_core::{
    Amount, BillingAddress, CardDetails, DeviceDetails, OpenOrder, OpenOrderRequest, Payment,
    PaymentError, PaymentRequest, PaymentResult, PaymentStatusRequest, SessionTokenRequest,
    VendorResponse,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

pub const SESSION_TOKEN_FAILED: &str = "Failed to get session token";
pub const PAYMENT_FAILED: &str = "Payment failed";
pub const PAYMENT_SUCCESSFUL: &str = "Payment successful";
pub const PAYMENT_NOT_APPROVED: &str = "Payment not approved";
pub const PAYMENT_FIELDS_REQUIRED: &str = "Session token and card details are required";
pub const AMOUNT_REQUIRED: &str = "Amount is required";
pub const OPEN_ORDER_SUCCESSFUL: &str = "Open order successful";
pub const OPEN_ORDER_FAILED: &str = "Failed to open order";
pub const PAYMENT_STATUS_FAILED: &str = "Failed to verify payment";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Process payment request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default)]
    pub card_details: Option<CardDetails>,
    /// Billing address (optional, omitted from the gateway call when absent)
    #[serde(default)]
    pub billing_address: Option<BillingAddress>,
    /// Device details (optional, falls back to `X-Forwarded-For`)
    #[serde(default)]
    pub device_details: Option<DeviceDetails>,
}

impl ProcessPaymentRequest {
    /// Validate caller input into a payment.
    ///
    /// `forwarded_ip` is used only when the body names no device IP.
    pub fn into_payment(self, forwarded_ip: Option<String>) -> PaymentResult<Payment> {
        let session_token = self.session_token.filter(|token| !token.is_empty());
        let (session_token, card) = match (session_token, self.card_details) {
            (Some(token), Some(card)) => (token, card),
            _ => return Err(PaymentError::Validation(PAYMENT_FIELDS_REQUIRED.to_string())),
        };

        let amount = self
            .amount
            .ok_or_else(|| PaymentError::Validation(AMOUNT_REQUIRED.to_string()))?;

        let body_ip = self
            .device_details
            .and_then(|d| d.ip_address)
            .filter(|ip| !ip.trim().is_empty());
        let device_details = body_ip.or(forwarded_ip).map(DeviceDetails::with_ip);

        Ok(Payment {
            amount,
            currency: self.currency,
            session_token,
            card,
            billing_address: self.billing_address,
            device_details,
        })
    }
}

/// Open order request
///
/// Absent fields are signed and forwarded as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenOrderBody {
    pub amount: Amount,
    pub currency: String,
    pub client_unique_id: String,
    /// Supplied by the caller here, unlike the session-token endpoint
    pub client_request_id: String,
}

impl From<OpenOrderBody> for OpenOrder {
    fn from(body: OpenOrderBody) -> Self {
        Self {
            amount: body.amount,
            currency: body.currency,
            client_unique_id: body.client_unique_id,
            client_request_id: body.client_request_id,
        }
    }
}

/// Payment status request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusBody {
    #[serde(default)]
    pub session_token: Option<String>,
}

/// Session token response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    pub data: VendorResponse,
}

/// Message plus the gateway reply
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub data: Value,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
            data: data.into(),
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Map a failed gateway exchange for the endpoints that branch on status.
///
/// Validation → 400 `{error}`, decline → 400 `{message, data}`,
/// anything else → 500 `{error, details}`.
fn payment_error_to_response(err: PaymentError, failure: &str, declined: &str) -> Response {
    let code = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match err {
        PaymentError::Validation(message) => (code, Json(ErrorResponse::new(message))).into_response(),
        PaymentError::Declined { data, .. } => {
            (code, Json(MessageResponse::new(declined, data))).into_response()
        }
        other => (
            code,
            Json(ErrorResponse::new(failure).with_details(other.details())),
        )
            .into_response(),
    }
}

/// Parse a JSON request body.
///
/// A request without a JSON content type, or with an empty body, yields
/// `T::default()` so the handler's own validation decides the response.
fn parse_body<T>(headers: &HeaderMap, body: &Bytes) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false);

    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
}

/// Parse a body, treating an unreadable one as empty.
fn parse_body_or_default<T>(headers: &HeaderMap, body: &Bytes) -> T
where
    T: DeserializeOwned + Default,
{
    parse_body(headers, body).unwrap_or_else(|e| {
        warn!("Ignoring unreadable request body: {}", e);
        T::default()
    })
}

/// Declines are expected outcomes; transport failures are not.
fn log_failure(operation: &str, err: &PaymentError) {
    if err.is_transport() {
        error!("{} error: {}", operation, err);
    } else {
        warn!("{} rejected: {}", operation, err);
    }
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(String::from)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "nuvei-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.credentials.environment.as_str(),
    }))
}

/// Issue a session token for a later payment
#[instrument(skip(state))]
pub async fn get_session_token(State(state): State<AppState>) -> Response {
    let request = SessionTokenRequest::build(&state.credentials, Utc::now());

    let result = state
        .gateway
        .get_session_token(&request)
        .await
        .and_then(VendorResponse::into_result);

    match result {
        Ok(response) => {
            info!("Issued session token: client_request_id={}", request.client_request_id);
            let session_token = response.session_token().map(String::from);
            (
                StatusCode::OK,
                Json(SessionTokenResponse {
                    session_token,
                    data: response,
                }),
            )
                .into_response()
        }
        Err(e) => {
            log_failure("Session token", &e);
            payment_error_to_response(e, SESSION_TOKEN_FAILED, SESSION_TOKEN_FAILED)
        }
    }
}

/// Capture a card payment within a session
#[instrument(skip(state, headers, body))]
pub async fn process_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: ProcessPaymentRequest = match parse_body(&headers, &body) {
        Ok(body) => body,
        Err(e) => {
            let err = PaymentError::Validation(format!("Invalid request body: {}", e));
            return payment_error_to_response(err, PAYMENT_FAILED, PAYMENT_NOT_APPROVED);
        }
    };

    let payment = match body.into_payment(forwarded_ip(&headers)) {
        Ok(payment) => payment,
        Err(e) => return payment_error_to_response(e, PAYMENT_FAILED, PAYMENT_NOT_APPROVED),
    };

    info!(
        "Processing payment: amount={}, currency={:?}, card={:?}",
        payment.amount, payment.currency, payment.card
    );

    let request = PaymentRequest::build(&state.credentials, payment);

    let result = state
        .gateway
        .create_payment(&request)
        .await
        .and_then(VendorResponse::into_result);

    match result {
        Ok(response) => (
            StatusCode::OK,
            Json(MessageResponse::new(PAYMENT_SUCCESSFUL, response.into_inner())),
        )
            .into_response(),
        Err(e) => {
            log_failure("Payment", &e);
            payment_error_to_response(e, PAYMENT_FAILED, PAYMENT_NOT_APPROVED)
        }
    }
}

/// Open an order. Any readable gateway reply counts as success.
#[instrument(skip(state, headers, body))]
pub async fn open_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: OpenOrderBody = parse_body_or_default(&headers, &body);
    info!("Opening order: client_unique_id={}", body.client_unique_id);
    let request = OpenOrderRequest::build(&state.credentials, body.into(), Utc::now());

    match state.gateway.open_order(&request).await {
        Ok(response) => {
            info!("Open order response: {}", response.body());
            (
                StatusCode::OK,
                Json(MessageResponse::new(OPEN_ORDER_SUCCESSFUL, response.into_inner())),
            )
                .into_response()
        }
        Err(e) => {
            error!("Error opening order: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, OPEN_ORDER_FAILED).into_response()
        }
    }
}

/// Return the gateway's payment status for a session, unmodified
#[instrument(skip(state, headers, body))]
pub async fn payment_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: PaymentStatusBody = parse_body_or_default(&headers, &body);
    let request = PaymentStatusRequest {
        session_token: body.session_token,
    };

    match state.gateway.get_payment_status(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Error verifying payment: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, PAYMENT_STATUS_FAILED).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn card() -> CardDetails {
        CardDetails {
            card_number: Some("4000027891380961".into()),
            ..Default::default()
        }
    }

    fn body() -> ProcessPaymentRequest {
        ProcessPaymentRequest {
            amount: Some(Amount::new("10")),
            currency: Some("USD".into()),
            session_token: Some("tok".into()),
            card_details: Some(card()),
            billing_address: None,
            device_details: None,
        }
    }

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error");
        assert_eq!(err.error, "Test error");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_empty_session_token_is_missing() {
        let request = ProcessPaymentRequest {
            session_token: Some(String::new()),
            ..body()
        };

        let err = request.into_payment(None).unwrap_err();
        assert!(matches!(err, PaymentError::Validation(ref m) if m == PAYMENT_FIELDS_REQUIRED));
    }

    #[test]
    fn test_missing_amount() {
        let request = ProcessPaymentRequest {
            amount: None,
            ..body()
        };

        let err = request.into_payment(None).unwrap_err();
        assert!(matches!(err, PaymentError::Validation(ref m) if m == AMOUNT_REQUIRED));
    }

    #[test]
    fn test_device_ip_prefers_body_over_header() {
        let request = ProcessPaymentRequest {
            device_details: Some(DeviceDetails::with_ip("10.0.0.7")),
            ..body()
        };

        let payment = request.into_payment(Some("203.0.113.9".into())).unwrap();
        assert_eq!(
            payment.device_details.and_then(|d| d.ip_address).as_deref(),
            Some("10.0.0.7")
        );

        let payment = body().into_payment(Some("203.0.113.9".into())).unwrap();
        assert_eq!(
            payment.device_details.and_then(|d| d.ip_address).as_deref(),
            Some("203.0.113.9")
        );

        let payment = body().into_payment(None).unwrap();
        assert!(payment.device_details.is_none());
    }

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    #[test]
    fn test_parse_body_defaults_without_json() {
        let body: PaymentStatusBody = parse_body(&HeaderMap::new(), &Bytes::new()).unwrap();
        assert!(body.session_token.is_none());

        let body: PaymentStatusBody = parse_body(
            &HeaderMap::new(),
            &Bytes::from_static(br#"{"sessionToken":"tok"}"#),
        )
        .unwrap();
        assert!(body.session_token.is_none());

        let body: PaymentStatusBody = parse_body(&json_headers(), &Bytes::from_static(b"  ")).unwrap();
        assert!(body.session_token.is_none());
    }

    #[test]
    fn test_parse_body_reads_json() {
        let body: PaymentStatusBody = parse_body(
            &json_headers(),
            &Bytes::from_static(br#"{"sessionToken":"tok"}"#),
        )
        .unwrap();
        assert_eq!(body.session_token.as_deref(), Some("tok"));

        let result: Result<PaymentStatusBody, _> =
            parse_body(&json_headers(), &Bytes::from_static(b"{not json"));
        assert!(result.is_err());

        let body: PaymentStatusBody =
            parse_body_or_default(&json_headers(), &Bytes::from_static(b"{not json"));
        assert!(body.session_token.is_none());
    }

    #[test]
    fn test_open_order_body_fields_default_to_empty() {
        let body: OpenOrderBody =
            serde_json::from_value(json!({ "amount": 5, "currency": "USD", "clientUniqueId": "o" }))
                .unwrap();
        assert_eq!(body.client_request_id, "");
        assert_eq!(body.amount.as_str(), "5");
    }

    #[test]
    fn test_session_token_response_omits_missing_token() {
        let response = SessionTokenResponse {
            session_token: None,
            data: VendorResponse::new(json!({ "status": "SUCCESS" })),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("sessionToken").is_none());
        assert_eq!(value["data"]["status"], "SUCCESS");
    }

    #[test]
    fn test_forwarded_ip_takes_first_hop() {
        let mut headers = HeaderMap::new();
        assert_eq!(forwarded_ip(&headers), None);

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(forwarded_ip(&headers).as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn test_payment_error_conversion() {
        let response = payment_error_to_response(
            PaymentError::Validation(PAYMENT_FIELDS_REQUIRED.to_string()),
            PAYMENT_FAILED,
            PAYMENT_NOT_APPROVED,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = payment_error_to_response(
            PaymentError::Declined {
                status: "ERROR".into(),
                data: json!({ "status": "ERROR" }),
            },
            PAYMENT_FAILED,
            PAYMENT_NOT_APPROVED,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = payment_error_to_response(
            PaymentError::NetworkError("reset".into()),
            PAYMENT_FAILED,
            PAYMENT_NOT_APPROVED,
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
