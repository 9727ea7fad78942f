//! # Gateway Request Types
//!
//! Vendor-shaped payloads for the four gateway operations, and the
//! builders that fill in merchant identity, timestamps and checksums.

use crate::checksum::SignedRequest;
use crate::credentials::Credentials;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Field helpers
// =============================================================================

/// Render a JSON number the way it reads in decimal, so integral floats such
/// as `1e2` or `2.0` become `"100"` and `"2"`.
fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

fn string_or_number(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(number_to_string(&n)),
        other => Err(format!("expected a string or number, got {}", other)),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => string_or_number(value).map(Some).map_err(de::Error::custom),
    }
}

/// Monetary amount kept in its decimal string form.
///
/// Deserializes from either a JSON number (`10.5`) or string (`"10.50"`).
/// No currency or precision validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        string_or_number(value)
            .map(Amount)
            .map_err(|e| de::Error::custom(format!("invalid amount: {}", e)))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Amount {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Session token
// =============================================================================

/// `getSessionToken` payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenRequest {
    pub merchant_id: String,
    pub merchant_site_id: String,
    pub client_request_id: String,
    /// UTC, `YYYYMMDDHHmmss`
    pub time_stamp: String,
    pub checksum: String,
}

impl SessionTokenRequest {
    /// Build a signed request for `now`.
    ///
    /// The client request id is the epoch-millis of `now`, so two requests in
    /// the same millisecond share an id.
    pub fn build(credentials: &Credentials, now: DateTime<Utc>) -> Self {
        let time_stamp = now.format("%Y%m%d%H%M%S").to_string();
        let client_request_id = now.timestamp_millis().to_string();

        let checksum = SignedRequest::new([
            credentials.merchant_id.as_str(),
            credentials.merchant_site_id.as_str(),
            client_request_id.as_str(),
            time_stamp.as_str(),
            credentials.secret_key.as_str(),
        ])
        .into_signature();

        Self {
            merchant_id: credentials.merchant_id.clone(),
            merchant_site_id: credentials.merchant_site_id.clone(),
            client_request_id,
            time_stamp,
            checksum,
        }
    }
}

// =============================================================================
// Open order
// =============================================================================

/// Caller-supplied open-order fields
#[derive(Debug, Clone)]
pub struct OpenOrder {
    pub amount: Amount,
    pub currency: String,
    pub client_unique_id: String,
    pub client_request_id: String,
}

/// `openOrder` payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrderRequest {
    pub merchant_id: String,
    pub merchant_site_id: String,
    pub client_unique_id: String,
    pub client_request_id: String,
    pub currency: String,
    pub amount: Amount,
    /// Epoch millis
    pub time_stamp: String,
    pub checksum: String,
}

impl OpenOrderRequest {
    pub fn build(credentials: &Credentials, order: OpenOrder, now: DateTime<Utc>) -> Self {
        let time_stamp = now.timestamp_millis().to_string();

        let checksum = SignedRequest::new([
            credentials.merchant_id.as_str(),
            credentials.merchant_site_id.as_str(),
            order.client_request_id.as_str(),
            order.amount.as_str(),
            order.currency.as_str(),
            time_stamp.as_str(),
            credentials.secret_key.as_str(),
        ])
        .into_signature();

        Self {
            merchant_id: credentials.merchant_id.clone(),
            merchant_site_id: credentials.merchant_site_id.clone(),
            client_unique_id: order.client_unique_id,
            client_request_id: order.client_request_id,
            currency: order.currency,
            amount: order.amount,
            time_stamp,
            checksum,
        }
    }
}

// =============================================================================
// Payment
// =============================================================================

/// Card data as supplied by the caller and forwarded to the gateway
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_month: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_year: Option<String>,
    #[serde(
        rename = "CVV",
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cvv: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_holder_name: Option<String>,
}

impl CardDetails {
    /// Last four digits of the card number, if present.
    pub fn last_four(&self) -> Option<&str> {
        let number = self.card_number.as_deref()?;
        let start = number.len().saturating_sub(4);
        number.get(start..)
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = self.last_four().map(|last| format!("****{}", last));
        f.debug_struct("CardDetails")
            .field("card_number", &masked)
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("cvv", &self.cvv.as_ref().map(|_| "***"))
            .field("card_holder_name", &self.card_holder_name)
            .finish()
    }
}

/// Billing address forwarded with a payment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Device the payment originates from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl DeviceDetails {
    pub fn with_ip(ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: Some(ip_address.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentOption {
    pub card: CardDetails,
}

/// Caller-supplied payment fields
#[derive(Debug, Clone)]
pub struct Payment {
    pub amount: Amount,
    pub currency: Option<String>,
    pub session_token: String,
    pub card: CardDetails,
    pub billing_address: Option<BillingAddress>,
    pub device_details: Option<DeviceDetails>,
}

/// `payment` payload
///
/// Carries no checksum; the session token binds it to an authenticated
/// merchant session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub merchant_id: String,
    pub merchant_site_id: String,
    pub session_token: String,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub payment_option: PaymentOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<BillingAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_details: Option<DeviceDetails>,
}

impl PaymentRequest {
    pub fn build(credentials: &Credentials, payment: Payment) -> Self {
        Self {
            merchant_id: credentials.merchant_id.clone(),
            merchant_site_id: credentials.merchant_site_id.clone(),
            session_token: payment.session_token,
            amount: payment.amount,
            currency: payment.currency,
            payment_option: PaymentOption { card: payment.card },
            billing_address: payment.billing_address,
            device_details: payment.device_details,
        }
    }
}

// =============================================================================
// Payment status
// =============================================================================

/// `getPaymentStatus` payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}
