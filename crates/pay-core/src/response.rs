//! # Gateway Responses
//!
//! The gateway replies with a JSON document whose `status` field is
//! `SUCCESS` or `ERROR`. The document is passed back to callers as-is.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status value the gateway uses for an accepted request
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// Raw gateway response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorResponse(Value);

impl VendorResponse {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// The `status` field, if present and a string
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    pub fn is_success(&self) -> bool {
        self.status() == Some(STATUS_SUCCESS)
    }

    pub fn session_token(&self) -> Option<&str> {
        self.0.get("sessionToken").and_then(Value::as_str)
    }

    /// Gateway-side error description, when the response carries one
    pub fn reason(&self) -> Option<&str> {
        self.0.get("reason").and_then(Value::as_str)
    }

    /// `Ok` for a `SUCCESS` status, `Err(Declined)` carrying the body otherwise
    pub fn into_result(self) -> PaymentResult<Self> {
        if self.is_success() {
            return Ok(self);
        }

        Err(PaymentError::Declined {
            status: self.status().unwrap_or("UNKNOWN").to_string(),
            data: self.0,
        })
    }

    pub fn body(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for VendorResponse {
    fn from(body: Value) -> Self {
        Self(body)
    }
}
