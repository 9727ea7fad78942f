//! # Payment Error Types
//!
//! Typed error handling for the gateway facade.
//! All gateway operations return `Result<T, PaymentError>`.

use serde_json::{json, Value};
use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Required caller input is missing or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// The gateway answered, but with a non-success status
    #[error("Declined by gateway: {status}")]
    Declined { status: String, data: Value },

    /// Gateway answered with a non-2xx HTTP status
    #[error("Provider error [{provider}]: HTTP {status}")]
    ProviderError {
        provider: String,
        status: u16,
        body: Value,
    },

    /// Network/HTTP error communicating with the gateway
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::Validation(_) => 400,
            PaymentError::Declined { .. } => 400,
            PaymentError::ProviderError { .. } => 500,
            PaymentError::NetworkError(_) => 500,
            PaymentError::Serialization(_) => 500,
            PaymentError::Internal(_) => 500,
        }
    }

    /// True for failures where the gateway could not be reached or its
    /// answer could not be used.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PaymentError::ProviderError { .. }
                | PaymentError::NetworkError(_)
                | PaymentError::Serialization(_)
        )
    }

    /// JSON details passed back to the caller alongside a failure.
    ///
    /// Provider errors carry the gateway's own body; everything else is
    /// reduced to its message.
    pub fn details(&self) -> Value {
        match self {
            PaymentError::ProviderError {
                provider,
                status,
                body,
            } => json!({
                "provider": provider,
                "status": status,
                "body": body,
            }),
            PaymentError::Declined { data, .. } => data.clone(),
            other => json!({ "message": other.to_string() }),
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PaymentError::Validation("missing".into()).status_code(), 400);
        assert_eq!(
            PaymentError::Declined {
                status: "FAILED".into(),
                data: json!({ "status": "FAILED" }),
            }
            .status_code(),
            400
        );
        assert_eq!(PaymentError::NetworkError("timeout".into()).status_code(), 500);
        assert_eq!(
            PaymentError::ProviderError {
                provider: "nuvei".into(),
                status: 502,
                body: Value::Null,
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_transport_errors() {
        assert!(PaymentError::NetworkError("refused".into()).is_transport());
        assert!(PaymentError::Serialization("bad json".into()).is_transport());
        assert!(!PaymentError::Validation("missing".into()).is_transport());
    }

    #[test]
    fn test_provider_details_pass_body_through() {
        let err = PaymentError::ProviderError {
            provider: "nuvei".into(),
            status: 503,
            body: json!({ "reason": "maintenance" }),
        };

        let details = err.details();
        assert_eq!(details["status"], 503);
        assert_eq!(details["body"]["reason"], "maintenance");
    }

    #[test]
    fn test_network_details_are_message() {
        let details = PaymentError::NetworkError("connection reset".into()).details();
        assert_eq!(details["message"], "Network error: connection reset");
    }
}
