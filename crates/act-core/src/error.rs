//! # Action Error Types
//!
//! Typed error handling for the launchkit action layer.
//! All actions return `Result<T, ActionError>`.

use thiserror::Error;

/// Core error type for all server-side actions
#[derive(Debug, Error)]
pub enum ActionError {
    /// Configuration errors (missing environment values, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid action input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request deadline elapsed before a response arrived
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// Network/transport error other than timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Payment provider responded with a non-success status
    #[error("Provider rejected request with status {status}: {detail}")]
    ProviderRejection { status: u16, detail: String },

    /// Provider responded success but omitted a field this caller depends on
    #[error("Provider contract violation: {0}")]
    ContractViolation(String),

    /// Identity provider rejected the operation
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// Production-facing generic checkout failure (details stay in the logs)
    #[error("Failed to create checkout session. Please try again later.")]
    CheckoutUnavailable,
}

impl ActionError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, ActionError::Timeout(_) | ActionError::Network(_))
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ActionError::Configuration(_) => 500,
            ActionError::InvalidRequest(_) => 400,
            ActionError::Timeout(_) => 504,
            ActionError::Network(_) => 503,
            ActionError::ProviderRejection { .. } => 502,
            ActionError::ContractViolation(_) => 502,
            ActionError::Identity(_) => 401,
            ActionError::CheckoutUnavailable => 503,
        }
    }
}

/// Result type alias for action operations
pub type ActionResult<T> = Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ActionError::Timeout(10_000).is_retryable());
        assert!(ActionError::Network("connection refused".into()).is_retryable());
        assert!(!ActionError::ProviderRejection {
            status: 400,
            detail: "bad product".into()
        }
        .is_retryable());
        assert!(!ActionError::Configuration("CREEM_API_URL not set".into()).is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ActionError::InvalidRequest("test".into()).status_code(), 400);
        assert_eq!(ActionError::Timeout(10_000).status_code(), 504);
        assert_eq!(
            ActionError::ProviderRejection {
                status: 422,
                detail: "x".into()
            }
            .status_code(),
            502
        );
        assert_eq!(ActionError::CheckoutUnavailable.status_code(), 503);
    }

    #[test]
    fn test_generic_message_is_stable() {
        // Surfaced verbatim to production callers; the wording is part of
        // the contract with the front end.
        assert_eq!(
            ActionError::CheckoutUnavailable.to_string(),
            "Failed to create checkout session. Please try again later."
        );
    }
}
