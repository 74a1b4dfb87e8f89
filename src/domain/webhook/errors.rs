//! Webhook error types for Stripe webhook handling.
//!
//! Every rejection is answered with `400 Bad Request` and an empty body. The
//! variants exist so the log says why a delivery was refused.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur while verifying or dispatching a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The request carried no signature header.
    #[error("Missing signature header")]
    MissingSignature,

    /// The signature header could not be parsed.
    #[error("Malformed signature header: {0}")]
    MalformedHeader(String),

    /// No `v1` signature matched the expected MAC.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature timestamp is further from now than the tolerance allows.
    #[error("Timestamp outside tolerance ({age_secs}s from now)")]
    TimestampOutOfTolerance { age_secs: u64 },

    /// Verified payload is not a valid event.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Verified event of a type this endpoint does not handle.
    #[error("Unhandled event type: {0}")]
    UnhandledEventType(String),
}

impl WebhookError {
    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Whether the delivery failed authenticity checks, as opposed to being
    /// authentic but unusable.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            WebhookError::MissingSignature
                | WebhookError::MalformedHeader(_)
                | WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfTolerance { .. }
        )
    }
}
