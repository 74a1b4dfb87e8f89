//! Payment-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Kind | HTTP Status |
//! |------|-------------|
//! | InvalidArgument | 400 |
//! | Remote | 400 |
//! | Internal | 500 |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when creating a payment intent fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct PaymentError {
    /// Error category, decides the HTTP status.
    pub kind: PaymentErrorKind,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(kind: PaymentErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider_code: None,
        }
    }

    /// Input rejected before any call to the provider.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorKind::InvalidArgument, message)
    }

    /// The provider accepted the request and refused the operation.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorKind::Remote, message)
    }

    /// Network, timeout, or serialization failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorKind::Internal, message)
    }

    /// Attach the provider's error code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Whether the failure is the caller's fault (malformed or rejected input).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind,
            PaymentErrorKind::InvalidArgument | PaymentErrorKind::Remote
        )
    }
}

/// Payment error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorKind {
    /// Request input failed local validation.
    InvalidArgument,

    /// Provider reported a failure (declined card, policy violation, ...).
    Remote,

    /// Anything else: network, timeout, unexpected response.
    Internal,
}

impl std::fmt::Display for PaymentErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorKind::InvalidArgument => "invalid_argument",
            PaymentErrorKind::Remote => "remote",
            PaymentErrorKind::Internal => "internal",
        };
        write!(f, "{}", s)
    }
}
