//! Stripe REST API response types.
//!
//! Only the fields the gateway reads are modelled; everything else in the
//! response is ignored.

use serde::Deserialize;

/// Stripe PaymentIntent object (subset).
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    /// PaymentIntent ID (pi_...).
    pub id: String,

    /// Secret handed to the browser. Absent when the key lacks permission.
    pub client_secret: Option<String>,

    /// Intent status (requires_payment_method, succeeded, ...).
    #[serde(default)]
    pub status: Option<String>,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

/// Error details from the Stripe API.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Human-readable message, safe to show to the payer.
    pub message: Option<String>,

    /// Error type (card_error, invalid_request_error, api_error, ...).
    #[serde(rename = "type")]
    pub error_type: Option<String>,

    /// Short machine code (amount_too_small, card_declined, ...).
    pub code: Option<String>,
}
