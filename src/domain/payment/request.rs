//! Payment intent request and result value objects.

use serde::{Deserialize, Serialize};

use super::errors::PaymentError;
use super::method_options::PaymentMethodOptions;

/// A request to create a payment intent.
///
/// `amount` is kept as received and only interpreted by
/// [`PaymentRequest::amount_minor_units`], so validation happens where the
/// intent is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Payment method type, e.g. `card` or `acss_debit`.
    pub payment_method_type: String,

    /// Three-letter ISO currency code.
    pub currency: String,

    /// Decimal integer in the smallest currency unit.
    pub amount: String,
}

impl PaymentRequest {
    pub fn new(
        payment_method_type: impl Into<String>,
        currency: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            payment_method_type: payment_method_type.into(),
            currency: currency.into(),
            amount: amount.into(),
        }
    }

    /// Parses the amount as a non-negative integer.
    ///
    /// Zero is accepted; whether a zero amount is allowed is the provider's call.
    ///
    /// # Errors
    ///
    /// `PaymentErrorKind::InvalidArgument` when the amount is not a
    /// non-negative integer that fits in a `u64`.
    pub fn amount_minor_units(&self) -> Result<u64, PaymentError> {
        let raw = self.amount.trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PaymentError::invalid_argument(format!(
                "Invalid amount '{}': expected a non-negative integer",
                self.amount
            )));
        }
        raw.parse::<u64>().map_err(|_| {
            PaymentError::invalid_argument(format!("Amount '{}' is out of range", self.amount))
        })
    }

    /// Fixed per-method options that must accompany this request, if any.
    pub fn method_options(&self) -> Option<PaymentMethodOptions> {
        PaymentMethodOptions::for_method(&self.payment_method_type)
    }
}

/// A successfully created payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResult {
    /// Single-use secret the browser uses to confirm the intent.
    pub client_secret: String,
}
