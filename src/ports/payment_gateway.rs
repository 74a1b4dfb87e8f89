//! Payment gateway port for creating payment intents.
//!
//! Defines the contract for the payment processor integration. The HTTP
//! layer only ever talks to this trait, so tests can swap in
//! `MockPaymentGateway` without a network.

use async_trait::async_trait;

use crate::domain::payment::{PaymentError, PaymentIntentResult, PaymentRequest};

/// Port for payment processor integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for the requested method, currency and amount.
    ///
    /// Returns the client secret the browser needs to confirm the payment.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` - The request failed local validation; no remote call was made
    /// - `Remote` - The processor rejected the request
    /// - `Internal` - Network failure or an unreadable processor response
    async fn create_payment_intent(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentIntentResult, PaymentError>;
}
