//! Mock payment gateway for testing.
//!
//! Provides a configurable implementation of `PaymentGateway` for unit and
//! router tests. Supports:
//! - Pre-configured client secrets
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::{PaymentError, PaymentIntentResult, PaymentRequest};
use crate::ports::PaymentGateway;

/// Mock payment gateway for testing.
///
/// Mirrors the real gateway's local validation: an unparseable amount fails
/// with `InvalidArgument` before the call is recorded.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::new();
/// mock.set_client_secret("pi_1_secret_2");
/// mock.set_error(PaymentError::remote("Your card was declined."));
///
/// let result = mock.create_payment_intent(&request).await;
/// assert_eq!(mock.call_count(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentGateway {
    /// Inner state (shared between clones so tests keep a handle).
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Client secret to return; generated when unset.
    next_client_secret: Option<String>,

    /// Error to return on the next call (consumed).
    next_error: Option<PaymentError>,

    /// Error to return on every call.
    sticky_error: Option<PaymentError>,

    /// Requests that reached the gateway.
    call_log: Vec<PaymentRequest>,
}

impl MockPaymentGateway {
    /// Create a new mock gateway with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the client secret returned by subsequent successful calls.
    pub fn set_client_secret(&self, secret: impl Into<String>) {
        self.inner.lock().unwrap().next_client_secret = Some(secret.into());
    }

    /// Set an error to return on the next call only.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error to return on every call until cleared.
    pub fn set_sticky_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().sticky_error = Some(error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.sticky_error = None;
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// All requests that passed local validation.
    pub fn calls(&self) -> Vec<PaymentRequest> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Number of requests that passed local validation.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().call_log.len()
    }

    /// The most recent request, if any.
    pub fn last_call(&self) -> Option<PaymentRequest> {
        self.inner.lock().unwrap().call_log.last().cloned()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_payment_intent(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentIntentResult, PaymentError> {
        request.amount_minor_units()?;

        let mut state = self.inner.lock().unwrap();
        state.call_log.push(request.clone());

        if let Some(error) = state.sticky_error.clone() {
            return Err(error);
        }
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        let client_secret = state.next_client_secret.clone().unwrap_or_else(|| {
            let id = uuid::Uuid::new_v4().simple().to_string();
            format!("pi_mock_{}_secret_{}", &id[..12], &id[12..24])
        });

        Ok(PaymentIntentResult { client_secret })
    }
}
