//! HandlePaymentWebhookHandler - Command handler for processing payment processor webhooks.

use std::sync::Arc;

use crate::domain::webhook::{PaymentEventType, WebhookError, WebhookVerifier};
use crate::ports::PaymentEventHandler;

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload, exactly as received.
    pub payload: Vec<u8>,
    /// Stripe-Signature header, if the request carried one.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// `payment_intent.succeeded` dispatched.
    PaymentSucceeded { event_id: String },
    /// `payment_intent.payment_failed` dispatched.
    PaymentFailed { event_id: String },
}

/// Handler for processing payment processor webhooks.
///
/// Verifies authenticity first; nothing is parsed or dispatched for a
/// delivery that fails verification. Event types other than the two payment
/// intent outcomes are refused.
pub struct HandlePaymentWebhookHandler {
    verifier: Arc<WebhookVerifier>,
    event_handler: Arc<dyn PaymentEventHandler>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(verifier: Arc<WebhookVerifier>, event_handler: Arc<dyn PaymentEventHandler>) -> Self {
        Self {
            verifier,
            event_handler,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        self.handle_at(cmd, chrono::Utc::now().timestamp()).await
    }

    /// Same as [`Self::handle`] with an explicit clock.
    pub async fn handle_at(
        &self,
        cmd: HandlePaymentWebhookCommand,
        now: i64,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        // 1. Verify signature and parse event
        let signature = cmd.signature.as_deref().ok_or(WebhookError::MissingSignature)?;
        let event = self
            .verifier
            .verify_and_parse_at(&cmd.payload, signature, now)
            .map_err(|e| {
                tracing::warn!(error = %e, rejected = e.is_rejection(), "Webhook verification failed");
                e
            })?;

        // 2. Dispatch based on event type
        match event.kind() {
            PaymentEventType::Succeeded => {
                self.event_handler.payment_succeeded(&event).await;
                Ok(HandlePaymentWebhookResult::PaymentSucceeded { event_id: event.id })
            }
            PaymentEventType::PaymentFailed => {
                self.event_handler.payment_failed(&event).await;
                Ok(HandlePaymentWebhookResult::PaymentFailed { event_id: event.id })
            }
            PaymentEventType::Other(event_type) => {
                tracing::warn!(event_id = %event.id, event_type = %event_type, "Unhandled webhook event type");
                Err(WebhookError::UnhandledEventType(event_type))
            }
        }
    }
}
