//! Payment event handler that records outcomes in the log.

use async_trait::async_trait;

use crate::domain::webhook::WebhookEvent;
use crate::ports::PaymentEventHandler;

/// Logs payment outcomes. No fulfillment is performed.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventHandler;

impl LoggingEventHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentEventHandler for LoggingEventHandler {
    async fn payment_succeeded(&self, event: &WebhookEvent) {
        let intent = event.payment_intent().unwrap_or_default();
        tracing::info!(
            event_id = %event.id,
            payment_intent_id = %intent.id,
            amount = intent.amount,
            currency = %intent.currency,
            livemode = event.livemode,
            "Payment received"
        );
    }

    async fn payment_failed(&self, event: &WebhookEvent) {
        let intent = event.payment_intent().unwrap_or_default();
        let last_error = intent.last_payment_error.unwrap_or_default();
        tracing::warn!(
            event_id = %event.id,
            payment_intent_id = %intent.id,
            amount = intent.amount,
            currency = %intent.currency,
            failure_code = last_error.code.as_deref().unwrap_or("unknown"),
            reason = last_error.message.as_deref().unwrap_or("no reason given"),
            "Payment failed"
        );
    }
}
