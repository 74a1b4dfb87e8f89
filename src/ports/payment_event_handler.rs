//! Payment event handler port.
//!
//! Receives verified webhook events after they have been classified. The
//! default implementation only logs; fulfillment logic plugs in here.

use async_trait::async_trait;

use crate::domain::webhook::WebhookEvent;

/// Handler for verified payment intent events.
///
/// Implementations should be idempotent: the processor may deliver the same
/// event more than once.
#[async_trait]
pub trait PaymentEventHandler: Send + Sync {
    /// A payment intent reached `succeeded`.
    async fn payment_succeeded(&self, event: &WebhookEvent);

    /// A payment attempt on a payment intent failed.
    async fn payment_failed(&self, event: &WebhookEvent);
}
