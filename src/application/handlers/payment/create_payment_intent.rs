//! CreatePaymentIntentHandler - Command handler for starting a payment.

use std::sync::Arc;

use crate::domain::payment::{PaymentError, PaymentIntentResult, PaymentRequest};
use crate::ports::PaymentGateway;

/// Command to create a payment intent.
#[derive(Debug, Clone)]
pub struct CreatePaymentIntentCommand {
    pub payment_method_type: String,
    pub currency: String,
    pub amount: String,
}

/// Handler for creating payment intents.
pub struct CreatePaymentIntentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreatePaymentIntentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<PaymentIntentResult, PaymentError> {
        let request = PaymentRequest::new(cmd.payment_method_type, cmd.currency, cmd.amount);

        // Reject bad input before touching the gateway
        request.amount_minor_units().map_err(|e| {
            tracing::debug!(error = %e, "Rejected payment intent request");
            e
        })?;

        self.gateway.create_payment_intent(&request).await
    }
}
