//! Payment command handlers.

mod create_payment_intent;
mod handle_payment_webhook;

pub use create_payment_intent::{CreatePaymentIntentCommand, CreatePaymentIntentHandler};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
