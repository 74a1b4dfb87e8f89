//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_payment_intent, get_config, handle_webhook, PaymentAppState};

/// Create the payment API router.
///
/// # Routes
///
/// - `GET /config` - Publishable key for the browser client
/// - `POST /create-payment-intent` - Create a payment intent
/// - `POST /webhook` - Handle Stripe webhooks (signature verified, no auth)
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/webhook", post(handle_webhook))
}
