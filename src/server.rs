//! Wiring from configuration to a ready-to-serve router.

use std::sync::Arc;

use axum::Router;

use crate::adapters::events::LoggingEventHandler;
use crate::adapters::http::{app_router, PaymentAppState};
use crate::adapters::stripe::{StripeConfig, StripePaymentGateway};
use crate::config::AppConfig;
use crate::domain::payment::PaymentError;
use crate::domain::webhook::WebhookVerifier;

/// Build the application state with the production adapters.
///
/// # Errors
///
/// Returns `Internal` if the Stripe HTTP client cannot be constructed.
pub fn build_state(config: &AppConfig) -> Result<PaymentAppState, PaymentError> {
    let stripe_config = StripeConfig::new(config.payment.stripe_secret_key.clone())
        .with_base_url(config.payment.stripe_api_base.clone())
        .with_timeout(config.server.request_timeout());
    let gateway = StripePaymentGateway::new(stripe_config)?;

    let verifier = WebhookVerifier::new(config.payment.stripe_webhook_secret.clone())
        .with_tolerance(config.payment.webhook_tolerance());

    Ok(PaymentAppState::new(
        Arc::new(gateway),
        Arc::new(LoggingEventHandler::new()),
        verifier,
        config.payment.stripe_publishable_key.as_str(),
    ))
}

/// Build the full router for `config`.
pub fn build_app(config: &AppConfig) -> Result<Router, PaymentError> {
    let state = build_state(config)?;
    Ok(app_router(
        state,
        &config.static_dir,
        config.server.request_timeout(),
    ))
}
