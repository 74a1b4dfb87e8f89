//! Stripe PaymentIntents adapter.
//!
//! Implements `PaymentGateway` against the Stripe REST API using
//! form-encoded requests, basic auth with the secret key, and one
//! `Idempotency-Key` per call.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::domain::payment::{
    PaymentError, PaymentIntentResult, PaymentMethodOptions, PaymentRequest,
};
use crate::ports::PaymentGateway;

use super::api_types::{StripeErrorEnvelope, StripePaymentIntent};

/// Default Stripe API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Default timeout for a single Stripe call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Upper bound on one outbound call, connect included.
    timeout: Duration,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            api_base_url: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Stripe payment gateway adapter.
pub struct StripePaymentGateway {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentGateway {
    /// Create a new Stripe gateway with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the HTTP client cannot be built (TLS backend
    /// initialization failure).
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent())
            .build()
            .map_err(|e| PaymentError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Maps a non-2xx response body to a payment error.
    fn map_error_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
        match serde_json::from_str::<StripeErrorEnvelope>(body) {
            Ok(envelope) => {
                let message = envelope
                    .error
                    .message
                    .unwrap_or_else(|| format!("Stripe request failed with status {}", status));
                let error = PaymentError::remote(message);
                match envelope.error.code {
                    Some(code) => error.with_provider_code(code),
                    None => error,
                }
            }
            Err(_) => PaymentError::internal(format!(
                "Unexpected Stripe response with status {}",
                status
            )),
        }
    }
}

fn user_agent() -> String {
    format!(
        "{}/{} (stripe-samples/accept-a-payment/custom-payment-flow)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

/// Form fields for `POST /v1/payment_intents`.
fn form_params(request: &PaymentRequest, amount: u64) -> Vec<(String, String)> {
    let mut params = vec![
        (
            "payment_method_types[0]".to_string(),
            request.payment_method_type.clone(),
        ),
        ("currency".to_string(), request.currency.clone()),
        ("amount".to_string(), amount.to_string()),
    ];

    if let Some(options) = request.method_options() {
        params.extend(option_params(&options));
    }

    params
}

fn option_params(options: &PaymentMethodOptions) -> Vec<(String, String)> {
    match options {
        PaymentMethodOptions::AcssDebit(acss) => {
            let prefix = format!("payment_method_options[{}][mandate_options]", options.method());
            vec![
                (
                    format!("{}[payment_schedule]", prefix),
                    acss.mandate_options.payment_schedule.as_str().to_string(),
                ),
                (
                    format!("{}[transaction_type]", prefix),
                    acss.mandate_options.transaction_type.as_str().to_string(),
                ),
            ]
        }
    }
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    async fn create_payment_intent(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentIntentResult, PaymentError> {
        let amount = request.amount_minor_units()?;
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        let params = form_params(request, amount);

        tracing::debug!(
            payment_method_type = %request.payment_method_type,
            currency = %request.currency,
            amount,
            "Creating payment intent"
        );

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Stripe create_payment_intent request failed");
                PaymentError::internal(format!("Stripe request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = Self::map_error_response(status, &body);
            tracing::warn!(
                status = %status,
                kind = %error.kind,
                provider_code = ?error.provider_code,
                payment_method_type = %request.payment_method_type,
                "Stripe rejected create_payment_intent"
            );
            return Err(error);
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            PaymentError::internal(format!("Failed to parse Stripe response: {}", e))
        })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            tracing::error!(payment_intent_id = %intent.id, "Stripe response had no client_secret");
            PaymentError::internal("Stripe response had no client_secret")
        })?;

        tracing::info!(
            payment_intent_id = %intent.id,
            payment_method_type = %request.payment_method_type,
            "Payment intent created"
        );

        Ok(PaymentIntentResult { client_secret })
    }
}
