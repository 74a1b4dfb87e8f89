//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (`STRIPE_SECRET_KEY`)
    pub stripe_secret_key: SecretString,

    /// Stripe publishable key handed to the browser (`STRIPE_PUBLISHABLE_KEY`)
    pub stripe_publishable_key: String,

    /// Stripe webhook signing secret (`STRIPE_WEBHOOK_SECRET`)
    pub stripe_webhook_secret: SecretString,

    /// Base URL for the Stripe API
    #[serde(default = "default_api_base")]
    pub stripe_api_base: String,

    /// Maximum accepted age of a webhook signature timestamp, in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: u64,
}

impl PaymentConfig {
    /// Create a configuration with default base URL and tolerance.
    pub fn new(
        secret_key: impl Into<String>,
        publishable_key: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Self {
        Self {
            stripe_secret_key: SecretString::new(secret_key.into()),
            stripe_publishable_key: publishable_key.into(),
            stripe_webhook_secret: SecretString::new(webhook_secret.into()),
            stripe_api_base: default_api_base(),
            webhook_tolerance_secs: default_webhook_tolerance(),
        }
    }

    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key.expose_secret().starts_with("sk_test_")
    }

    /// Webhook timestamp tolerance as Duration
    pub fn webhook_tolerance(&self) -> Duration {
        Duration::from_secs(self.webhook_tolerance_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret_key = self.stripe_secret_key.expose_secret();
        let webhook_secret = self.stripe_webhook_secret.expose_secret();

        if secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"));
        }
        if self.stripe_publishable_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_PUBLISHABLE_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Secret and restricted keys are both usable server-side
        if !(secret_key.starts_with("sk_") || secret_key.starts_with("rk_")) {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_publishable_key.starts_with("pk_") {
            return Err(ValidationError::InvalidPublishableKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        if self.webhook_tolerance_secs == 0 {
            return Err(ValidationError::InvalidWebhookTolerance);
        }
        if !(self.stripe_api_base.starts_with("https://")
            || self.stripe_api_base.starts_with("http://"))
        {
            return Err(ValidationError::InvalidApiBase);
        }

        Ok(())
    }
}

fn default_api_base() -> String {
    "https://api.stripe.com".to_string()
}

fn default_webhook_tolerance() -> u64 {
    300
}
