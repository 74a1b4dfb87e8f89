//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for Stripe's PaymentIntents API.
//!
//! # Security
//!
//! - The secret key is held as `secrecy::SecretString` and sent only as basic auth
//! - Every create call carries a fresh `Idempotency-Key`
//!
//! Webhook verification lives in `domain::webhook`; it needs no network.

mod api_types;
mod mock_payment_gateway;
mod stripe_adapter;

pub use api_types::{StripeApiError, StripeErrorEnvelope, StripePaymentIntent};
pub use mock_payment_gateway::MockPaymentGateway;
pub use stripe_adapter::{StripeConfig, StripePaymentGateway, DEFAULT_API_BASE};
