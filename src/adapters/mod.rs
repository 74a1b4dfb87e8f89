//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `stripe` - Stripe PaymentIntents API client and a mock for tests
//! - `events` - Handlers for verified webhook events
//! - `http` - Axum routes, DTOs, and the application router

pub mod events;
pub mod http;
pub mod stripe;

pub use events::LoggingEventHandler;
pub use http::{app_router, PaymentAppState};
pub use stripe::{MockPaymentGateway, StripeConfig, StripePaymentGateway};
