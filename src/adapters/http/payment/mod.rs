//! HTTP adapter for payment endpoints.
//!
//! Exposes the publishable key, payment intent creation, and the Stripe
//! webhook receiver.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ConfigResponse, CreatePaymentIntentRequest, CreatePaymentResponse, FailureDetail,
    FailureResponse,
};
pub use handlers::{
    create_payment_intent, get_config, handle_webhook, ApiError, PaymentAppState,
    SIGNATURE_HEADER,
};
pub use routes::payment_routes;
