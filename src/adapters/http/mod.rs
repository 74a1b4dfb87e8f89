//! HTTP adapters - REST API implementations.

pub mod payment;
mod router;

pub use payment::{payment_routes, PaymentAppState};
pub use router::app_router;
