//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentGateway` - Creates payment intents at the payment processor
//! - `PaymentEventHandler` - Receives verified payment webhook events

mod payment_event_handler;
mod payment_gateway;

pub use payment_event_handler::PaymentEventHandler;
pub use payment_gateway::PaymentGateway;
