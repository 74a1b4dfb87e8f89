//! Webhook domain module.
//!
//! Signature verification and the event model for payment processor webhooks.
//!
//! # Module Structure
//!
//! - `verifier` - Stripe-Signature parsing and HMAC-SHA256 verification
//! - `event` - Verified event envelope and dispatch categories
//! - `errors` - WebhookError

mod errors;
mod event;
mod verifier;

pub use errors::WebhookError;
pub use event::{EventData, LastPaymentError, PaymentEventType, PaymentIntentSummary, WebhookEvent};
pub use verifier::{SignatureHeader, WebhookVerifier, DEFAULT_TOLERANCE};
