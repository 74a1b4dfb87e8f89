//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `payment` - Payment intent requests, per-method options, and errors
//! - `webhook` - Webhook signature verification and the event model

pub mod payment;
pub mod webhook;
