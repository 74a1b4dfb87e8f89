//! Payment Intents Server - Minimal Stripe payment backend
//!
//! Serves the publishable key, creates PaymentIntents on behalf of a browser
//! client, and ingests signature-verified webhook events.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
pub mod telemetry;
