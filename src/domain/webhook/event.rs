//! Verified webhook events.
//!
//! A [`WebhookEvent`] only exists after its payload passed signature
//! verification; see [`super::WebhookVerifier::verify_and_parse`].

use serde::{Deserialize, Serialize};

/// Stripe event envelope, reduced to the fields this service reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g., "payment_intent.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    #[serde(default)]
    pub created: i64,

    /// Whether this is a live or test event.
    #[serde(default)]
    pub livemode: bool,

    /// Event payload containing the affected object.
    pub data: EventData,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventData {
    /// The object affected by this event.
    pub object: serde_json::Value,
}

/// Event types this service dispatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEventType {
    /// `payment_intent.succeeded`
    Succeeded,

    /// `payment_intent.payment_failed`
    PaymentFailed,

    /// Anything else.
    Other(String),
}

impl PaymentEventType {
    pub fn parse(event_type: &str) -> Self {
        match event_type {
            "payment_intent.succeeded" => PaymentEventType::Succeeded,
            "payment_intent.payment_failed" => PaymentEventType::PaymentFailed,
            other => PaymentEventType::Other(other.to_string()),
        }
    }
}

/// The payment intent carried by `payment_intent.*` events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentIntentSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    pub last_payment_error: Option<LastPaymentError>,
}

/// Why the most recent payment attempt failed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LastPaymentError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl WebhookEvent {
    /// The dispatch category of this event.
    pub fn kind(&self) -> PaymentEventType {
        PaymentEventType::parse(&self.event_type)
    }

    /// Reads `data.object` as a payment intent. Returns `None` when the object
    /// does not look like one.
    pub fn payment_intent(&self) -> Option<PaymentIntentSummary> {
        serde_json::from_value(self.data.object.clone()).ok()
    }
}
