//! HTTP DTOs (Data Transfer Objects) for payment endpoints.
//!
//! These types define the JSON request/response structure the browser
//! client speaks. Field names are camelCase on the wire.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::payment::CreatePaymentIntentCommand;
use crate::domain::payment::PaymentIntentResult;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a payment intent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    /// Payment method type, e.g. `card` or `acss_debit`.
    pub payment_method_type: String,
    /// Three-letter ISO currency code.
    pub currency: String,
    /// Amount in the smallest currency unit, as a JSON string or number.
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
}

impl From<CreatePaymentIntentRequest> for CreatePaymentIntentCommand {
    fn from(req: CreatePaymentIntentRequest) -> Self {
        Self {
            payment_method_type: req.payment_method_type,
            currency: req.currency,
            amount: req.amount,
        }
    }
}

/// Accepts `"1000"` and `1000` alike. Numeric validation happens later so
/// both shapes fail the same way.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "amount must be a string or number, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for `GET /config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub publishable_key: String,
}

/// Response for a created payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    pub client_secret: String,
}

impl From<PaymentIntentResult> for CreatePaymentResponse {
    fn from(result: PaymentIntentResult) -> Self {
        Self {
            client_secret: result.client_secret,
        }
    }
}

/// Uniform error envelope: `{"error":{"message":"..."}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureResponse {
    pub error: FailureDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureDetail {
    pub message: String,
}

impl FailureResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: FailureDetail {
                message: message.into(),
            },
        }
    }
}
