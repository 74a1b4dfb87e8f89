//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::application::handlers::payment::{
    CreatePaymentIntentHandler, HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
};
use crate::domain::payment::{PaymentError, PaymentErrorKind};
use crate::domain::webhook::{WebhookError, WebhookVerifier};
use crate::ports::{PaymentEventHandler, PaymentGateway};

use super::dto::{ConfigResponse, CreatePaymentIntentRequest, CreatePaymentResponse, FailureResponse};

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every collaborator is behind an `Arc`.
#[derive(Clone)]
pub struct PaymentAppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub event_handler: Arc<dyn PaymentEventHandler>,
    pub verifier: Arc<WebhookVerifier>,
    pub publishable_key: Arc<str>,
}

impl PaymentAppState {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        event_handler: Arc<dyn PaymentEventHandler>,
        verifier: WebhookVerifier,
        publishable_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            gateway,
            event_handler,
            verifier: Arc::new(verifier),
            publishable_key: publishable_key.into(),
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(self.gateway.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.verifier.clone(), self.event_handler.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /config - Publishable key for the browser client
pub async fn get_config(State(state): State<PaymentAppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        publishable_key: state.publishable_key.to_string(),
    })
}

/// POST /create-payment-intent - Create a payment intent and return its client secret
///
/// The body is parsed from raw bytes so a missing or wrong content type does
/// not change the outcome.
pub async fn create_payment_intent(
    State(state): State<PaymentAppState>,
    body: Bytes,
) -> Result<Json<CreatePaymentResponse>, ApiError> {
    let request: CreatePaymentIntentRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    tracing::debug!(
        payment_method_type = %request.payment_method_type,
        currency = %request.currency,
        "create-payment-intent request"
    );

    let result = state
        .create_payment_intent_handler()
        .handle(request.into())
        .await?;

    Ok(Json(result.into()))
}

/// POST /webhook - Handle payment processor webhooks
///
/// Responds with an empty body in every case.
pub async fn handle_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    let result = state.webhook_handler().handle(cmd).await?;
    tracing::debug!(?result, "Webhook processed");

    Ok(StatusCode::OK)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts failures to `FailureResponse` envelopes.
#[derive(Debug)]
pub enum ApiError {
    /// Request body was not valid JSON or missed a field.
    InvalidBody(String),
    /// Payment creation failed.
    Payment(PaymentError),
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self::Payment(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::InvalidBody(detail) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", detail),
            ),
            ApiError::Payment(err) => match err.kind {
                PaymentErrorKind::InvalidArgument | PaymentErrorKind::Remote => {
                    (StatusCode::BAD_REQUEST, err.message)
                }
                PaymentErrorKind::Internal => {
                    tracing::error!(error = %err, "Payment intent creation failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        (status, Json(FailureResponse::new(message))).into_response()
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> axum::response::Response {
        self.status_code().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::LoggingEventHandler;
    use crate::adapters::stripe::MockPaymentGateway;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::{get, post};
    use axum::Router;
    use secrecy::SecretString;
    use tower::ServiceExt;

    const WEBHOOK_SECRET: &str = "whsec_handlers_test";

    fn test_state(gateway: MockPaymentGateway) -> PaymentAppState {
        PaymentAppState::new(
            Arc::new(gateway),
            Arc::new(LoggingEventHandler::new()),
            WebhookVerifier::new(SecretString::new(WEBHOOK_SECRET.to_string())),
            "pk_test_handlers",
        )
    }

    fn test_app(gateway: MockPaymentGateway) -> Router {
        Router::new()
            .route("/config", get(get_config))
            .route("/create-payment-intent", post(create_payment_intent))
            .route("/webhook", post(handle_webhook))
            .with_state(test_state(gateway))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Config Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn config_returns_publishable_key() {
        let app = test_app(MockPaymentGateway::new());

        let response = app
            .oneshot(Request::get("/config").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"publishableKey": "pk_test_handlers"})
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Create Payment Intent Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_returns_client_secret() {
        let gateway = MockPaymentGateway::new();
        gateway.set_client_secret("pi_1_secret_abc");
        let app = test_app(gateway.clone());

        let response = app
            .oneshot(post_json(
                "/create-payment-intent",
                r#"{"paymentMethodType":"card","currency":"usd","amount":"1999"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"clientSecret": "pi_1_secret_abc"})
        );
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn create_without_content_type_still_parses() {
        let app = test_app(MockPaymentGateway::new());

        let response = app
            .oneshot(
                Request::post("/create-payment-intent")
                    .body(Body::from(
                        r#"{"paymentMethodType":"card","currency":"usd","amount":100}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request_with_envelope() {
        let gateway = MockPaymentGateway::new();
        let app = test_app(gateway.clone());

        let response = app
            .oneshot(post_json("/create-payment-intent", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("Invalid request body"));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let app = test_app(MockPaymentGateway::new());

        let response = app
            .oneshot(post_json(
                "/create-payment-intent",
                r#"{"paymentMethodType":"card","amount":"100"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"]["message"].as_str().unwrap().contains("currency"));
    }

    #[tokio::test]
    async fn invalid_amount_is_bad_request() {
        let app = test_app(MockPaymentGateway::new());

        let response = app
            .oneshot(post_json(
                "/create-payment-intent",
                r#"{"paymentMethodType":"card","currency":"usd","amount":"ten"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn remote_error_is_bad_request_with_provider_message() {
        let gateway = MockPaymentGateway::new();
        gateway.set_error(PaymentError::remote("Your card was declined."));
        let app = test_app(gateway);

        let response = app
            .oneshot(post_json(
                "/create-payment-intent",
                r#"{"paymentMethodType":"card","currency":"usd","amount":"100"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": {"message": "Your card was declined."}})
        );
    }

    #[tokio::test]
    async fn internal_error_is_500_with_generic_message() {
        let gateway = MockPaymentGateway::new();
        gateway.set_error(PaymentError::internal("connection reset by peer"));
        let app = test_app(gateway);

        let response = app
            .oneshot(post_json(
                "/create-payment-intent",
                r#"{"paymentMethodType":"card","currency":"usd","amount":"100"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let message = body["error"]["message"].as_str().unwrap();
        assert!(!message.contains("connection reset"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Tests
    // ════════════════════════════════════════════════════════════════════════════

    fn webhook_request(payload: &str, signature: Option<String>) -> Request<Body> {
        let mut builder = Request::post("/webhook");
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }
        builder.body(Body::from(payload.to_string())).unwrap()
    }

    fn sign(payload: &str) -> String {
        WebhookVerifier::new(SecretString::new(WEBHOOK_SECRET.to_string()))
            .sign(chrono::Utc::now().timestamp(), payload.as_bytes())
            .unwrap()
    }

    #[tokio::test]
    async fn signed_succeeded_event_is_ok_with_empty_body() {
        let payload = r#"{"id":"evt_1","type":"payment_intent.succeeded","data":{"object":{"id":"pi_1"}}}"#;
        let app = test_app(MockPaymentGateway::new());

        let response = app
            .oneshot(webhook_request(payload, Some(sign(payload))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn missing_signature_is_bad_request_with_empty_body() {
        let payload = r#"{"id":"evt_1","type":"payment_intent.succeeded","data":{"object":{}}}"#;
        let app = test_app(MockPaymentGateway::new());

        let response = app.oneshot(webhook_request(payload, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn unknown_event_type_is_bad_request() {
        let payload = r#"{"id":"evt_2","type":"some.unknown.type","data":{"object":{}}}"#;
        let app = test_app(MockPaymentGateway::new());

        let response = app
            .oneshot(webhook_request(payload, Some(sign(payload))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn webhook_errors_render_empty_400() {
        let response = WebhookError::InvalidSignature.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
