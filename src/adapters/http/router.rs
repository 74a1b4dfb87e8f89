//! Application router: payment routes, static fallback, and middleware.

use std::path::Path;
use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::payment::{payment_routes, PaymentAppState};

/// Slack added to the outbound timeout so a slow Stripe call surfaces as
/// its own error before the request-level timeout fires.
const TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Build the complete application router.
///
/// Unmatched paths fall through to files under `static_dir`; a missing file
/// is a plain 404.
pub fn app_router(
    state: PaymentAppState,
    static_dir: impl AsRef<Path>,
    request_timeout: Duration,
) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout + TIMEOUT_MARGIN))
        .layer(PropagateRequestIdLayer::x_request_id());

    payment_routes()
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .with_state(state)
        .layer(middleware)
}
