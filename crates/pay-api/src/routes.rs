//! # Routes
//!
//! Axum router configuration for the gateway facade.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
///   - POST /get-session-token - Issue a session token
///   - POST /process-payment - Capture a card payment
///   - POST /openOrder - Open an order
///   - POST /api/PaymentStatus - Query payment status
///   - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/get-session-token", post(handlers::get_session_token))
        .route("/process-payment", post(handlers::process_payment))
        .route("/openOrder", post(handlers::open_order))
        .route("/api/PaymentStatus", post(handlers::payment_status))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
