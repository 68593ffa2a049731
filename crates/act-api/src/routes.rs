//! # Routes
//!
//! Axum router configuration for the action layer.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Auth actions (form posts, answer with encoded redirects):
///   - POST /auth/sign-up
///   - POST /auth/sign-in
///   - POST /auth/sign-out
///   - POST /auth/forgot-password
///   - POST /auth/reset-password
///
/// - Checkout:
///   - POST /api/v1/checkout - Create checkout session
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the front end posts forms cross-origin in dev
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/sign-up", post(handlers::sign_up))
        .route("/sign-in", post(handlers::sign_in))
        .route("/sign-out", post(handlers::sign_out))
        .route("/forgot-password", post(handlers::forgot_password))
        .route("/reset-password", post(handlers::reset_password));

    let api_routes = Router::new().route("/checkout", post(handlers::create_checkout));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Auth actions
        .nest("/auth", auth_routes)
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
