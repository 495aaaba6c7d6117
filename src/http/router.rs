//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Privileged account endpoints, mirroring the app's serverless routes
    let account_api = Router::new()
        .route("/create-athlete", post(handlers::create_athlete))
        .route("/delete-athlete", post(handlers::delete_athlete))
        .route("/resend-invite", post(handlers::resend_invite))
        .route("/set-password", post(handlers::set_password))
        .route("/validate-invite-token", get(handlers::validate_invite_token));

    // Row-level data endpoints
    let api_v1 = Router::new()
        .route("/athletes", get(handlers::list_athletes))
        .route("/profiles/{profile_id}", get(handlers::get_profile))
        .route("/profiles/{profile_id}", axum::routing::patch(handlers::patch_profile))
        .route("/athletes/{athlete_id}/sessions", get(handlers::list_sessions))
        .route("/athletes/{athlete_id}/sessions/{date}", put(handlers::upsert_session))
        .route("/sessions/{session_id}/completion", axum::routing::patch(handlers::patch_completion))
        .route("/athletes/{athlete_id}/completed-sessions", get(handlers::list_completed_sessions))
        .route("/athletes/{athlete_id}/completed-sessions", post(handlers::create_completed_session))
        .route("/athletes/{athlete_id}/plan", get(handlers::get_plan));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", account_api)
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
