pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::portfolio::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // AI endpoints
        .route(
            "/api/ai/generate-bullets",
            post(handlers::handle_generate_bullets),
        )
        .route(
            "/api/ai/generate-cover-letter",
            post(handlers::handle_generate_cover_letter),
        )
        .route(
            "/api/ai/compare-portfolio",
            post(handlers::handle_compare_portfolio),
        )
        // User
        .route("/api/user/me", get(handlers::handle_current_user))
        .with_state(state)
}
