pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::vetting::handlers;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/vetting/criteria/default",
            get(handlers::handle_default_criteria),
        )
        .route("/api/v1/vetting", post(handlers::handle_run_vetting))
        .route(
            "/api/v1/vetting/export",
            post(handlers::handle_run_vetting_export),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
