//! API routes for daily-reports

pub mod health;
pub mod reports;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the service router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/send-reports", post(reports::send_reports))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
