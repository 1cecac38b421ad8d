//! Health check endpoint

use axum::Json;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "daily-reports",
        "version": env!("CARGO_PKG_VERSION"),
        "delivery": "AWS SES API",
    }))
}
