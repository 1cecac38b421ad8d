//! Trigger endpoint: POST /send-reports
//!
//! The external scheduler calls this with a bearer token and an optional
//! JSON payload naming the users to process. The body is read raw so an
//! empty POST means "full owner table".

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use serde_json::json;

use crate::db::PgReportStore;
use crate::orchestrator::{RunContext, TriggerRequest, run_reports};
use crate::state::AppState;

/// Bearer token must match one of the two configured secrets.
fn authorize(headers: &HeaderMap, state: &AppState) -> Result<(), (StatusCode, Json<serde_json::Value>)> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        tracing::error!("Unauthorized: missing or invalid Authorization header");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "error": "Unauthorized - Missing or invalid Authorization header",
                "message": "Please provide a valid Authorization header with Bearer token",
            })),
        ));
    };

    if token != state.config.service_role_key && token != state.config.anon_key {
        tracing::error!("Unauthorized: invalid token");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "error": "Unauthorized - Invalid token",
                "message": "The provided token is not valid",
            })),
        ));
    }

    Ok(())
}

pub async fn send_reports(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    if let Err(rejection) = authorize(&headers, &state) {
        return rejection;
    }

    let trigger: TriggerRequest = if body.trim().is_empty() {
        TriggerRequest::default()
    } else {
        match serde_json::from_str(&body) {
            Ok(trigger) => trigger,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "error": format!("Invalid request body: {e}"),
                    })),
                );
            }
        }
    };

    let store = PgReportStore::new(state.pool.clone(), state.config.business_timezone);
    let ctx = RunContext {
        store: &store,
        mailer: state.mailer.as_ref(),
        config: state.config.as_ref(),
    };

    match run_reports(&ctx, &trigger).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Daily reports sent successfully",
                "emailsSent": summary.success_count,
                "emailsFailed": summary.failed_count,
                "emailsSkipped": summary.skipped_count,
                "totalOwners": summary.total_count,
                "totalRevenue": summary.total_revenue,
                "totalRecords": summary.total_records,
                "reportDate": summary.report_date,
                "summaryEmailTo": state.config.summary_email.clone(),
                "results": summary.results,
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Daily reports run aborted");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                })),
            )
        }
    }
}
