//! daily-reports — scheduled business report mailer
//!
//! One trigger = one run:
//! - resolves the recipient (owner) list from the trigger payload or the
//!   full owner table
//! - per owner, fetches the day's approved transaction logs per assigned
//!   location, aggregates them and consolidates across locations
//! - renders the owner's chosen HTML template plus CSV attachments and
//!   dispatches via AWS SES
//! - emails the operator a summary of the whole run

mod api;
mod config;
mod db;
mod email;
mod error;
mod orchestrator;
mod report;
mod state;
mod template;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_reports=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        environment = %config.environment,
        timezone = %config.business_timezone,
        "Starting daily-reports"
    );

    let state = AppState::new(config.clone()).await?;

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("daily-reports listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
