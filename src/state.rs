//! Application state for daily-reports

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::email::SesMailer;
use crate::error::BoxError;

/// Shared application state
///
/// The SES mailer is built once here and reused for every send in a run;
/// the upstream store is read-only, so there are no migrations to run.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool (read-only upstream store)
    pub pool: PgPool,
    /// SES delivery client
    pub mailer: Arc<SesMailer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        let mailer = SesMailer::from_env().await;

        Ok(Self {
            pool,
            mailer: Arc::new(mailer),
            config: Arc::new(config),
        })
    }
}
