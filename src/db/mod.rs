//! Read-only access to the upstream relational store
//!
//! The store is owned by the intake system; this service never writes to
//! it. [`ReportStore`] is the seam the orchestrator and consolidator work
//! against, so tests can substitute an in-memory fake for the Postgres
//! implementation.

pub mod locations;
pub mod logs;
pub mod owners;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use sqlx::PgPool;

use crate::error::BoxError;

pub use locations::Location;
pub use logs::{ApprovalStatus, TransactionRecord};
pub use owners::{Owner, ReportSchedule};

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn locations(&self) -> Result<Vec<Location>, BoxError>;

    async fn owners(&self) -> Result<Vec<Owner>, BoxError>;

    async fn owner_by_id(&self, id: &str) -> Result<Option<Owner>, BoxError>;

    async fn schedule_for(&self, user_id: &str) -> Result<Option<ReportSchedule>, BoxError>;

    /// One calendar day of approved, normalized records, optionally scoped
    /// to a single location.
    async fn approved_logs_for_day(
        &self,
        location_id: Option<&str>,
        day: NaiveDate,
    ) -> Result<Vec<TransactionRecord>, BoxError>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
    tz: Tz,
}

impl PgReportStore {
    pub fn new(pool: PgPool, tz: Tz) -> Self {
        Self { pool, tz }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn locations(&self) -> Result<Vec<Location>, BoxError> {
        Ok(locations::list_locations(&self.pool).await?)
    }

    async fn owners(&self) -> Result<Vec<Owner>, BoxError> {
        Ok(owners::list_owners(&self.pool).await?)
    }

    async fn owner_by_id(&self, id: &str) -> Result<Option<Owner>, BoxError> {
        Ok(owners::find_owner(&self.pool, id).await?)
    }

    async fn schedule_for(&self, user_id: &str) -> Result<Option<ReportSchedule>, BoxError> {
        Ok(owners::find_schedule(&self.pool, user_id).await?)
    }

    async fn approved_logs_for_day(
        &self,
        location_id: Option<&str>,
        day: NaiveDate,
    ) -> Result<Vec<TransactionRecord>, BoxError> {
        Ok(logs::approved_logs_for_day(&self.pool, location_id, day, self.tz).await?)
    }
}
