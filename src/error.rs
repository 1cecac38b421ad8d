//! Run-level error type for daily-reports
//!
//! Only configuration-class failures propagate out of a run. Everything
//! below the orchestrator (a location fetch, one owner's send) is caught
//! and converted into a structured outcome record instead.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort an entire run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing or invalid configuration (env vars, SES connectivity check)
    #[error("configuration error: {0}")]
    Config(String),

    /// Upstream store failure during run setup (locations/owners queries)
    #[error("upstream store error: {0}")]
    Store(BoxError),
}
