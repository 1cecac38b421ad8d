//! Transaction log fetcher
//!
//! Upstream rows arrive in two wire shapes: a flat legacy shape with the
//! vehicle/customer fields inlined on the log row, and a newer relational
//! shape where the log references a vehicle row, which in turn references a
//! customer and a model lookup row. Both are flattened into one canonical
//! [`TransactionRecord`] here; nothing past this module knows which shape a
//! record came from.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::util::day_bounds_utc;

/// Upstream approval state. The fetcher filters at the query level, so the
/// rest of the service only ever sees `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Canonical, shape-independent transaction record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub approval_status: ApprovalStatus,
    pub location_id: Option<String>,
    pub vehicle_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_model: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub service: Option<String>,
    /// Whole rupees. Missing upstream amounts become 0; negative values
    /// (refunds/corrections) pass through unvalidated.
    pub amount: i64,
    pub payment_mode: Option<String>,
    pub upi_account_name: Option<String>,
    pub entry_type: Option<String>,
}

/// One row as selected by [`SELECT_LOGS`]: legacy columns plus the
/// LEFT-JOINed relational columns, all optional.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LogRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub location_id: Option<String>,
    pub entry_type: Option<String>,
    pub payment_mode: Option<String>,
    pub upi_account_name: Option<String>,
    pub amount: Option<i64>,
    pub service: Option<String>,
    // Legacy flat shape
    pub vehicle_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_model: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    // Relational shape (joined sub-records)
    pub vehicle_id: Option<i64>,
    pub rel_vehicle_number: Option<String>,
    pub rel_vehicle_type: Option<String>,
    pub rel_vehicle_model: Option<String>,
    pub rel_customer_name: Option<String>,
    pub rel_customer_phone: Option<String>,
}

/// Which upstream schema produced a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WireShape {
    Legacy,
    Relational,
}

pub(crate) fn classify(row: &LogRow) -> WireShape {
    if row.vehicle_id.is_some() {
        WireShape::Relational
    } else {
        WireShape::Legacy
    }
}

/// Flatten either wire shape into the canonical record.
pub(crate) fn canonicalize(row: LogRow) -> TransactionRecord {
    let shape = classify(&row);
    let (vehicle_number, vehicle_type, vehicle_model, customer_name, customer_phone) = match shape {
        WireShape::Relational => (
            row.rel_vehicle_number,
            row.rel_vehicle_type,
            row.rel_vehicle_model,
            row.rel_customer_name,
            row.rel_customer_phone,
        ),
        WireShape::Legacy => (
            row.vehicle_number,
            row.vehicle_type,
            row.vehicle_model,
            row.customer_name,
            row.customer_phone,
        ),
    };

    TransactionRecord {
        id: row.id,
        created_at: row.created_at,
        approval_status: ApprovalStatus::Approved,
        location_id: row.location_id,
        vehicle_number,
        vehicle_type,
        vehicle_model,
        customer_name,
        customer_phone,
        service: row.service,
        amount: row.amount.unwrap_or(0),
        payment_mode: row.payment_mode,
        upi_account_name: row.upi_account_name,
        entry_type: row.entry_type,
    }
}

const SELECT_LOGS: &str = r#"
    SELECT
        l.id,
        l.created_at,
        l.location_id,
        l.entry_type,
        l.payment_mode,
        l.upi_account_name,
        l.amount,
        l.service,
        l.vehicle_number,
        l.vehicle_type,
        l.vehicle_model,
        l.name      AS customer_name,
        l.phone_no  AS customer_phone,
        l.vehicle_id,
        v.number_plate AS rel_vehicle_number,
        v.vehicle_type AS rel_vehicle_type,
        m.model_name   AS rel_vehicle_model,
        c.name         AS rel_customer_name,
        c.phone        AS rel_customer_phone
    FROM logs_man l
    LEFT JOIN vehicles v       ON v.id = l.vehicle_id
    LEFT JOIN customers c      ON c.id = v.customer_id
    LEFT JOIN vehicle_models m ON m.id = v.model_id
    WHERE l.approval_status = 'approved'
      AND l.created_at >= $1
      AND l.created_at <  $2
"#;

/// Fetch one calendar day of approved logs, optionally scoped to a single
/// location, normalized to the canonical record shape.
///
/// The window is half-open: `[business-tz midnight, +24h)` in UTC.
pub async fn approved_logs_for_day(
    pool: &PgPool,
    location_id: Option<&str>,
    day: NaiveDate,
    tz: Tz,
) -> Result<Vec<TransactionRecord>, sqlx::Error> {
    let (start, end) = day_bounds_utc(day, tz);

    tracing::debug!(
        location = location_id.unwrap_or("all"),
        start = %start,
        end = %end,
        "Fetching approved logs"
    );

    let rows: Vec<LogRow> = if let Some(location_id) = location_id {
        sqlx::query_as(&format!(
            "{SELECT_LOGS} AND l.location_id = $3 ORDER BY l.created_at"
        ))
        .bind(start)
        .bind(end)
        .bind(location_id)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as(&format!("{SELECT_LOGS} ORDER BY l.created_at"))
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await?
    };

    let records: Vec<TransactionRecord> = rows.into_iter().map(canonicalize).collect();
    tracing::info!(
        location = location_id.unwrap_or("all"),
        count = records.len(),
        "Approved logs fetched"
    );
    Ok(records)
}
