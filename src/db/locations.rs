//! Location reference data

use serde::Serialize;
use sqlx::PgPool;

/// Business location. Static reference data, read once per run and shared
/// read-only across every owner processed in that run.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Location {
    pub id: String,
    pub name: String,
}

pub async fn list_locations(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
    let rows: Vec<Location> = sqlx::query_as("SELECT id, name FROM locations ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
