//! Owner (report recipient) queries

use sqlx::PgPool;

/// Report recipient as stored in the users table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Owner {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Legacy single-column name, kept for rows predating first/last split
    pub name: Option<String>,
    /// Location assignment: absent = all locations; otherwise a single id,
    /// a comma-separated list, or a JSON array of ids
    pub assigned_location: Option<String>,
    pub templateno: Option<i64>,
}

impl Owner {
    /// Display name fallback chain: first+last → legacy name → email → id.
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        if !first.is_empty() || !last.is_empty() {
            return format!("{first} {last}").trim().to_string();
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            return email.to_string();
        }
        self.id.clone()
    }
}

/// Per-user schedule metadata, joined in when a scheduled run names the user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportSchedule {
    pub user_id: String,
    pub templateno: Option<i64>,
    pub timezone: Option<String>,
}

const OWNER_COLUMNS: &str =
    "id, email, first_name, last_name, name, assigned_location, templateno";

/// All owner-role recipients (full-table fallback path).
pub async fn list_owners(pool: &PgPool) -> Result<Vec<Owner>, sqlx::Error> {
    let rows: Vec<Owner> =
        sqlx::query_as(&format!("SELECT {OWNER_COLUMNS} FROM users WHERE role = 'owner'"))
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

/// One owner by id (schedule-payload path).
pub async fn find_owner(pool: &PgPool, id: &str) -> Result<Option<Owner>, sqlx::Error> {
    let row: Option<Owner> =
        sqlx::query_as(&format!("SELECT {OWNER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

/// Schedule metadata for one user, if any.
pub async fn find_schedule(pool: &PgPool, user_id: &str) -> Result<Option<ReportSchedule>, sqlx::Error> {
    let row: Option<ReportSchedule> = sqlx::query_as(
        "SELECT user_id, templateno, timezone FROM report_schedules WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Owner {
        Owner {
            id: "u-1".into(),
            email: Some("owner@example.com".into()),
            first_name: None,
            last_name: None,
            name: None,
            assigned_location: None,
            templateno: None,
        }
    }

    #[test]
    fn test_display_name_prefers_first_last() {
        let mut o = owner();
        o.first_name = Some("Anita".into());
        o.last_name = Some("Menon".into());
        assert_eq!(o.display_name(), "Anita Menon");

        o.last_name = None;
        assert_eq!(o.display_name(), "Anita");
    }

    #[test]
    fn test_display_name_falls_back_to_legacy_name() {
        let mut o = owner();
        o.name = Some("A. Menon".into());
        assert_eq!(o.display_name(), "A. Menon");
    }

    #[test]
    fn test_display_name_falls_back_to_email_then_id() {
        let mut o = owner();
        assert_eq!(o.display_name(), "owner@example.com");

        o.email = None;
        assert_eq!(o.display_name(), "u-1");
    }

    #[test]
    fn test_display_name_ignores_whitespace_only_names() {
        let mut o = owner();
        o.first_name = Some("  ".into());
        o.name = Some(" ".into());
        assert_eq!(o.display_name(), "owner@example.com");
    }
}
