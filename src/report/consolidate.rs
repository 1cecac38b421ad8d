//! Multi-location consolidation
//!
//! Fans the log fetch + aggregation out across an owner's assigned
//! locations and merges the per-location analyses into one consolidated
//! summary. A one-entry result is the valid degenerate case for
//! single-location owners.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::db::{Location, ReportStore, TransactionRecord};
use crate::error::BoxError;
use crate::report::analysis::{Analysis, analyze};

/// One location's slice of an owner's day.
#[derive(Debug, Clone)]
pub struct LocationReport {
    pub location_id: String,
    pub location_name: String,
    pub analysis: Analysis,
    pub records: Vec<TransactionRecord>,
}

impl LocationReport {
    /// A location contributes to the report (and gets CSV attachments)
    /// only when it produced at least one record.
    pub fn is_contributing(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Per-location share of the consolidated totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationShare {
    pub location_name: String,
    pub revenue: i64,
    pub vehicles: u32,
    /// Percent of consolidated revenue, 0 when the consolidated total is 0
    pub revenue_share: f64,
}

/// Merged result across an owner's locations.
#[derive(Debug, Clone)]
pub struct Consolidated {
    pub locations: Vec<LocationReport>,
    /// Analysis over the union of all member records — what the templates
    /// render
    pub combined: Analysis,
    pub total_revenue: i64,
    pub total_vehicles: u32,
    pub comparison: Vec<LocationShare>,
}

/// Resolve an owner's assignment into concrete locations.
///
/// Accepted forms: absent/empty (all known locations), a single id, a
/// comma-separated id list, or a JSON array of ids. A trigger-level
/// override list takes precedence over the stored assignment. Ids with no
/// matching location row are dropped.
pub fn resolve_assigned_locations(
    assigned: Option<&str>,
    all: &[Location],
    override_ids: Option<&[String]>,
) -> Vec<Location> {
    let by_id = |id: &str| all.iter().find(|l| l.id == id).cloned();

    if let Some(ids) = override_ids {
        return ids.iter().filter_map(|id| by_id(id.trim())).collect();
    }

    let Some(raw) = assigned.map(str::trim).filter(|a| !a.is_empty()) else {
        return all.to_vec();
    };

    if raw.starts_with('[') {
        if let Ok(ids) = serde_json::from_str::<Vec<String>>(raw) {
            return ids.iter().filter_map(|id| by_id(id.trim())).collect();
        }
    }

    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .filter_map(by_id)
        .collect()
}

/// Merge per-location reports. `None` is the no-data signal: every member
/// location yielded zero records. A single ₹0 record is data.
pub fn consolidate(reports: Vec<LocationReport>, tz: Tz) -> Option<Consolidated> {
    let total_records: usize = reports.iter().map(|r| r.records.len()).sum();
    if total_records == 0 {
        return None;
    }

    let all_records: Vec<TransactionRecord> = reports
        .iter()
        .flat_map(|r| r.records.iter().cloned())
        .collect();
    let combined = analyze(&all_records, tz);

    let total_revenue: i64 = reports.iter().map(|r| r.analysis.total_revenue).sum();
    let total_vehicles: u32 = reports.iter().map(|r| r.analysis.total_vehicles).sum();

    let comparison = reports
        .iter()
        .map(|r| LocationShare {
            location_name: r.location_name.clone(),
            revenue: r.analysis.total_revenue,
            vehicles: r.analysis.total_vehicles,
            revenue_share: if total_revenue > 0 {
                r.analysis.total_revenue as f64 / total_revenue as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    Some(Consolidated {
        locations: reports,
        combined,
        total_revenue,
        total_vehicles,
        comparison,
    })
}

/// Fetch and aggregate each assigned location in turn.
///
/// A single location's fetch failure is logged and that location omitted
/// (best-effort fan-out). Only when *every* fetch failed does the owner's
/// processing fail — reporting that as "no data" would mask the fault.
pub async fn consolidate_for_owner(
    store: &dyn ReportStore,
    assigned: &[Location],
    day: NaiveDate,
    tz: Tz,
) -> Result<Option<Consolidated>, BoxError> {
    let mut reports = Vec::with_capacity(assigned.len());
    let mut failed = 0usize;

    for location in assigned {
        match store.approved_logs_for_day(Some(&location.id), day).await {
            Ok(records) => {
                let analysis = analyze(&records, tz);
                reports.push(LocationReport {
                    location_id: location.id.clone(),
                    location_name: location.name.clone(),
                    analysis,
                    records,
                });
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(
                    location = %location.id,
                    error = %e,
                    "Location fetch failed, omitting from report"
                );
            }
        }
    }

    if reports.is_empty() && failed > 0 {
        return Err(format!("all {failed} location fetches failed").into());
    }

    Ok(consolidate(reports, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ApprovalStatus, TransactionRecord};
    use chrono::{TimeZone, Utc};
    use chrono_tz::Asia::Kolkata;

    fn locations() -> Vec<Location> {
        vec![
            Location { id: "loc-1".into(), name: "MG Road".into() },
            Location { id: "loc-2".into(), name: "Fort".into() },
            Location { id: "loc-3".into(), name: "Marine Drive".into() },
        ]
    }

    fn record(location: &str, amount: i64) -> TransactionRecord {
        TransactionRecord {
            id: 0,
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 4, 45, 0).unwrap(),
            approval_status: ApprovalStatus::Approved,
            location_id: Some(location.into()),
            vehicle_number: None,
            vehicle_type: None,
            vehicle_model: None,
            customer_name: None,
            customer_phone: None,
            service: Some("Wash".into()),
            amount,
            payment_mode: Some("Cash".into()),
            upi_account_name: None,
            entry_type: None,
        }
    }

    fn report(location_id: &str, name: &str, records: Vec<TransactionRecord>) -> LocationReport {
        let analysis = analyze(&records, Kolkata);
        LocationReport {
            location_id: location_id.into(),
            location_name: name.into(),
            analysis,
            records,
        }
    }

    #[test]
    fn test_absent_assignment_means_all_locations() {
        let all = locations();
        assert_eq!(resolve_assigned_locations(None, &all, None).len(), 3);
        assert_eq!(resolve_assigned_locations(Some("  "), &all, None).len(), 3);
    }

    #[test]
    fn test_single_id_assignment() {
        let all = locations();
        let resolved = resolve_assigned_locations(Some("loc-2"), &all, None);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Fort");
    }

    #[test]
    fn test_comma_separated_assignment() {
        let all = locations();
        let resolved = resolve_assigned_locations(Some("loc-3, loc-1"), &all, None);
        let names: Vec<&str> = resolved.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Marine Drive", "MG Road"]);
    }

    #[test]
    fn test_json_array_assignment() {
        let all = locations();
        let resolved = resolve_assigned_locations(Some(r#"["loc-1","loc-2"]"#), &all, None);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_unknown_ids_are_dropped() {
        let all = locations();
        let resolved = resolve_assigned_locations(Some("loc-1,ghost"), &all, None);
        assert_eq!(resolved.len(), 1);
        assert!(resolve_assigned_locations(Some("ghost"), &all, None).is_empty());
    }

    #[test]
    fn test_override_ids_win_over_assignment() {
        let all = locations();
        let override_ids = vec!["loc-3".to_string()];
        let resolved = resolve_assigned_locations(Some("loc-1"), &all, Some(&override_ids));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "loc-3");
    }

    #[test]
    fn test_no_data_when_every_location_is_empty() {
        let reports = vec![report("loc-1", "MG Road", vec![]), report("loc-2", "Fort", vec![])];
        assert!(consolidate(reports, Kolkata).is_none());
    }

    #[test]
    fn test_zero_amount_record_is_data_not_no_data() {
        let reports = vec![
            report("loc-1", "MG Road", vec![record("loc-1", 0)]),
            report("loc-2", "Fort", vec![]),
        ];
        let consolidated = consolidate(reports, Kolkata).expect("one real record is data");
        assert_eq!(consolidated.total_revenue, 0);
        assert_eq!(consolidated.total_vehicles, 1);
        assert_eq!(consolidated.comparison[0].revenue_share, 0.0);
    }

    #[test]
    fn test_consolidated_totals_and_comparison() {
        let reports = vec![
            report("loc-1", "MG Road", vec![record("loc-1", 600), record("loc-1", 150)]),
            report("loc-2", "Fort", vec![record("loc-2", 250)]),
        ];
        let consolidated = consolidate(reports, Kolkata).unwrap();

        assert_eq!(consolidated.total_revenue, 1000);
        assert_eq!(consolidated.total_vehicles, 3);
        assert_eq!(consolidated.combined.total_revenue, 1000);
        assert_eq!(consolidated.combined.total_vehicles, 3);

        assert_eq!(consolidated.comparison.len(), 2);
        assert_eq!(consolidated.comparison[0].location_name, "MG Road");
        assert_eq!(consolidated.comparison[0].revenue_share, 75.0);
        assert_eq!(consolidated.comparison[1].revenue_share, 25.0);
    }

    #[test]
    fn test_single_location_is_a_valid_degenerate_consolidation() {
        let reports = vec![report("loc-1", "MG Road", vec![record("loc-1", 600)])];
        let consolidated = consolidate(reports, Kolkata).unwrap();
        assert_eq!(consolidated.locations.len(), 1);
        assert_eq!(consolidated.comparison.len(), 1);
        assert_eq!(consolidated.comparison[0].revenue_share, 100.0);
    }
}
