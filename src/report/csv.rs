//! CSV projections of a day's data
//!
//! Three flat documents per contributing location: the per-record detail
//! report, the payment breakdown, and the service breakdown. Each returns
//! an empty string when there is nothing to report — callers must check
//! before attaching, a header-only CSV is never produced.

use chrono_tz::Tz;

use crate::db::{Location, TransactionRecord};
use crate::report::analysis::Analysis;
use crate::util::{format_record_time, group_thousands};

/// Escape one field: quote iff it contains a comma, quote, CR or LF;
/// double embedded quotes; collapse any line break inside the field to a
/// single space before quoting.
pub fn escape_csv(value: &str) -> String {
    let trimmed = value.trim();
    if !trimmed.contains([',', '"', '\n', '\r']) {
        return trimmed.to_string();
    }
    let flattened = trimmed
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('"', "\"\"");
    format!("\"{flattened}\"")
}

fn push_row(lines: &mut Vec<String>, fields: &[String]) {
    lines.push(
        fields
            .iter()
            .map(|f| escape_csv(f))
            .collect::<Vec<_>>()
            .join(","),
    );
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Per-record detail report. Location names are looked up from the shared
/// reference list; unknown ids render as "Unknown".
pub fn detail_report_csv(
    records: &[TransactionRecord],
    locations: &[Location],
    tz: Tz,
) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut lines = vec![
        "Vehicle Number,Owner Name,Phone,Vehicle Model,Service Type,Price,Payment Mode,\
         UPI Account,Entry Type,Date,Location"
            .to_string(),
    ];

    for rec in records {
        let location_name = rec
            .location_id
            .as_deref()
            .and_then(|id| locations.iter().find(|l| l.id == id))
            .map(|l| l.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        push_row(
            &mut lines,
            &[
                opt(&rec.vehicle_number),
                opt(&rec.customer_name),
                opt(&rec.customer_phone),
                opt(&rec.vehicle_model),
                opt(&rec.service),
                rec.amount.to_string(),
                opt(&rec.payment_mode),
                opt(&rec.upi_account_name),
                opt(&rec.entry_type),
                format_record_time(rec.created_at, tz),
                location_name,
            ],
        );
    }

    lines.join("\n")
}

/// Payment-mode breakdown, UPI accounts summarized into one cell.
pub fn payment_breakdown_csv(analysis: &Analysis) -> String {
    if analysis.payment_breakdown.is_empty() {
        return String::new();
    }

    let mut lines =
        vec!["Payment Mode,Total Revenue,Vehicle Count,Percentage of Total,UPI Accounts".to_string()];

    for item in &analysis.payment_breakdown {
        let upi_accounts = if item.upi_accounts.is_empty() {
            "N/A".to_string()
        } else {
            item.upi_accounts
                .iter()
                .map(|a| {
                    format!(
                        "{}: ₹{} ({} vehicles)",
                        a.name,
                        group_thousands(a.amount),
                        a.count
                    )
                })
                .collect::<Vec<_>>()
                .join("; ")
        };

        push_row(
            &mut lines,
            &[
                item.mode.clone(),
                item.revenue.to_string(),
                item.count.to_string(),
                format!("{:.1}%", item.percentage),
                upi_accounts,
            ],
        );
    }

    lines.join("\n")
}

/// Service breakdown with rounded average price per service.
pub fn service_breakdown_csv(analysis: &Analysis) -> String {
    if analysis.service_breakdown.is_empty() {
        return String::new();
    }

    let mut lines = vec![
        "Service Type,Total Revenue,Vehicle Count,Average Price,Percentage of Revenue".to_string(),
    ];

    for item in &analysis.service_breakdown {
        push_row(
            &mut lines,
            &[
                item.service.clone(),
                item.revenue.to_string(),
                item.count.to_string(),
                format!("{}", item.average_price.round() as i64),
                format!("{:.1}%", item.revenue_share),
            ],
        );
    }

    lines.join("\n")
}
