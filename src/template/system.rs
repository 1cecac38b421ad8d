//! System email bodies: no-data notification and operator run summary

use super::escape_html;
use crate::orchestrator::{OutcomeStatus, RunSummary};
use crate::util::group_thousands;

/// Lightweight notification sent when an owner's locations produced no
/// approved records for the day.
pub fn no_data_html(location_name: &str, date_label: &str, generated_at: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>No Data Report</title>
</head>
<body style="margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f5f5f5;">
  <div style="max-width: 600px; margin: 40px auto; background-color: #ffffff; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 8px rgba(0,0,0,0.1);">

    <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 32px 24px; text-align: center;">
      <h1 style="margin: 0; font-size: 28px; font-weight: 600;">No Data Today</h1>
      <p style="margin: 8px 0 0 0; font-size: 14px; opacity: 0.9;">{date}</p>
    </div>

    <div style="padding: 40px 24px;">
      <div style="background-color: #f8f9fa; border-left: 4px solid #667eea; padding: 20px; border-radius: 4px; margin-bottom: 24px;">
        <h2 style="margin: 0 0 8px 0; font-size: 18px; color: #333;">Location: {location}</h2>
        <p style="margin: 0; color: #666; font-size: 14px;">No approved transactions were recorded for today.</p>
      </div>

      <div style="text-align: center; padding: 20px; background-color: #fff3cd; border-radius: 4px; border: 1px solid #ffc107;">
        <p style="margin: 0; color: #856404; font-size: 15px;">
          There are no approved logs to report for {date}.
        </p>
      </div>
    </div>

    <div style="background-color: #f8f9fa; padding: 20px 24px; border-top: 1px solid #e9ecef; text-align: center;">
      <p style="margin: 0; color: #6c757d; font-size: 12px;">
        Report generated on {generated_at}
      </p>
    </div>

  </div>
</body>
</html>
"#,
        date = date_label,
        location = escape_html(location_name),
        generated_at = generated_at,
    )
}

pub fn no_data_text(location_name: &str, date_label: &str, generated_at: &str) -> String {
    format!(
        "No Data Report - {date_label}\n\n\
         Location: {location_name}\n\
         Status: No approved transactions recorded for today.\n\n\
         Generated on: {generated_at}\n"
    )
}

/// Operator summary: stat tiles plus the full per-owner outcome table.
pub fn summary_html(summary: &RunSummary, date_label: &str, generated_at: &str) -> String {
    let mut results_rows = String::new();
    for result in &summary.results {
        let (status_color, status_symbol) = match result.status {
            OutcomeStatus::Success => ("green", "✓"),
            OutcomeStatus::Failed => ("red", "✗"),
            OutcomeStatus::Skipped => ("orange", "⊘"),
        };
        let record_count = result
            .record_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let revenue = group_thousands(result.revenue.unwrap_or(0));
        let detail = result
            .error
            .as_deref()
            .or(result.reason.as_deref())
            .unwrap_or("N/A");

        results_rows.push_str(&format!(
            r#"<tr>
            <td style="padding: 10px; border-bottom: 1px solid #ddd; color: {status_color};">{status_symbol} {status}</td>
            <td style="padding: 10px; border-bottom: 1px solid #ddd;">{owner}</td>
            <td style="padding: 10px; border-bottom: 1px solid #ddd;">{email}</td>
            <td style="padding: 10px; border-bottom: 1px solid #ddd; text-align: center;">{record_count}</td>
            <td style="padding: 10px; border-bottom: 1px solid #ddd; text-align: right;">₹{revenue}</td>
            <td style="padding: 10px; border-bottom: 1px solid #ddd;">{template}</td>
            <td style="padding: 10px; border-bottom: 1px solid #ddd;">{detail}</td>
        </tr>
"#,
            status = result.status.label().to_uppercase(),
            owner = escape_html(&result.owner),
            email = escape_html(&result.email),
            template = result.template_used,
            detail = escape_html(detail),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Daily Reports Summary</title>
</head>
<body style="margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f5f5f5;">
  <div style="max-width: 1000px; margin: 40px auto; background-color: #ffffff; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 8px rgba(0,0,0,0.1);">

    <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 32px 24px; text-align: center;">
      <h1 style="margin: 0; font-size: 28px; font-weight: 600;">Daily Reports Summary</h1>
      <p style="margin: 8px 0 0 0; font-size: 14px; opacity: 0.9;">{date}</p>
    </div>

    <div style="padding: 40px 24px;">

      <div style="display: grid; grid-template-columns: 1fr 1fr 1fr 1fr; gap: 20px; margin-bottom: 30px;">
        <div style="background: #e8f5e9; border-left: 4px solid #4caf50; padding: 20px; border-radius: 4px;">
          <h3 style="margin: 0; color: #2e7d32; font-size: 24px;">{success_count}</h3>
          <p style="margin: 5px 0 0 0; color: #558b2f; font-size: 14px;">Successful</p>
        </div>
        <div style="background: #ffebee; border-left: 4px solid #f44336; padding: 20px; border-radius: 4px;">
          <h3 style="margin: 0; color: #c62828; font-size: 24px;">{failed_count}</h3>
          <p style="margin: 5px 0 0 0; color: #d32f2f; font-size: 14px;">Failed</p>
        </div>
        <div style="background: #fff3e0; border-left: 4px solid #ff9800; padding: 20px; border-radius: 4px;">
          <h3 style="margin: 0; color: #e65100; font-size: 24px;">{skipped_count}</h3>
          <p style="margin: 5px 0 0 0; color: #ef6c00; font-size: 14px;">Skipped</p>
        </div>
        <div style="background: #f3e5f5; border-left: 4px solid #9c27b0; padding: 20px; border-radius: 4px;">
          <h3 style="margin: 0; color: #6a1b9a; font-size: 24px;">{total_count}</h3>
          <p style="margin: 5px 0 0 0; color: #7b1fa2; font-size: 14px;">Total Owners</p>
        </div>
      </div>

      <div style="background-color: #f8f9fa; border: 1px solid #dee2e6; padding: 20px; border-radius: 4px; margin-bottom: 30px;">
        <h2 style="margin: 0 0 15px 0; font-size: 18px; color: #333;">Revenue Summary</h2>
        <p style="margin: 5px 0; color: #666; font-size: 14px;">Total Revenue: <strong style="font-size: 20px; color: #2e7d32;">₹{total_revenue}</strong></p>
        <p style="margin: 5px 0; color: #666; font-size: 14px;">Total Records: <strong>{total_records}</strong></p>
      </div>

      <h2 style="margin: 30px 0 15px 0; font-size: 18px; color: #333;">Detailed Results</h2>
      <table style="width: 100%; border-collapse: collapse; border: 1px solid #ddd;">
        <thead>
          <tr style="background-color: #f5f5f5;">
            <th style="padding: 12px; text-align: left; border-bottom: 2px solid #ddd; font-weight: 600;">Status</th>
            <th style="padding: 12px; text-align: left; border-bottom: 2px solid #ddd; font-weight: 600;">Owner</th>
            <th style="padding: 12px; text-align: left; border-bottom: 2px solid #ddd; font-weight: 600;">Email</th>
            <th style="padding: 12px; text-align: center; border-bottom: 2px solid #ddd; font-weight: 600;">Records</th>
            <th style="padding: 12px; text-align: right; border-bottom: 2px solid #ddd; font-weight: 600;">Revenue</th>
            <th style="padding: 12px; text-align: left; border-bottom: 2px solid #ddd; font-weight: 600;">Template</th>
            <th style="padding: 12px; text-align: left; border-bottom: 2px solid #ddd; font-weight: 600;">Error</th>
          </tr>
        </thead>
        <tbody>
          {results_rows}
        </tbody>
      </table>

    </div>

    <div style="background-color: #f8f9fa; padding: 20px 24px; border-top: 1px solid #e9ecef; text-align: center;">
      <p style="margin: 0; color: #6c757d; font-size: 12px;">
        Report generated on {generated_at}
      </p>
    </div>

  </div>
</body>
</html>
"#,
        date = date_label,
        success_count = summary.success_count,
        failed_count = summary.failed_count,
        skipped_count = summary.skipped_count,
        total_count = summary.total_count,
        total_revenue = group_thousands(summary.total_revenue),
        total_records = summary.total_records,
        generated_at = generated_at,
    )
}

pub fn summary_text(summary: &RunSummary, date_label: &str, generated_at: &str) -> String {
    format!(
        "Daily Reports Summary - {date_label}\n\n\
         Successful: {}\n\
         Failed: {}\n\
         Skipped: {}\n\
         Total Owners: {}\n\n\
         Total Revenue: ₹{}\n\
         Total Records: {}\n\n\
         Generated on: {generated_at}\n",
        summary.success_count,
        summary.failed_count,
        summary.skipped_count,
        summary.total_count,
        group_thousands(summary.total_revenue),
        summary.total_records,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::OwnerOutcome;

    fn summary_fixture() -> RunSummary {
        let mut summary = RunSummary::new("15/03/2024");
        summary.record(OwnerOutcome::success(
            "Anita Menon".into(),
            "anita@example.com".into(),
            3,
            1500,
            "MG Road".into(),
            1,
            "full-report",
        ));
        summary.record(OwnerOutcome::failed(
            "B. Kumar".into(),
            "bk@example.com".into(),
            2,
            "SES rejected recipient".into(),
        ));
        summary.record(OwnerOutcome::skipped(
            "C. Das".into(),
            "No email".into(),
            1,
            "No email address".into(),
        ));
        summary
    }

    #[test]
    fn test_no_data_bodies_mention_location_and_date() {
        let html = no_data_html("MG Road", "15/03/2024", "15/03/2024 at 21:00");
        assert!(html.contains("No Data Today"));
        assert!(html.contains("Location: MG Road"));
        assert!(html.contains("15/03/2024"));

        let text = no_data_text("MG Road", "15/03/2024", "15/03/2024 at 21:00");
        assert!(text.contains("Location: MG Road"));
    }

    #[test]
    fn test_summary_html_renders_counters_and_rows() {
        let summary = summary_fixture();
        let html = summary_html(&summary, "15/03/2024", "15/03/2024 at 21:00");
        assert!(html.contains("Daily Reports Summary"));
        assert!(html.contains("✓ SUCCESS"));
        assert!(html.contains("✗ FAILED"));
        assert!(html.contains("⊘ SKIPPED"));
        assert!(html.contains("anita@example.com"));
        assert!(html.contains("SES rejected recipient"));
        assert!(html.contains("₹1,500"));
    }

    #[test]
    fn test_summary_text_counters() {
        let summary = summary_fixture();
        let text = summary_text(&summary, "15/03/2024", "15/03/2024 at 21:00");
        assert!(text.contains("Successful: 1"));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("Skipped: 1"));
        assert!(text.contains("Total Owners: 3"));
    }
}
