//! Email body rendering
//!
//! Three interchangeable HTML templates selected per owner, all consuming
//! the same [`Analysis`] contract, plus the plaintext fallback and the
//! system bodies (no-data notification, operator run summary). Rendering
//! is pure string assembly — no I/O, no business logic.

pub mod classic;
pub mod enhanced;
pub mod insight;
pub mod system;

use serde::{Deserialize, Serialize};

use crate::report::{Analysis, LocationShare};
use crate::util::group_thousands;

/// Owner-selected report template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateChoice {
    /// Template 1 — classic business tables
    Classic,
    /// Template 2 — enhanced cards and CSS bars
    Enhanced,
    /// Template 3 — business-intelligence wording and visuals
    Insight,
}

impl TemplateChoice {
    /// Map a stored template number to a choice. Anything but 2 or 3
    /// (including absent) falls back to the classic template.
    pub fn from_number(n: Option<i64>) -> Self {
        match n {
            Some(2) => TemplateChoice::Enhanced,
            Some(3) => TemplateChoice::Insight,
            _ => TemplateChoice::Classic,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            TemplateChoice::Classic => 1,
            TemplateChoice::Enhanced => 2,
            TemplateChoice::Insight => 3,
        }
    }

    /// Report type used in the subject line.
    pub fn report_title(self) -> &'static str {
        match self {
            TemplateChoice::Insight => "Business Intelligence Report",
            _ => "Daily Report",
        }
    }

    pub fn subject(self, date_label: &str, location_name: &str) -> String {
        format!("{} - {} - {}", self.report_title(), date_label, location_name)
    }

    /// Attachment filename prefixes: detail, payment, service.
    pub fn attachment_prefixes(self) -> [&'static str; 3] {
        match self {
            TemplateChoice::Insight => {
                ["transaction_report", "payment_analytics", "service_performance"]
            }
            _ => ["daily_report", "payment_breakdown", "service_breakdown"],
        }
    }
}

/// Everything a template needs to render one owner's report.
pub struct ReportView<'a> {
    pub analysis: &'a Analysis,
    /// Per-location shares; templates show the comparison table only when
    /// more than one location contributed
    pub comparison: &'a [LocationShare],
    pub location_name: &'a str,
    pub date_label: &'a str,
    pub generated_at: &'a str,
}

/// Render the owner's chosen HTML template.
pub fn render_report(choice: TemplateChoice, view: &ReportView<'_>) -> String {
    match choice {
        TemplateChoice::Classic => classic::render(view),
        TemplateChoice::Enhanced => enhanced::render(view),
        TemplateChoice::Insight => insight::render(view),
    }
}

/// Plaintext alternative part for the report email.
pub fn plain_text_report(choice: TemplateChoice, view: &ReportView<'_>) -> String {
    let insight = choice == TemplateChoice::Insight;
    let analysis = view.analysis;

    let mut text = format!(
        "{} - {}\n\nLocation: {}\nTotal Revenue: ₹{}\n{}: {}\nAverage {}: ₹{}\n",
        if insight { "Business Intelligence Report" } else { "Daily Business Report" },
        view.date_label,
        view.location_name,
        group_thousands(analysis.total_revenue),
        if insight { "Transactions" } else { "Vehicles Served" },
        analysis.total_vehicles,
        if insight { "Transaction" } else { "Service" },
        analysis.avg_service.round() as i64,
    );

    text.push_str("\nPAYMENT BREAKDOWN:\n");
    for item in &analysis.payment_breakdown {
        text.push_str(&format!(
            "{}: ₹{} ({} {}, {:.1}%)\n",
            item.mode,
            group_thousands(item.revenue),
            item.count,
            if insight { "transactions" } else { "vehicles" },
            item.percentage,
        ));
    }

    text.push_str("\nSERVICE BREAKDOWN:\n");
    for item in &analysis.service_breakdown {
        text.push_str(&format!(
            "{}: {} {}, ₹{} revenue (avg ₹{})\n",
            item.service,
            item.count,
            if insight { "services" } else { "vehicles" },
            group_thousands(item.revenue),
            item.average_price.round() as i64,
        ));
    }

    if view.comparison.len() > 1 {
        text.push_str("\nLOCATION COMPARISON:\n");
        for share in view.comparison {
            text.push_str(&format!(
                "{}: ₹{} ({} vehicles, {:.1}% of total)\n",
                share.location_name,
                group_thousands(share.revenue),
                share.vehicles,
                share.revenue_share,
            ));
        }
    }

    text.push_str(&format!("\nGenerated on: {}\n", view.generated_at));
    text
}

/// Minimal HTML escaping for values interpolated into template markup.
pub(crate) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::analyze;
    use chrono_tz::Asia::Kolkata;

    fn view_fixture(analysis: &Analysis) -> ReportView<'_> {
        ReportView {
            analysis,
            comparison: &[],
            location_name: "MG Road",
            date_label: "15/03/2024",
            generated_at: "15/03/2024 at 21:00",
        }
    }

    #[test]
    fn test_from_number_defaults_to_classic() {
        assert_eq!(TemplateChoice::from_number(None), TemplateChoice::Classic);
        assert_eq!(TemplateChoice::from_number(Some(1)), TemplateChoice::Classic);
        assert_eq!(TemplateChoice::from_number(Some(2)), TemplateChoice::Enhanced);
        assert_eq!(TemplateChoice::from_number(Some(3)), TemplateChoice::Insight);
        assert_eq!(TemplateChoice::from_number(Some(99)), TemplateChoice::Classic);
    }

    #[test]
    fn test_subjects_embed_type_date_and_location() {
        assert_eq!(
            TemplateChoice::Classic.subject("15/03/2024", "MG Road"),
            "Daily Report - 15/03/2024 - MG Road"
        );
        assert_eq!(
            TemplateChoice::Insight.subject("15/03/2024", "MG Road"),
            "Business Intelligence Report - 15/03/2024 - MG Road"
        );
    }

    #[test]
    fn test_each_template_renders_the_totals() {
        let analysis = analyze(&[], Kolkata);
        for choice in [TemplateChoice::Classic, TemplateChoice::Enhanced, TemplateChoice::Insight] {
            let html = render_report(choice, &view_fixture(&analysis));
            assert!(html.starts_with("<!DOCTYPE html>"));
            assert!(html.contains("MG Road"));
            assert!(html.contains("15/03/2024"));
        }
    }

    #[test]
    fn test_plain_text_variants() {
        let analysis = analyze(&[], Kolkata);
        let view = view_fixture(&analysis);

        let classic = plain_text_report(TemplateChoice::Classic, &view);
        assert!(classic.contains("Daily Business Report"));
        assert!(classic.contains("Vehicles Served: 0"));

        let insight = plain_text_report(TemplateChoice::Insight, &view);
        assert!(insight.contains("Business Intelligence Report"));
        assert!(insight.contains("Transactions: 0"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A & B <Motors>"), "A &amp; B &lt;Motors&gt;");
    }
}
