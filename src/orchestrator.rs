//! Run orchestrator
//!
//! Drives one run end to end: resolve recipients, process each owner in
//! turn (consolidate → render → attach → send), accumulate the run
//! summary, and dispatch the operator summary email. Owner processing is
//! strictly sequential and strictly isolated: one owner's failure becomes
//! a `failed` outcome and the run moves on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::db::{Location, Owner, ReportStore};
use crate::email::{Attachment, Mailer, OutgoingEmail};
use crate::error::{BoxError, ReportError};
use crate::report::csv;
use crate::report::consolidate::{consolidate_for_owner, resolve_assigned_locations};
use crate::template::{
    ReportView, TemplateChoice, plain_text_report, render_report, system,
};
use crate::util::{date_label, date_stamp, generated_at_label, location_slug, today_in};

/// Trigger payload. Everything is optional: an empty body means "process
/// the full owner table".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TriggerRequest {
    pub users: Option<Vec<ScheduledUser>>,
    pub trigger: Option<String>,
    pub email_override: Option<String>,
    pub templateno: Option<i64>,
    pub timezone: Option<String>,
    pub location_ids: Option<Vec<String>>,
}

/// One entry of an explicit schedule payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledUser {
    pub user_id: String,
    #[serde(default)]
    pub templateno: Option<i64>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// A resolved recipient for this run.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub owner: Owner,
    pub template: TemplateChoice,
    /// Stored but display-only: the fetch window and hour buckets always
    /// use the business timezone, never this field.
    pub timezone: Option<String>,
    /// Trigger-level location override (manual-trigger path)
    pub location_override: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failed,
    Skipped,
}

impl OutcomeStatus {
    pub fn label(self) -> &'static str {
        match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::Failed => "failed",
            OutcomeStatus::Skipped => "skipped",
        }
    }
}

/// Per-owner outcome record, serialized verbatim into the trigger response
/// and rendered into the operator summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerOutcome {
    pub status: OutcomeStatus,
    pub owner: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub template_used: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl OwnerOutcome {
    pub fn success(
        owner: String,
        email: String,
        record_count: u32,
        revenue: i64,
        location: String,
        template_used: u8,
        email_type: &'static str,
    ) -> Self {
        Self {
            status: OutcomeStatus::Success,
            owner,
            email,
            record_count: Some(record_count),
            revenue: Some(revenue),
            location: Some(location),
            template_used,
            email_type: Some(email_type),
            error: None,
            reason: None,
        }
    }

    pub fn failed(owner: String, email: String, template_used: u8, error: String) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            owner,
            email,
            record_count: None,
            revenue: None,
            location: None,
            template_used,
            email_type: None,
            error: Some(error),
            reason: None,
        }
    }

    pub fn skipped(owner: String, email: String, template_used: u8, reason: String) -> Self {
        Self {
            status: OutcomeStatus::Skipped,
            owner,
            email,
            record_count: None,
            revenue: None,
            location: None,
            template_used,
            email_type: None,
            error: None,
            reason: Some(reason),
        }
    }
}

/// Accumulated result of one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub success_count: u32,
    pub failed_count: u32,
    pub skipped_count: u32,
    pub total_count: u32,
    pub total_revenue: i64,
    pub total_records: u32,
    pub report_date: String,
    pub results: Vec<OwnerOutcome>,
}

impl RunSummary {
    pub fn new(report_date: &str) -> Self {
        Self {
            success_count: 0,
            failed_count: 0,
            skipped_count: 0,
            total_count: 0,
            total_revenue: 0,
            total_records: 0,
            report_date: report_date.to_string(),
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: OwnerOutcome) {
        self.total_count += 1;
        match outcome.status {
            OutcomeStatus::Success => {
                self.success_count += 1;
                self.total_revenue += outcome.revenue.unwrap_or(0);
                self.total_records += outcome.record_count.unwrap_or(0);
            }
            OutcomeStatus::Failed => self.failed_count += 1,
            OutcomeStatus::Skipped => self.skipped_count += 1,
        }
        self.results.push(outcome);
    }
}

/// Collaborators for one run, injected so tests can substitute fakes for
/// both the store and the mailer.
pub struct RunContext<'a> {
    pub store: &'a dyn ReportStore,
    pub mailer: &'a dyn Mailer,
    pub config: &'a Config,
}

/// One full run. Only configuration-class failures return `Err`; every
/// owner-level failure lands in the summary as an outcome record.
pub async fn run_reports(
    ctx: &RunContext<'_>,
    trigger: &TriggerRequest,
) -> Result<RunSummary, ReportError> {
    let config = ctx.config;
    let tz = config.business_timezone;
    let day = today_in(tz);
    let day_label = date_label(day);

    tracing::info!(
        date = %day_label,
        trigger = trigger.trigger.as_deref().unwrap_or("manual"),
        "Starting daily reports run"
    );
    if let Some(test_email) = &config.test_email {
        tracing::info!(%test_email, "TEST MODE: owner emails routed to the test address");
    }

    ctx.mailer
        .verify()
        .await
        .map_err(|e| ReportError::Config(format!("SES configuration invalid: {e}")))?;

    let locations = ctx.store.locations().await.map_err(ReportError::Store)?;
    if locations.is_empty() {
        return Err(ReportError::Config("no locations found".into()));
    }
    tracing::info!(count = locations.len(), "Locations loaded");

    let mut summary = RunSummary::new(&day_label);
    let recipients = resolve_recipients(ctx, trigger, &mut summary).await?;
    tracing::info!(count = recipients.len(), "Recipients resolved");

    for recipient in &recipients {
        let outcome = process_owner(ctx, recipient, &locations, day, &day_label).await;
        summary.record(outcome);
    }

    // Operator summary is best-effort: a send failure here is logged and
    // never changes the run's own outcome.
    let generated_at = generated_at_label(tz);
    let summary_email = OutgoingEmail {
        from: config.ses_from_email.clone(),
        to: config.summary_email.clone(),
        subject: format!("Daily Reports Summary - {day_label}"),
        html: system::summary_html(&summary, &day_label, &generated_at),
        text: system::summary_text(&summary, &day_label, &generated_at),
        attachments: Vec::new(),
    };
    match ctx.mailer.send(&summary_email).await {
        Ok(_) => tracing::info!(to = %config.summary_email, "Summary report sent"),
        Err(e) => tracing::error!(error = %e, "Failed to send summary report"),
    }

    tracing::info!(
        sent = summary.success_count,
        failed = summary.failed_count,
        skipped = summary.skipped_count,
        revenue = summary.total_revenue,
        records = summary.total_records,
        "Daily reports run complete"
    );
    Ok(summary)
}

/// Resolve the recipient list. Exactly one path executes per run:
/// per-request override > explicit schedule payload > full owner table.
async fn resolve_recipients(
    ctx: &RunContext<'_>,
    trigger: &TriggerRequest,
    summary: &mut RunSummary,
) -> Result<Vec<Recipient>, ReportError> {
    let config = ctx.config;
    let template_or_default = |n: Option<i64>| {
        n.map(|n| TemplateChoice::from_number(Some(n)))
            .unwrap_or(config.default_template)
    };

    if let Some(email) = trigger.email_override.as_deref().filter(|e| !e.is_empty()) {
        let owner = Owner {
            id: "manual-trigger".into(),
            email: Some(email.to_string()),
            first_name: None,
            last_name: None,
            name: Some("Manual trigger".into()),
            assigned_location: None,
            templateno: trigger.templateno,
        };
        return Ok(vec![Recipient {
            owner,
            template: template_or_default(trigger.templateno),
            timezone: trigger.timezone.clone(),
            location_override: trigger.location_ids.clone(),
        }]);
    }

    if let Some(users) = &trigger.users {
        let mut recipients = Vec::with_capacity(users.len());
        for user in users {
            let Some(owner) = ctx
                .store
                .owner_by_id(&user.user_id)
                .await
                .map_err(ReportError::Store)?
            else {
                tracing::warn!(user_id = %user.user_id, "Scheduled user not found");
                summary.record(OwnerOutcome::skipped(
                    user.user_id.clone(),
                    "Unknown user".into(),
                    config.default_template.number(),
                    "User not found".into(),
                ));
                continue;
            };

            let schedule = ctx
                .store
                .schedule_for(&user.user_id)
                .await
                .map_err(ReportError::Store)?;
            let templateno = user
                .templateno
                .or(schedule.as_ref().and_then(|s| s.templateno))
                .or(owner.templateno);
            let timezone = user
                .timezone
                .clone()
                .or(schedule.and_then(|s| s.timezone));

            recipients.push(Recipient {
                owner,
                template: template_or_default(templateno),
                timezone,
                location_override: None,
            });
        }
        return Ok(recipients);
    }

    let owners = ctx.store.owners().await.map_err(ReportError::Store)?;
    Ok(owners
        .into_iter()
        .map(|owner| Recipient {
            template: template_or_default(owner.templateno),
            timezone: None,
            location_override: None,
            owner,
        })
        .collect())
}

/// Subject/report heading for an owner's location set.
fn location_label(assigned: &[Location], all: &[Location]) -> String {
    if assigned.len() == all.len() {
        "All Locations".to_string()
    } else if assigned.len() == 1 {
        assigned[0].name.clone()
    } else {
        assigned
            .iter()
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Process one owner. Never returns an error: skip paths produce
/// `skipped` outcomes and everything else that goes wrong becomes a
/// `failed` outcome for this owner alone.
async fn process_owner(
    ctx: &RunContext<'_>,
    recipient: &Recipient,
    locations: &[Location],
    day: NaiveDate,
    day_label: &str,
) -> OwnerOutcome {
    let owner = &recipient.owner;
    let template = recipient.template;

    let Some(owner_email) = owner.email.clone().filter(|e| !e.is_empty()) else {
        tracing::info!(owner = %owner.id, "Skipping owner: no email address");
        return OwnerOutcome::skipped(
            owner.display_name(),
            "No email".into(),
            template.number(),
            "No email address".into(),
        );
    };
    let to = ctx.config.test_email.clone().unwrap_or(owner_email);

    let assigned = resolve_assigned_locations(
        owner.assigned_location.as_deref(),
        locations,
        recipient.location_override.as_deref(),
    );
    if assigned.is_empty() {
        tracing::info!(owner = %owner.id, "Skipping owner: no resolvable locations");
        return OwnerOutcome::skipped(
            owner.display_name(),
            to,
            template.number(),
            "No resolvable locations".into(),
        );
    }

    let location_name = location_label(&assigned, locations);
    tracing::info!(
        owner = %to,
        location = %location_name,
        template = template.number(),
        // Display only: the fetch window always uses the business timezone.
        timezone = recipient.timezone.as_deref().unwrap_or("default"),
        "Processing owner"
    );

    match send_owner_report(ctx, recipient, &to, &assigned, &location_name, day, day_label).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(owner = %to, error = %e, "Owner processing failed");
            OwnerOutcome::failed(owner.display_name(), to, template.number(), e.to_string())
        }
    }
}

async fn send_owner_report(
    ctx: &RunContext<'_>,
    recipient: &Recipient,
    to: &str,
    assigned: &[Location],
    location_name: &str,
    day: NaiveDate,
    day_label: &str,
) -> Result<OwnerOutcome, BoxError> {
    let config = ctx.config;
    let owner = &recipient.owner;
    let template = recipient.template;
    let tz = config.business_timezone;
    let generated_at = generated_at_label(tz);

    let consolidated = consolidate_for_owner(ctx.store, assigned, day, tz)
        .await
        .map_err(|e| -> BoxError { format!("Failed to fetch data: {e}").into() })?;

    let Some(consolidated) = consolidated else {
        let email = OutgoingEmail {
            from: config.ses_from_email.clone(),
            to: to.to_string(),
            subject: format!("No Data Today - {day_label} - {location_name}"),
            html: system::no_data_html(location_name, day_label, &generated_at),
            text: system::no_data_text(location_name, day_label, &generated_at),
            attachments: Vec::new(),
        };
        ctx.mailer.send(&email).await?;
        tracing::info!(owner = %to, "No-data notification sent");
        return Ok(OwnerOutcome::success(
            owner.display_name(),
            to.to_string(),
            0,
            0,
            location_name.to_string(),
            template.number(),
            "no-data",
        ));
    };

    let view = ReportView {
        analysis: &consolidated.combined,
        comparison: &consolidated.comparison,
        location_name,
        date_label: day_label,
        generated_at: &generated_at,
    };
    let html = render_report(template, &view);
    let text = plain_text_report(template, &view);

    // Three CSVs per contributing location.
    let [detail_prefix, payment_prefix, service_prefix] = template.attachment_prefixes();
    let stamp = date_stamp(day);
    let mut attachments = Vec::new();
    for location in consolidated.locations.iter().filter(|l| l.is_contributing()) {
        let slug = location_slug(&location.location_name);
        tracing::debug!(location = %location.location_id, count = location.records.len(), "Attaching CSV triple");
        attachments.push(Attachment {
            filename: format!("{detail_prefix}_{stamp}_{slug}.csv"),
            content: csv::detail_report_csv(&location.records, assigned, tz),
        });
        attachments.push(Attachment {
            filename: format!("{payment_prefix}_{stamp}_{slug}.csv"),
            content: csv::payment_breakdown_csv(&location.analysis),
        });
        attachments.push(Attachment {
            filename: format!("{service_prefix}_{stamp}_{slug}.csv"),
            content: csv::service_breakdown_csv(&location.analysis),
        });
    }

    let email = OutgoingEmail {
        from: config.ses_from_email.clone(),
        to: to.to_string(),
        subject: template.subject(day_label, location_name),
        html,
        text,
        attachments,
    };
    ctx.mailer.send(&email).await?;

    tracing::info!(
        owner = %to,
        records = consolidated.total_vehicles,
        revenue = consolidated.total_revenue,
        template = template.number(),
        "Report sent"
    );

    Ok(OwnerOutcome::success(
        owner.display_name(),
        to.to_string(),
        consolidated.total_vehicles,
        consolidated.total_revenue,
        location_name.to_string(),
        template.number(),
        "full-report",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ApprovalStatus, ReportSchedule, TransactionRecord};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://unused".into(),
            http_port: 0,
            environment: "test".into(),
            service_role_key: "service-key".into(),
            anon_key: "anon-key".into(),
            ses_from_email: "reports@example.com".into(),
            summary_email: "ops@example.com".into(),
            test_email: None,
            default_template: TemplateChoice::Classic,
            business_timezone: chrono_tz::Asia::Kolkata,
        }
    }

    fn owner(id: &str, email: Option<&str>, assigned: Option<&str>) -> Owner {
        Owner {
            id: id.into(),
            email: email.map(Into::into),
            first_name: None,
            last_name: None,
            name: Some(id.to_string()),
            assigned_location: assigned.map(Into::into),
            templateno: None,
        }
    }

    fn record(location: &str, amount: i64) -> TransactionRecord {
        TransactionRecord {
            id: 0,
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 4, 45, 0).unwrap(),
            approval_status: ApprovalStatus::Approved,
            location_id: Some(location.into()),
            vehicle_number: None,
            vehicle_type: Some("Car".into()),
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

    #[derive(Default)]
    struct FakeStore {
        locations: Vec<Location>,
        owners: Vec<Owner>,
        schedules: Vec<ReportSchedule>,
        logs_by_location: HashMap<String, Vec<TransactionRecord>>,
        failing_locations: HashSet<String>,
    }

    #[async_trait]
    impl ReportStore for FakeStore {
        async fn locations(&self) -> Result<Vec<Location>, BoxError> {
            Ok(self.locations.clone())
        }

        async fn owners(&self) -> Result<Vec<Owner>, BoxError> {
            Ok(self.owners.clone())
        }

        async fn owner_by_id(&self, id: &str) -> Result<Option<Owner>, BoxError> {
            Ok(self.owners.iter().find(|o| o.id == id).cloned())
        }

        async fn schedule_for(&self, user_id: &str) -> Result<Option<ReportSchedule>, BoxError> {
            Ok(self.schedules.iter().find(|s| s.user_id == user_id).cloned())
        }

        async fn approved_logs_for_day(
            &self,
            location_id: Option<&str>,
            _day: NaiveDate,
        ) -> Result<Vec<TransactionRecord>, BoxError> {
            let id = location_id.expect("fan-out always scopes by location");
            if self.failing_locations.contains(id) {
                return Err("query failed".into());
            }
            Ok(self.logs_by_location.get(id).cloned().unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct FakeMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        async fn verify(&self) -> Result<(), BoxError> {
            Ok(())
        }

        async fn send(&self, email: &OutgoingEmail) -> Result<String, BoxError> {
            if self.fail_for.as_deref() == Some(email.to.as_str()) {
                return Err("SES rejected recipient".into());
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok("msg-0001".into())
        }
    }

    fn two_location_store() -> FakeStore {
        FakeStore {
            locations: vec![
                Location { id: "loc-1".into(), name: "MG Road".into() },
                Location { id: "loc-2".into(), name: "Fort".into() },
            ],
            owners: vec![
                owner("u-1", Some("one@example.com"), Some("loc-1")),
                owner("u-2", Some("two@example.com"), Some("loc-2")),
                owner("u-3", Some("three@example.com"), Some("loc-1")),
            ],
            logs_by_location: HashMap::from([
                ("loc-1".to_string(), vec![record("loc-1", 500), record("loc-1", 300)]),
                ("loc-2".to_string(), vec![record("loc-2", 250)]),
            ]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_owner_isolation_one_failing_send() {
        let store = two_location_store();
        let mailer = FakeMailer {
            fail_for: Some("two@example.com".into()),
            ..Default::default()
        };
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let summary = run_reports(&ctx, &TriggerRequest::default()).await.unwrap();

        assert_eq!(summary.results.len(), 3);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failed_count, 1);
        let failed = summary
            .results
            .iter()
            .find(|r| r.status == OutcomeStatus::Failed)
            .unwrap();
        assert_eq!(failed.email, "two@example.com");
        assert!(failed.error.as_deref().unwrap().contains("SES rejected"));

        // Failed owner contributes nothing to the running totals.
        assert_eq!(summary.total_revenue, 1600);
        assert_eq!(summary.total_records, 4);

        // The operator summary still went out after the failure.
        let sent = mailer.sent.lock().unwrap();
        assert!(sent.iter().any(|e| e.to == "ops@example.com"));
    }

    #[tokio::test]
    async fn test_owner_without_email_is_skipped_not_failed() {
        let mut store = two_location_store();
        store.owners.push(owner("u-4", None, Some("loc-1")));
        let mailer = FakeMailer::default();
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let summary = run_reports(&ctx, &TriggerRequest::default()).await.unwrap();

        assert_eq!(summary.skipped_count, 1);
        let skipped = summary
            .results
            .iter()
            .find(|r| r.status == OutcomeStatus::Skipped)
            .unwrap();
        assert_eq!(skipped.reason.as_deref(), Some("No email address"));
    }

    #[tokio::test]
    async fn test_owner_with_unresolvable_location_is_skipped() {
        let mut store = two_location_store();
        store.owners = vec![owner("u-1", Some("one@example.com"), Some("ghost"))];
        let mailer = FakeMailer::default();
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let summary = run_reports(&ctx, &TriggerRequest::default()).await.unwrap();
        assert_eq!(summary.skipped_count, 1);
        assert_eq!(summary.results[0].reason.as_deref(), Some("No resolvable locations"));
    }

    #[tokio::test]
    async fn test_no_data_owner_gets_notification_not_report() {
        let mut store = two_location_store();
        store.logs_by_location.remove("loc-2");
        let mailer = FakeMailer::default();
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let summary = run_reports(&ctx, &TriggerRequest::default()).await.unwrap();

        let no_data = summary
            .results
            .iter()
            .find(|r| r.email == "two@example.com")
            .unwrap();
        assert_eq!(no_data.status, OutcomeStatus::Success);
        assert_eq!(no_data.email_type, Some("no-data"));
        assert_eq!(no_data.record_count, Some(0));

        let sent = mailer.sent.lock().unwrap();
        let email = sent.iter().find(|e| e.to == "two@example.com").unwrap();
        assert!(email.subject.starts_with("No Data Today"));
        assert!(email.attachments.is_empty());
    }

    #[tokio::test]
    async fn test_multi_location_owner_with_partial_data_gets_full_report() {
        let mut store = two_location_store();
        store.logs_by_location.remove("loc-2");
        store.owners = vec![owner("u-1", Some("multi@example.com"), Some("loc-1,loc-2"))];
        let mailer = FakeMailer::default();
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let summary = run_reports(&ctx, &TriggerRequest::default()).await.unwrap();

        let outcome = &summary.results[0];
        assert_eq!(outcome.email_type, Some("full-report"));
        assert_eq!(outcome.record_count, Some(2));

        // Only the contributing location gets its CSV triple.
        let sent = mailer.sent.lock().unwrap();
        let email = sent.iter().find(|e| e.to == "multi@example.com").unwrap();
        assert_eq!(email.attachments.len(), 3);
        assert!(email.attachments[0].filename.contains("mg-road"));
    }

    #[tokio::test]
    async fn test_one_location_fetch_failure_is_contained() {
        let mut store = two_location_store();
        store.owners = vec![owner("u-1", Some("multi@example.com"), Some("loc-1,loc-2"))];
        store.failing_locations.insert("loc-2".into());
        let mailer = FakeMailer::default();
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let summary = run_reports(&ctx, &TriggerRequest::default()).await.unwrap();
        let outcome = &summary.results[0];
        assert_eq!(outcome.status, OutcomeStatus::Success);
        // loc-2 is omitted, so only loc-1's revenue shows up.
        assert_eq!(outcome.revenue, Some(800));
    }

    #[tokio::test]
    async fn test_all_location_fetches_failing_fails_the_owner() {
        let mut store = two_location_store();
        store.owners = vec![owner("u-1", Some("one@example.com"), Some("loc-1"))];
        store.failing_locations.insert("loc-1".into());
        let mailer = FakeMailer::default();
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let summary = run_reports(&ctx, &TriggerRequest::default()).await.unwrap();
        assert_eq!(summary.failed_count, 1);
        assert!(summary.results[0].error.as_deref().unwrap().contains("Failed to fetch data"));
    }

    #[tokio::test]
    async fn test_email_override_resolves_one_synthetic_recipient() {
        let store = two_location_store();
        let mailer = FakeMailer::default();
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let trigger = TriggerRequest {
            email_override: Some("qa@example.com".into()),
            templateno: Some(3),
            location_ids: Some(vec!["loc-1".into()]),
            ..Default::default()
        };
        let summary = run_reports(&ctx, &trigger).await.unwrap();

        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.results[0].email, "qa@example.com");
        assert_eq!(summary.results[0].template_used, 3);
        assert_eq!(summary.results[0].location.as_deref(), Some("MG Road"));
    }

    #[tokio::test]
    async fn test_schedule_payload_processes_only_listed_users() {
        let mut store = two_location_store();
        store.schedules = vec![ReportSchedule {
            user_id: "u-2".into(),
            templateno: Some(2),
            timezone: Some("Asia/Dubai".into()),
        }];
        let mailer = FakeMailer::default();
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let trigger = TriggerRequest {
            users: Some(vec![
                ScheduledUser { user_id: "u-2".into(), templateno: None, timezone: None },
                ScheduledUser { user_id: "ghost".into(), templateno: None, timezone: None },
            ]),
            trigger: Some("cron".into()),
            ..Default::default()
        };
        let summary = run_reports(&ctx, &trigger).await.unwrap();

        assert_eq!(summary.results.len(), 2);
        let sent_outcome = summary
            .results
            .iter()
            .find(|r| r.status == OutcomeStatus::Success)
            .unwrap();
        assert_eq!(sent_outcome.email, "two@example.com");
        // Template joined in from the schedule table.
        assert_eq!(sent_outcome.template_used, 2);

        let unknown = summary
            .results
            .iter()
            .find(|r| r.status == OutcomeStatus::Skipped)
            .unwrap();
        assert_eq!(unknown.reason.as_deref(), Some("User not found"));
    }

    #[tokio::test]
    async fn test_test_email_reroutes_owner_mail() {
        let store = two_location_store();
        let mailer = FakeMailer::default();
        let mut config = test_config();
        config.test_email = Some("qa@example.com".into());
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let summary = run_reports(&ctx, &TriggerRequest::default()).await.unwrap();
        assert_eq!(summary.success_count, 3);

        let sent = mailer.sent.lock().unwrap();
        for email in sent.iter().filter(|e| e.to != "ops@example.com") {
            assert_eq!(email.to, "qa@example.com");
        }
    }

    #[tokio::test]
    async fn test_summary_send_failure_does_not_change_run_outcome() {
        let store = two_location_store();
        let mailer = FakeMailer {
            fail_for: Some("ops@example.com".into()),
            ..Default::default()
        };
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        let summary = run_reports(&ctx, &TriggerRequest::default()).await.unwrap();
        assert_eq!(summary.success_count, 3);
        assert_eq!(summary.failed_count, 0);
    }

    #[tokio::test]
    async fn test_report_email_shape() {
        let mut store = two_location_store();
        store.owners = vec![owner("u-1", Some("one@example.com"), Some("loc-1"))];
        let mailer = FakeMailer::default();
        let config = test_config();
        let ctx = RunContext { store: &store, mailer: &mailer, config: &config };

        run_reports(&ctx, &TriggerRequest::default()).await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        let email = sent.iter().find(|e| e.to == "one@example.com").unwrap();
        assert!(email.subject.starts_with("Daily Report - "));
        assert!(email.subject.ends_with("MG Road"));
        assert!(email.html.contains("₹800"));
        assert!(email.text.contains("Total Revenue: ₹800"));
        assert_eq!(email.attachments.len(), 3);
        assert!(email.attachments[0].filename.starts_with("daily_report_"));
        assert!(email.attachments[1].filename.starts_with("payment_breakdown_"));
        assert!(email.attachments[2].filename.starts_with("service_breakdown_"));
        for attachment in &email.attachments {
            assert!(!attachment.content.is_empty());
        }
    }
}
