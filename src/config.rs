//! Service configuration
//!
//! Built once at startup from the environment and passed down explicitly;
//! nothing below `main` reads `std::env`.

use crate::template::TemplateChoice;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Daily-reports service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (read-only upstream store)
    pub database_url: String,
    /// HTTP port (trigger + health endpoints)
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Bearer secret accepted on /send-reports (service role)
    pub service_role_key: String,
    /// Bearer secret accepted on /send-reports (anon)
    pub anon_key: String,
    /// Verified SES sender address
    pub ses_from_email: String,
    /// Operator address for the run summary (defaults to the sender)
    pub summary_email: String,
    /// When set, every owner email is delivered here instead (manual testing)
    pub test_email: Option<String>,
    /// Template used when neither the trigger payload nor the owner row
    /// carries a choice
    pub default_template: TemplateChoice,
    /// The single fixed business timezone. All day-boundary and hourly
    /// bucketing math uses this zone, never per-owner metadata.
    pub business_timezone: chrono_tz::Tz,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in
    /// non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let ses_from_email = std::env::var("SES_FROM_EMAIL")
            .map_err(|_| "SES_FROM_EMAIL must be set to a verified sender")?;

        let business_timezone = std::env::var("BUSINESS_TIMEZONE")
            .unwrap_or_else(|_| "Asia/Kolkata".into())
            .parse::<chrono_tz::Tz>()
            .map_err(|e| format!("Invalid BUSINESS_TIMEZONE: {e}"))?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            service_role_key: Self::require_secret("SERVICE_ROLE_KEY", &environment)?,
            anon_key: Self::require_secret("ANON_KEY", &environment)?,
            summary_email: std::env::var("SUMMARY_EMAIL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| ses_from_email.clone()),
            test_email: std::env::var("TEST_EMAIL").ok().filter(|s| !s.is_empty()),
            default_template: TemplateChoice::from_number(
                std::env::var("DEFAULT_TEMPLATE").ok().and_then(|t| t.parse().ok()),
            ),
            business_timezone,
            ses_from_email,
            environment,
        })
    }
}
