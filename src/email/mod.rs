//! Email delivery via AWS SES
//!
//! [`Mailer`] is the delivery seam: the orchestrator only ever talks to
//! the trait, so tests substitute a recording fake and the production
//! wiring passes one [`SesMailer`] built at startup and reused for the
//! whole run.

pub mod mime;

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::primitives::Blob;
use aws_sdk_sesv2::types::{Destination, EmailContent, RawMessage};

use crate::error::BoxError;

pub use mime::{Attachment, OutgoingEmail};

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Pre-run connectivity and quota check. A failure here is a
    /// configuration error: the run never starts.
    async fn verify(&self) -> Result<(), BoxError>;

    /// Deliver one message; returns the provider's message id.
    async fn send(&self, email: &OutgoingEmail) -> Result<String, BoxError>;
}

/// SES-backed mailer
#[derive(Clone)]
pub struct SesMailer {
    client: SesClient,
}

impl SesMailer {
    pub fn new(client: SesClient) -> Self {
        Self { client }
    }

    /// Build the SES client from ambient AWS config, honoring an optional
    /// SES_REGION override.
    pub async fn from_env() -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = if let Ok(ses_region) = std::env::var("SES_REGION") {
            let ses_config = aws_config
                .to_builder()
                .region(aws_config::Region::new(ses_region))
                .build();
            SesClient::new(&ses_config)
        } else {
            SesClient::new(&aws_config)
        };
        Self::new(client)
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn verify(&self) -> Result<(), BoxError> {
        let account = self.client.get_account().send().await?;
        if let Some(quota) = account.send_quota() {
            tracing::info!(
                max_24_hour_send = quota.max24_hour_send(),
                sent_last_24_hours = quota.sent_last24_hours(),
                "SES connection verified"
            );
        } else {
            tracing::info!("SES connection verified (no quota reported)");
        }
        Ok(())
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<String, BoxError> {
        let raw = RawMessage::builder()
            .data(Blob::new(mime::build_mime(email).into_bytes()))
            .build()?;

        let response = self
            .client
            .send_email()
            .from_email_address(&email.from)
            .destination(Destination::builder().to_addresses(&email.to).build())
            .content(EmailContent::builder().raw(raw).build())
            .send()
            .await?;

        let message_id = response.message_id().unwrap_or_default().to_string();
        tracing::info!(to = %email.to, message_id = %message_id, "Email sent");
        Ok(message_id)
    }
}
