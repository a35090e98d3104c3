//! Notifier collaborators.
//!
//! # Responsibilities
//! - Deliver one admitted alert to its destination
//! - Report failures to the caller (the dispatcher logs and retries)
//!
//! # Design Decisions
//! - No retries here; the dispatcher owns the retry policy
//! - Console delivery when no webhook is configured

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::alert::types::AlertIntent;
use crate::config::NotifierConfig;
use crate::error::NotifyError;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn notify(&self, alert: &AlertIntent) -> Result<(), NotifyError>;
}

/// Posts Slack-style attachments to an incoming webhook.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    title: String,
    footer: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, config: &NotifierConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            title: config.title.clone(),
            footer: config.footer.clone(),
        })
    }

    /// JSON body for one alert.
    pub fn payload(&self, alert: &AlertIntent) -> Value {
        json!({
            "attachments": [{
                "color": alert.severity().color(),
                "title": self.title,
                "text": alert.message(),
                "footer": self.footer,
                "ts": alert.timestamp().timestamp(),
            }]
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn notify(&self, alert: &AlertIntent) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&self.payload(alert))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        tracing::info!(kind = %alert.kind(), "Alert delivered to webhook");
        Ok(())
    }
}

/// Writes alerts to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn notify(&self, alert: &AlertIntent) -> Result<(), NotifyError> {
        tracing::warn!(
            kind = %alert.kind(),
            color = alert.severity().color(),
            "ALERT [{}]:\n{}",
            alert.kind().as_str().to_uppercase(),
            alert.message()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_payload_shape() {
        let notifier =
            WebhookNotifier::new("http://127.0.0.1:9/hook", &NotifierConfig::default()).unwrap();
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let alert = AlertIntent::Recovery { error_rate: 0.25, timestamp };

        let body = notifier.payload(&alert);
        let attachment = &body["attachments"][0];
        assert_eq!(attachment["color"], "good");
        assert_eq!(attachment["title"], "🚨 Blue/Green Deployment Alert");
        assert_eq!(attachment["footer"], "Nginx Log Watcher");
        assert_eq!(attachment["ts"], timestamp.timestamp());
        assert!(attachment["text"].as_str().unwrap().contains("*Service Recovery*"));
    }
}
