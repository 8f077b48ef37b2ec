//! Staff notifications.
//!
//! Requests such as "I am in pain" raise a [`StaffAlert`]. The alert is
//! handed to a [`StaffChannel`]: a deployment picks SNS (paging and SMS fan
//! out), a webhook (nurse-call system, chat room), or the log-only channel
//! while no real integration exists. [`StaffNotifier`] wraps the channel and
//! never fails the caller: delivery problems are logged, and a delivery that
//! outlives the notifier's timeout is abandoned.

use async_trait::async_trait;
use aws_sdk_sns::Client as SnsClient;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{Error, Result};

/// One alert for the care team.
#[derive(Debug, Clone, Serialize)]
pub struct StaffAlert {
    pub alert_id: Uuid,
    /// Localized, fully formed message
    pub message: String,
    /// Intent that raised the alert
    pub intent: String,
    pub facility: String,
    pub room_id: String,
    pub locale: String,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub device_id: Option<String>,
    pub raised_at: DateTime<Utc>,
}

/// Delivery mechanism for staff alerts.
#[async_trait]
pub trait StaffChannel: Send + Sync {
    /// Deliver the alert, returning a channel-specific delivery id.
    async fn deliver(&self, alert: &StaffAlert) -> Result<String>;

    /// Short label for log lines.
    fn name(&self) -> &'static str;
}

/// Placeholder channel: records the alert in the log only.
pub struct LogChannel;

#[async_trait]
impl StaffChannel for LogChannel {
    async fn deliver(&self, alert: &StaffAlert) -> Result<String> {
        info!(
            alert_id = %alert.alert_id,
            intent = %alert.intent,
            room_id = %alert.room_id,
            message = %alert.message,
            "Staff alert raised; no delivery channel configured"
        );
        Ok("logged".to_string())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Publishes alerts as JSON to an SNS topic.
pub struct SnsChannel {
    client: SnsClient,
    topic_arn: String,
}

impl SnsChannel {
    pub fn new(client: SnsClient, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }
}

#[async_trait]
impl StaffChannel for SnsChannel {
    async fn deliver(&self, alert: &StaffAlert) -> Result<String> {
        let body = serde_json::to_string(alert)?;
        let subject = format!("{} room {}", alert.facility, alert.room_id);

        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(body)
            .send()
            .await
            .map_err(|e| Error::Notify(format!("Failed to publish staff alert: {}", e)))?;

        Ok(output.message_id().unwrap_or("sns").to_string())
    }

    fn name(&self) -> &'static str {
        "sns"
    }
}

/// POSTs alerts as JSON to an HTTP endpoint.
pub struct WebhookChannel {
    http_client: reqwest::Client,
    url: String,
}

impl WebhookChannel {
    pub fn new(http_client: reqwest::Client, url: String) -> Self {
        Self { http_client, url }
    }
}

#[async_trait]
impl StaffChannel for WebhookChannel {
    async fn deliver(&self, alert: &StaffAlert) -> Result<String> {
        let response = self
            .http_client
            .post(&self.url)
            .json(alert)
            .send()
            .await
            .map_err(|e| Error::Notify(format!("Failed to call staff webhook: {}", e)))?;

        if response.status().is_success() {
            Ok(format!("webhook_{}", response.status().as_u16()))
        } else {
            Err(Error::Notify(format!(
                "Staff webhook returned {}",
                response.status()
            )))
        }
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

/// Delivery budget used unless the deployment overrides it.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Fire-and-forget front for a [`StaffChannel`].
#[derive(Clone)]
pub struct StaffNotifier {
    channel: Arc<dyn StaffChannel>,
    timeout: Duration,
}

impl StaffNotifier {
    pub fn new(channel: Arc<dyn StaffChannel>) -> Self {
        Self {
            channel,
            timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn channel_name(&self) -> &'static str {
        self.channel.name()
    }

    /// Deliver the alert. Failures and timeouts are logged, never returned.
    pub async fn notify(&self, alert: &StaffAlert) {
        let delivery = tokio::time::timeout(self.timeout, self.channel.deliver(alert)).await;

        match delivery {
            Ok(Ok(delivery_id)) => info!(
                alert_id = %alert.alert_id,
                intent = %alert.intent,
                channel = self.channel.name(),
                delivery_id = %delivery_id,
                "Staff alert delivered"
            ),
            Ok(Err(e)) => error!(
                alert_id = %alert.alert_id,
                intent = %alert.intent,
                channel = self.channel.name(),
                error = %e,
                "Failed to deliver staff alert"
            ),
            Err(_) => warn!(
                alert_id = %alert.alert_id,
                intent = %alert.intent,
                channel = self.channel.name(),
                timeout_ms = self.timeout.as_millis() as u64,
                "Staff alert delivery timed out"
            ),
        }
    }
}
