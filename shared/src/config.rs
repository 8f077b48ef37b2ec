//! Configuration management for the skill Lambda.

use std::env;

use crate::{Error, Result};

/// Where durable user attributes are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    /// PostgreSQL with credentials held in Secrets Manager
    Postgres {
        db_host: String,
        db_name: String,
        db_secret_arn: String,
    },
    /// Process-local map; attributes survive only while the container is warm
    InMemory,
}

/// How image URLs for the visual templates are produced.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaConfig {
    /// Presigned GET URLs on an S3 bucket
    S3 { bucket: String, expiry_secs: u64 },
    /// Plain `base_url/key` URLs (CDN or public bucket)
    Public { base_url: String },
}

/// Channel used to reach hospital staff.
#[derive(Debug, Clone, PartialEq)]
pub enum StaffChannelConfig {
    Sns { topic_arn: String },
    Webhook { url: String },
    Log,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// AWS region
    pub aws_region: String,
    /// Locale used when a request carries none
    pub default_locale: String,
    /// Name of the facility, included in staff alerts
    pub facility_name: String,
    /// Room or unit the device is installed in
    pub room_id: String,
    pub store: StoreConfig,
    pub media: MediaConfig,
    pub staff_channel: StaffChannelConfig,
    /// Upper bound on one staff alert delivery
    pub staff_alert_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store = match (var("DATABASE_HOST"), var("DATABASE_SECRET_ARN")) {
            (Some(db_host), Some(db_secret_arn)) => StoreConfig::Postgres {
                db_host,
                db_name: var("DATABASE_NAME").unwrap_or_else(|| "patient_room_skill".to_string()),
                db_secret_arn,
            },
            (Some(_), None) => {
                return Err(Error::Config(
                    "DATABASE_HOST is set but DATABASE_SECRET_ARN is missing".to_string(),
                ))
            }
            _ => StoreConfig::InMemory,
        };

        let media = match var("MEDIA_BUCKET") {
            Some(bucket) => {
                let expiry_secs = match var("MEDIA_URL_EXPIRY_SECS") {
                    Some(raw) => raw.parse::<u64>().map_err(|e| {
                        Error::Config(format!("MEDIA_URL_EXPIRY_SECS is not a number: {}", e))
                    })?,
                    None => 300,
                };
                MediaConfig::S3 { bucket, expiry_secs }
            }
            None => MediaConfig::Public {
                base_url: var("MEDIA_BASE_URL").unwrap_or_default(),
            },
        };

        let staff_channel = match (var("STAFF_TOPIC_ARN"), var("STAFF_WEBHOOK_URL")) {
            (Some(topic_arn), _) => StaffChannelConfig::Sns { topic_arn },
            (None, Some(url)) => StaffChannelConfig::Webhook { url },
            (None, None) => StaffChannelConfig::Log,
        };

        let staff_alert_timeout_ms = match var("STAFF_ALERT_TIMEOUT_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                Error::Config(format!("STAFF_ALERT_TIMEOUT_MS is not a number: {}", e))
            })?,
            None => 3000,
        };

        Ok(Self {
            aws_region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            default_locale: var("SKILL_DEFAULT_LOCALE").unwrap_or_else(|| "en-US".to_string()),
            facility_name: var("FACILITY_NAME").unwrap_or_else(|| "My Hospital".to_string()),
            room_id: var("ROOM_ID").unwrap_or_else(|| "100".to_string()),
            store,
            media,
            staff_channel,
            staff_alert_timeout_ms,
        })
    }
}
