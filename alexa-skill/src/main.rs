//! Patient Room Skill Lambda - Handles Alexa voice requests from hospital rooms.
//!
//! Each invocation is one conversational turn:
//! 1. Deserializes the platform request envelope
//! 2. Loads saved user attributes on the first turn of a session
//! 3. Routes the request to its handler (catch-all and error handler included)
//! 4. Pages the care team for staff requests
//! 5. Returns speech, an optional APL visual, and the session decision

mod context;
mod dispatch;
mod handlers;
mod intents;
mod requests;
#[cfg(test)]
mod test_support;

use anyhow::Context as _;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use shared::apl;
use shared::{
    AttributesStore, Config, InMemoryAttributesStore, LogChannel, MediaConfig, MediaSigner,
    PgAttributesStore, PublicMediaUrls, RequestEnvelope, ResponseEnvelope, S3MediaSigner,
    SnsChannel, StaffChannel, StaffChannelConfig, StaffNotifier, StoreConfig, WebhookChannel,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::context::Services;

async fn build_services(config: &Config) -> anyhow::Result<Services> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let store: Arc<dyn AttributesStore> = match &config.store {
        StoreConfig::Postgres {
            db_host,
            db_name,
            db_secret_arn,
        } => {
            let secrets_client = aws_sdk_secretsmanager::Client::new(&aws_config);
            let credentials = shared::secrets::database_credentials(&secrets_client, db_secret_arn)
                .await
                .context("loading database credentials")?;
            let pool = shared::db::create_pool(db_host, db_name, &credentials)
                .await
                .context("connecting to attribute database")?;
            Arc::new(PgAttributesStore::new(pool))
        }
        StoreConfig::InMemory => {
            warn!("No database configured; user attributes are kept in memory only");
            Arc::new(InMemoryAttributesStore::new())
        }
    };

    let media: Arc<dyn MediaSigner> = match &config.media {
        MediaConfig::S3 {
            bucket,
            expiry_secs,
        } => Arc::new(S3MediaSigner::new(
            aws_sdk_s3::Client::new(&aws_config),
            bucket.clone(),
            *expiry_secs,
        )),
        MediaConfig::Public { base_url } => Arc::new(PublicMediaUrls::new(base_url.clone())),
    };

    let alert_timeout = Duration::from_millis(config.staff_alert_timeout_ms);

    let channel: Arc<dyn StaffChannel> = match &config.staff_channel {
        StaffChannelConfig::Sns { topic_arn } => Arc::new(SnsChannel::new(
            aws_sdk_sns::Client::new(&aws_config),
            topic_arn.clone(),
        )),
        StaffChannelConfig::Webhook { url } => {
            let http_client = reqwest::Client::builder()
                .timeout(alert_timeout)
                .build()
                .context("building staff webhook client")?;
            Arc::new(WebhookChannel::new(http_client, url.clone()))
        }
        StaffChannelConfig::Log => Arc::new(LogChannel),
    };
    let notifier = StaffNotifier::new(channel).with_timeout(alert_timeout);

    info!(
        region = %config.aws_region,
        staff_channel = notifier.channel_name(),
        room_id = %config.room_id,
        alert_timeout_ms = config.staff_alert_timeout_ms,
        supported_requests = intents::SkillIntent::supported_names().len(),
        "Skill services ready"
    );

    Ok(Services {
        store,
        media,
        notifier,
        headline_document: apl::headline_document().context("parsing headline document")?,
        facility_name: config.facility_name.clone(),
        room_id: config.room_id.clone(),
        default_locale: config.default_locale.clone(),
    })
}

async fn handler(
    services: Arc<Services>,
    event: LambdaEvent<RequestEnvelope>,
) -> Result<ResponseEnvelope, Error> {
    let (envelope, context) = event.into_parts();

    info!(
        lambda_request_id = %context.request_id,
        request_id = envelope.request_id().unwrap_or("unknown"),
        request = envelope.request_name(),
        new_session = envelope.is_new_session(),
        "Processing skill request"
    );

    Ok(dispatch::handle_turn(&envelope, &services).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let services = Arc::new(build_services(&config).await?);

    run(service_fn(move |event| {
        let services = Arc::clone(&services);
        async move { handler(services, event).await }
    }))
    .await
}
