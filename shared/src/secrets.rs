//! Database credentials from AWS Secrets Manager.

use aws_sdk_secretsmanager::Client as SecretsClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Secret strings already fetched by this container, keyed by ARN.
static SECRETS_CACHE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<String, String>> {
    SECRETS_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// RDS-style credential secret. Only username and password are required.
#[derive(Debug, Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub dbname: Option<String>,
}

fn default_port() -> u16 {
    5432
}

async fn secret_string(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    if let Some(value) = cache().read().await.get(secret_arn) {
        return Ok(value.clone());
    }

    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret: {}", e)))?;

    let value = response
        .secret_string()
        .ok_or_else(|| Error::NotFound(format!("Secret {} has no string value", secret_arn)))?
        .to_string();

    cache()
        .write()
        .await
        .insert(secret_arn.to_string(), value.clone());

    Ok(value)
}

/// Fetch and parse database credentials, cached for the container lifetime.
pub async fn database_credentials(
    client: &SecretsClient,
    secret_arn: &str,
) -> Result<DatabaseCredentials> {
    let raw = secret_string(client, secret_arn).await?;
    parse_credentials(&raw)
}

fn parse_credentials(raw: &str) -> Result<DatabaseCredentials> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Config(format!("Failed to parse database credentials: {}", e)))
}
