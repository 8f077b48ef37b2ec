//! Database connection management.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::secrets::DatabaseCredentials;
use crate::{Error, Result};

/// Create a small connection pool; a skill container serves one turn at a time.
pub async fn create_pool(
    db_host: &str,
    db_name: &str,
    credentials: &DatabaseCredentials,
) -> Result<PgPool> {
    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        credentials.username,
        credentials.password,
        credentials.host.as_deref().unwrap_or(db_host),
        credentials.port,
        credentials.dbname.as_deref().unwrap_or(db_name),
    );

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await
        .map_err(Error::Database)?;

    Ok(pool)
}
