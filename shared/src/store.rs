//! Durable per-user attributes that outlive a single session.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::Result;

#[async_trait]
pub trait AttributesStore: Send + Sync {
    /// Attributes last saved for the user, `None` for a user never seen.
    async fn load(&self, user_id: &str) -> Result<Option<Map<String, Value>>>;

    async fn save(&self, user_id: &str, attributes: &Map<String, Value>) -> Result<()>;
}

/// PostgreSQL-backed store.
///
/// ```sql
/// CREATE TABLE skill_user_attributes (
///     user_id    TEXT PRIMARY KEY,
///     attributes JSONB NOT NULL,
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
pub struct PgAttributesStore {
    pool: PgPool,
}

impl PgAttributesStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttributesStore for PgAttributesStore {
    async fn load(&self, user_id: &str) -> Result<Option<Map<String, Value>>> {
        let row: Option<(Json<Map<String, Value>>,)> = sqlx::query_as(
            r#"
            SELECT attributes
            FROM skill_user_attributes
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(Json(attributes),)| attributes))
    }

    async fn save(&self, user_id: &str, attributes: &Map<String, Value>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO skill_user_attributes (user_id, attributes, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET attributes = EXCLUDED.attributes, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(Json(attributes.clone()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Process-local store for local runs and tests.
#[derive(Default)]
pub struct InMemoryAttributesStore {
    users: RwLock<HashMap<String, Map<String, Value>>>,
}

impl InMemoryAttributesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttributesStore for InMemoryAttributesStore {
    async fn load(&self, user_id: &str) -> Result<Option<Map<String, Value>>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, attributes: &Map<String, Value>) -> Result<()> {
        self.users
            .write()
            .await
            .insert(user_id.to_string(), attributes.clone());
        Ok(())
    }
}
