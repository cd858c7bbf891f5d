use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use crate::models::Record;
use crate::store::{EntityStore, StoreError};

/// Postgres-backed store. One row per record; the full payload lives in a
/// jsonb column and the `version` column is the CAS arbiter.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(50)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|err| StoreError::Database(err.into()))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn get(&self, id: Uuid) -> Result<Option<Record>, StoreError> {
        let row = sqlx::query(r#"SELECT data FROM records WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else { return Ok(None) };
        let data: serde_json::Value = row.try_get("data")?;
        let record: Record = serde_json::from_value(data)?;
        Ok(Some(record))
    }

    async fn compare_and_swap(
        &self,
        id: Uuid,
        expected_version: i64,
        record: Record,
    ) -> Result<bool, StoreError> {
        let data = serde_json::to_value(&record)?;
        let result = sqlx::query(
            r#"
            UPDATE records
            SET data = $1, version = $2, updated_at = NOW()
            WHERE id = $3 AND version = $4
            "#,
        )
        .bind(data)
        .bind(record.version())
        .bind(id)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn insert(&self, record: Record) -> Result<(), StoreError> {
        let data = serde_json::to_value(&record)?;
        let result = sqlx::query(
            r#"
            INSERT INTO records (id, entity_type, version, data)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(record.id())
        .bind(record.entity_type().as_str())
        .bind(record.version())
        .bind(data)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::DuplicateId(record.id()));
        }
        Ok(())
    }
}
