pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Record;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store-level failures. These are infrastructure problems ("the backend is
/// down"), deliberately distinct from a CAS miss ("someone else changed it"),
/// which `compare_and_swap` reports as `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a record with id {0} already exists")]
    DuplicateId(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record payload: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The only persistence contract the lifecycle service depends on. Any
/// backend with optimistic-concurrency semantics (version column, document
/// ETag) can implement it.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Fetch a record by id. The record embeds its current version.
    async fn get(&self, id: Uuid) -> Result<Option<Record>, StoreError>;

    /// Write `record` only if the stored version still equals
    /// `expected_version`. Returns `Ok(false)` on a version mismatch (or a
    /// concurrently deleted record) without writing anything.
    async fn compare_and_swap(
        &self,
        id: Uuid,
        expected_version: i64,
        record: Record,
    ) -> Result<bool, StoreError>;

    /// Create a record. This is the authoring flow's entry point; the
    /// lifecycle service itself never inserts.
    async fn insert(&self, record: Record) -> Result<(), StoreError>;
}
