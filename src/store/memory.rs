use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Record;
use crate::store::{EntityStore, StoreError};

/// Reference store implementation backed by a process-local map.
///
/// The write lock makes the version check and the write one atomic step,
/// which is exactly the contract a row-versioned UPDATE gives the Postgres
/// store. Used by tests and by deployments running without a database.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Uuid, Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<Record>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn compare_and_swap(
        &self,
        id: Uuid,
        expected_version: i64,
        record: Record,
    ) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.get(&id) {
            Some(stored) if stored.version() == expected_version => {
                records.insert(id, record);
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Ok(false),
        }
    }

    async fn insert(&self, record: Record) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let id = record.id();
        if records.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        records.insert(id, record);
        Ok(())
    }
}
