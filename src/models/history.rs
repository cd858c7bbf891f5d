use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of a record's audit trail. Entries are append-only and the last
/// entry always matches the record's current status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry<S> {
    pub status: S,
    pub timestamp: DateTime<Utc>,
    pub actor_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<S> HistoryEntry<S> {
    pub fn new(status: S, actor_id: Uuid, note: Option<String>) -> Self {
        Self {
            status,
            timestamp: Utc::now(),
            actor_id,
            note,
        }
    }
}
