use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Action, ActorRole, HistoryEntry};
use crate::services::bulk_service::BulkOutcome;
use crate::services::lifecycle_service::TransitionOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransitionPayload {
    pub record_id: Uuid,
    pub action: Action,
    pub actor_id: Uuid,
    pub actor_role: ActorRole,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkTransitionPayload {
    #[validate(length(min = 1, message = "at least one record id is required"))]
    pub record_ids: Vec<Uuid>,
    pub action: Action,
    pub actor_id: Uuid,
    pub actor_role: ActorRole,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NotesPayload {
    pub record_id: Uuid,
    pub actor_id: Uuid,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionResponse {
    pub status: &'static str,
    pub record_id: Uuid,
    pub previous_state: String,
    pub new_state: String,
    pub version: i64,
}

impl From<TransitionOutcome> for TransitionResponse {
    fn from(outcome: TransitionOutcome) -> Self {
        Self {
            status: "ok",
            record_id: outcome.record_id,
            previous_state: outcome.previous_status,
            new_state: outcome.new_status,
            version: outcome.version,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkTransitionResponse {
    pub results: HashMap<Uuid, BulkOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotesResponse {
    pub status: &'static str,
    pub version: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub actor_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<HistoryEntry<String>> for HistoryEntryResponse {
    fn from(entry: HistoryEntry<String>) -> Self {
        Self {
            status: entry.status,
            timestamp: entry.timestamp,
            actor_id: entry.actor_id,
            note: entry.note,
        }
    }
}
