use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine;
use crate::error::{Error, Result};
use crate::models::{Action, ActorRole, HistoryEntry, Record};
use crate::services::notifier_service::{LifecycleEvent, NotifierService};
use crate::store::EntityStore;

/// Committed result of a single transition.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOutcome {
    pub record_id: Uuid,
    pub previous_status: String,
    pub new_status: String,
    pub version: i64,
}

/// Orchestrates single-record mutations: read, decide, CAS-commit, append
/// history, hand the event to the notifier.
///
/// The service holds no locks. Correctness under concurrent callers comes
/// entirely from the store's compare-and-swap: a stale write loses, we
/// re-read and re-decide, bounded by `max_cas_retries`.
#[derive(Clone)]
pub struct LifecycleService {
    store: Arc<dyn EntityStore>,
    notifier: NotifierService,
    max_cas_retries: u32,
}

impl LifecycleService {
    pub fn new(store: Arc<dyn EntityStore>, notifier: NotifierService, max_cas_retries: u32) -> Self {
        Self {
            store,
            notifier,
            max_cas_retries,
        }
    }

    pub async fn transition(
        &self,
        record_id: Uuid,
        action: Action,
        actor_id: Uuid,
        role: ActorRole,
        reason: Option<&str>,
    ) -> Result<TransitionOutcome> {
        let mut attempts = 0;
        loop {
            let record = self
                .store
                .get(record_id)
                .await?
                .ok_or_else(|| Error::NotFound(record_id.to_string()))?;
            let expected_version = record.version();
            let previous_status = record.status_name().to_string();

            // Decision errors propagate before anything is written, so an
            // illegal action never bumps the version.
            let updated = self.apply(record, action, actor_id, role, reason)?;
            let new_status = updated.status_name().to_string();
            let entity_type = updated.entity_type();

            if self
                .store
                .compare_and_swap(record_id, expected_version, updated)
                .await?
            {
                info!(
                    record_id = %record_id,
                    action = %action,
                    previous = %previous_status,
                    new = %new_status,
                    actor_id = %actor_id,
                    "transition committed"
                );
                self.notifier.emit(LifecycleEvent {
                    record_id,
                    entity_type,
                    previous_status: previous_status.clone(),
                    new_status: new_status.clone(),
                    actor_id,
                    timestamp: Utc::now(),
                });
                return Ok(TransitionOutcome {
                    record_id,
                    previous_status,
                    new_status,
                    version: expected_version + 1,
                });
            }

            attempts += 1;
            if attempts >= self.max_cas_retries {
                warn!(
                    record_id = %record_id,
                    action = %action,
                    attempts,
                    "transition lost the version race, giving up"
                );
                return Err(Error::Conflict);
            }
        }
    }

    /// Build the post-transition record: next status, appended history entry,
    /// incremented version. Pure apart from the timestamp.
    fn apply(
        &self,
        record: Record,
        action: Action,
        actor_id: Uuid,
        role: ActorRole,
        reason: Option<&str>,
    ) -> Result<Record> {
        let now = Utc::now();
        let note = reason
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        match record {
            Record::Application(mut app) => {
                if action == Action::Withdraw && app.candidate_id != actor_id {
                    return Err(Error::Forbidden(
                        "only the applying candidate may withdraw".to_string(),
                    ));
                }
                let next = engine::decide_application(app.status, action, role, reason)?;
                app.status = next;
                app.status_history
                    .push(HistoryEntry::new(next, actor_id, note));
                app.version += 1;
                app.updated_at = Some(now);
                Ok(Record::Application(app))
            }
            Record::JobPosting(mut posting) => {
                let next =
                    engine::decide_posting(posting.moderation_status, action, role, reason)?;
                posting.moderation_status = next;
                posting
                    .review_history
                    .push(HistoryEntry::new(next, actor_id, note));
                posting.version += 1;
                posting.updated_at = Some(now);
                Ok(Record::JobPosting(posting))
            }
        }
    }

    /// Notes are versioned like any write but sit outside the audit trail and
    /// stay editable on terminal records.
    pub async fn update_notes(
        &self,
        record_id: Uuid,
        actor_id: Uuid,
        notes: String,
    ) -> Result<i64> {
        let mut attempts = 0;
        loop {
            let mut record = self
                .store
                .get(record_id)
                .await?
                .ok_or_else(|| Error::NotFound(record_id.to_string()))?;
            let expected_version = record.version();

            record.set_notes(Some(notes.clone()), Utc::now());
            record.bump_version();

            if self
                .store
                .compare_and_swap(record_id, expected_version, record)
                .await?
            {
                info!(record_id = %record_id, actor_id = %actor_id, "notes updated");
                return Ok(expected_version + 1);
            }

            attempts += 1;
            if attempts >= self.max_cas_retries {
                return Err(Error::Conflict);
            }
        }
    }

    pub async fn get_history(&self, record_id: Uuid) -> Result<Vec<HistoryEntry<String>>> {
        let record = self
            .store
            .get(record_id)
            .await?
            .ok_or_else(|| Error::NotFound(record_id.to_string()))?;
        Ok(record.history())
    }
}
