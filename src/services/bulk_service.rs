use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::error;
use uuid::Uuid;

use crate::error::Error;
use crate::models::{Action, ActorRole};
use crate::services::lifecycle_service::LifecycleService;

/// Per-record outcome of a bulk operation. Callers decide what "8 of 10
/// succeeded, 2 conflicts" means for their screen.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BulkOutcome {
    Ok { new_state: String, version: i64 },
    Error { kind: String, message: String },
}

impl From<&Error> for BulkOutcome {
    fn from(err: &Error) -> Self {
        BulkOutcome::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Fan-out layer over the lifecycle service. Records are independent, so
/// there is no cross-record locking and no batch transaction: each id gets
/// its own CAS-guarded transition and its own slot in the result map.
#[derive(Clone)]
pub struct BulkService {
    lifecycle: LifecycleService,
    workers: usize,
}

impl BulkService {
    pub fn new(lifecycle: LifecycleService, workers: usize) -> Self {
        Self {
            lifecycle,
            workers: workers.max(1),
        }
    }

    /// Apply `action` to every id, with bounded parallelism. One record
    /// failing never aborts the rest; a cancelled call leaves already
    /// committed records committed.
    pub async fn bulk_transition(
        &self,
        record_ids: Vec<Uuid>,
        action: Action,
        actor_id: Uuid,
        role: ActorRole,
        reason: Option<String>,
    ) -> HashMap<Uuid, BulkOutcome> {
        let ids: HashSet<Uuid> = record_ids.into_iter().collect();
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for id in ids {
            let semaphore = semaphore.clone();
            let lifecycle = self.lifecycle.clone();
            let reason = reason.clone();
            tasks.spawn(async move {
                // The semaphore is never closed while tasks are running.
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("bulk semaphore closed");
                let result = lifecycle
                    .transition(id, action, actor_id, role, reason.as_deref())
                    .await;
                (id, result)
            });
        }

        let mut results = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(outcome))) => {
                    results.insert(
                        id,
                        BulkOutcome::Ok {
                            new_state: outcome.new_status,
                            version: outcome.version,
                        },
                    );
                }
                Ok((id, Err(err))) => {
                    results.insert(id, BulkOutcome::from(&err));
                }
                Err(join_err) => {
                    error!(error = %join_err, "bulk transition worker failed");
                }
            }
        }
        results
    }
}
