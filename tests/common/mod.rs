#![allow(dead_code)]

use std::sync::Arc;

use jobmatch_backend::models::{Application, JobPosting, Record};
use jobmatch_backend::services::notifier_service::NotifierService;
use jobmatch_backend::store::{EntityStore, MemoryStore};
use jobmatch_backend::AppState;
use uuid::Uuid;

pub fn app_state(store: Arc<dyn EntityStore>) -> AppState {
    AppState::with_options(store, NotifierService::new(None), 3, 8)
}

pub fn memory_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (app_state(store.clone()), store)
}

pub async fn seed_application(store: &MemoryStore, candidate_id: Uuid) -> Uuid {
    let app = Application::new(Uuid::new_v4(), candidate_id, 75);
    let id = app.id;
    store
        .insert(Record::Application(app))
        .await
        .expect("seed application");
    id
}

pub async fn seed_posting(store: &MemoryStore) -> Uuid {
    let posting = JobPosting::new(
        "Backend Engineer".to_string(),
        "Acme GmbH".to_string(),
        Uuid::new_v4(),
    );
    let id = posting.id;
    store
        .insert(Record::JobPosting(posting))
        .await
        .expect("seed posting");
    id
}

/// Audit-trail invariant: non-empty and the last entry matches the current
/// status.
pub async fn assert_history_consistent(store: &MemoryStore, id: Uuid) {
    let record = store.get(id).await.expect("get").expect("record exists");
    let history = record.history();
    assert!(!history.is_empty(), "history must never be empty");
    assert_eq!(
        history.last().map(|entry| entry.status.as_str()),
        Some(record.status_name()),
        "last history entry must match the current status"
    );
}
