mod common;

use jobmatch_backend::models::{Action, ActorRole};
use jobmatch_backend::services::bulk_service::BulkOutcome;
use jobmatch_backend::store::EntityStore;
use uuid::Uuid;

use common::{assert_history_consistent, memory_state, seed_application, seed_posting};

#[tokio::test]
async fn one_terminal_record_does_not_abort_the_batch() {
    // Five postings, one already approved. The terminal one reports
    // invalid_transition, the other four commit.
    let (state, store) = memory_state();
    let moderator = Uuid::new_v4();

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(seed_posting(&store).await);
    }
    state
        .lifecycle_service
        .transition(ids[2], Action::Approve, moderator, ActorRole::Moderator, None)
        .await
        .unwrap();

    let results = state
        .bulk_service
        .bulk_transition(ids.clone(), Action::Approve, moderator, ActorRole::Moderator, None)
        .await;

    assert_eq!(results.len(), 5);
    let mut ok = 0;
    let mut invalid = 0;
    for (id, outcome) in &results {
        match outcome {
            BulkOutcome::Ok { new_state, .. } => {
                assert_eq!(new_state, "approved");
                ok += 1;
            }
            BulkOutcome::Error { kind, .. } => {
                assert_eq!(id, &ids[2]);
                assert_eq!(kind, "invalid_transition");
                invalid += 1;
            }
        }
    }
    assert_eq!((ok, invalid), (4, 1));

    for id in ids {
        assert_history_consistent(&store, id).await;
    }
}

#[tokio::test]
async fn unknown_ids_are_reported_per_record() {
    let (state, store) = memory_state();
    let moderator = Uuid::new_v4();
    let known = seed_posting(&store).await;
    let unknown = Uuid::new_v4();

    let results = state
        .bulk_service
        .bulk_transition(
            vec![known, unknown],
            Action::Approve,
            moderator,
            ActorRole::Moderator,
            None,
        )
        .await;

    assert!(matches!(results.get(&known), Some(BulkOutcome::Ok { .. })));
    match results.get(&unknown) {
        Some(BulkOutcome::Error { kind, .. }) => assert_eq!(kind, "not_found"),
        other => panic!("expected not_found outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_ids_are_processed_once() {
    let (state, store) = memory_state();
    let moderator = Uuid::new_v4();
    let id = seed_posting(&store).await;

    let results = state
        .bulk_service
        .bulk_transition(
            vec![id, id, id],
            Action::Approve,
            moderator,
            ActorRole::Moderator,
            None,
        )
        .await;

    assert_eq!(results.len(), 1);
    assert!(matches!(results.get(&id), Some(BulkOutcome::Ok { .. })));
    let record = store.get(id).await.unwrap().unwrap();
    assert_eq!(record.version(), 2, "the id set is deduplicated");
}

#[tokio::test]
async fn large_batches_complete_under_the_worker_bound() {
    // More records than workers; every record still gets an outcome.
    let (state, store) = memory_state();
    let recruiter = Uuid::new_v4();

    let mut ids = Vec::new();
    for _ in 0..30 {
        ids.push(seed_application(&store, Uuid::new_v4()).await);
    }

    let results = state
        .bulk_service
        .bulk_transition(
            ids.clone(),
            Action::MarkReviewed,
            recruiter,
            ActorRole::Recruiter,
            None,
        )
        .await;

    assert_eq!(results.len(), 30);
    assert!(results
        .values()
        .all(|outcome| matches!(outcome, BulkOutcome::Ok { .. })));
    for id in ids {
        let record = store.get(id).await.unwrap().unwrap();
        assert_eq!(record.status_name(), "reviewed");
    }
}

#[tokio::test]
async fn bulk_reject_without_reason_fails_every_record_without_mutation() {
    let (state, store) = memory_state();
    let moderator = Uuid::new_v4();
    let ids = vec![seed_posting(&store).await, seed_posting(&store).await];

    let results = state
        .bulk_service
        .bulk_transition(ids.clone(), Action::Reject, moderator, ActorRole::Moderator, None)
        .await;

    for id in &ids {
        match results.get(id) {
            Some(BulkOutcome::Error { kind, .. }) => assert_eq!(kind, "reason_required"),
            other => panic!("expected reason_required, got {other:?}"),
        }
        let record = store.get(*id).await.unwrap().unwrap();
        assert_eq!(record.version(), 1);
        assert_eq!(record.status_name(), "pending");
    }
}
