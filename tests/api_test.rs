mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::{memory_state, seed_application, seed_posting};
use jobmatch_backend::store::MemoryStore;
use std::sync::Arc;

async fn setup_app() -> (Router, Arc<MemoryStore>) {
    let (state, store) = memory_state();
    (jobmatch_backend::router(state), store)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn transition_endpoint_commits_and_reports_the_new_state() {
    let (app, store) = setup_app().await;
    let id = seed_application(&store, Uuid::new_v4()).await;

    let body = json!({
        "record_id": id,
        "action": "mark_reviewed",
        "actor_id": Uuid::new_v4(),
        "actor_role": "recruiter",
    });
    let resp = app
        .clone()
        .oneshot(post_json("/api/lifecycle/transition", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["previous_state"], "pending");
    assert_eq!(json["new_state"], "reviewed");
    assert_eq!(json["version"], 2);
}

#[tokio::test]
async fn invalid_transition_maps_to_422_with_typed_kind() {
    let (app, store) = setup_app().await;
    let id = seed_posting(&store).await;
    let moderator = Uuid::new_v4();

    let approve = json!({
        "record_id": id,
        "action": "approve",
        "actor_id": moderator,
        "actor_role": "moderator",
    });
    let resp = app
        .clone()
        .oneshot(post_json("/api/lifecycle/transition", &approve))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Approving twice: terminal state, typed error body.
    let resp = app
        .clone()
        .oneshot(post_json("/api/lifecycle/transition", &approve))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["kind"], "invalid_transition");
    assert!(json["message"].as_str().unwrap().contains("approved"));
}

#[tokio::test]
async fn missing_reason_and_wrong_role_are_typed_errors() {
    let (app, store) = setup_app().await;
    let id = seed_posting(&store).await;

    let reject = json!({
        "record_id": id,
        "action": "reject",
        "actor_id": Uuid::new_v4(),
        "actor_role": "moderator",
    });
    let resp = app
        .clone()
        .oneshot(post_json("/api/lifecycle/transition", &reject))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["kind"], "reason_required");

    let approve_as_recruiter = json!({
        "record_id": id,
        "action": "approve",
        "actor_id": Uuid::new_v4(),
        "actor_role": "recruiter",
    });
    let resp = app
        .clone()
        .oneshot(post_json("/api/lifecycle/transition", &approve_as_recruiter))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["kind"], "forbidden");
}

#[tokio::test]
async fn unknown_record_maps_to_404() {
    let (app, _store) = setup_app().await;

    let body = json!({
        "record_id": Uuid::new_v4(),
        "action": "accept",
        "actor_id": Uuid::new_v4(),
        "actor_role": "recruiter",
    });
    let resp = app
        .oneshot(post_json("/api/lifecycle/transition", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["kind"], "not_found");
}

#[tokio::test]
async fn bulk_endpoint_returns_a_per_id_result_map() {
    let (app, store) = setup_app().await;
    let first = seed_posting(&store).await;
    let second = seed_posting(&store).await;
    let missing = Uuid::new_v4();

    let body = json!({
        "record_ids": [first, second, missing],
        "action": "approve",
        "actor_id": Uuid::new_v4(),
        "actor_role": "moderator",
    });
    let resp = app
        .oneshot(post_json("/api/lifecycle/bulk-transition", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let results = json["results"].as_object().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[&first.to_string()]["status"], "ok");
    assert_eq!(results[&second.to_string()]["new_state"], "approved");
    assert_eq!(results[&missing.to_string()]["kind"], "not_found");
}

#[tokio::test]
async fn bulk_endpoint_rejects_an_empty_id_set() {
    let (app, _store) = setup_app().await;

    let body = json!({
        "record_ids": [],
        "action": "approve",
        "actor_id": Uuid::new_v4(),
        "actor_role": "moderator",
    });
    let resp = app
        .oneshot(post_json("/api/lifecycle/bulk-transition", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn notes_endpoint_bumps_the_version_without_history() {
    let (app, store) = setup_app().await;
    let id = seed_application(&store, Uuid::new_v4()).await;

    let body = json!({
        "record_id": id,
        "actor_id": Uuid::new_v4(),
        "notes": "phone screen went well",
    });
    let resp = app
        .clone()
        .oneshot(post_json("/api/lifecycle/notes", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], 2);

    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/lifecycle/history/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let history = body_json(resp).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn history_endpoint_returns_the_ordered_trail() {
    let (app, store) = setup_app().await;
    let recruiter = Uuid::new_v4();
    let id = seed_application(&store, Uuid::new_v4()).await;

    for (action, reason) in [("mark_reviewed", Value::Null), ("reject", json!("junior role"))] {
        let body = json!({
            "record_id": id,
            "action": action,
            "actor_id": recruiter,
            "actor_role": "recruiter",
            "reason": reason,
        });
        let resp = app
            .clone()
            .oneshot(post_json("/api/lifecycle/transition", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/lifecycle/history/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let history = body_json(resp).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["status"], "pending");
    assert_eq!(entries[1]["status"], "reviewed");
    assert_eq!(entries[2]["status"], "rejected");
    assert_eq!(entries[2]["note"], "junior role");
}
