pub mod config;
pub mod dto;
pub mod engine;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::services::{
    bulk_service::BulkService, lifecycle_service::LifecycleService,
    notifier_service::NotifierService,
};
use crate::store::EntityStore;

#[derive(Clone)]
pub struct AppState {
    pub lifecycle_service: LifecycleService,
    pub bulk_service: BulkService,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        let config = crate::config::get_config();
        let notifier = NotifierService::new(config.notifier_webhook_url.clone());
        Self::with_options(store, notifier, config.cas_max_retries, config.bulk_workers)
    }

    /// Wire the services without touching global config. Tests use this to
    /// run against an in-memory or scripted store.
    pub fn with_options(
        store: Arc<dyn EntityStore>,
        notifier: NotifierService,
        cas_max_retries: u32,
        bulk_workers: usize,
    ) -> Self {
        let lifecycle_service = LifecycleService::new(store, notifier, cas_max_retries);
        let bulk_service = BulkService::new(lifecycle_service.clone(), bulk_workers);
        Self {
            lifecycle_service,
            bulk_service,
        }
    }
}

/// The full API surface. main() adds CORS/trace layers on top.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/lifecycle/transition",
            post(routes::lifecycle::transition),
        )
        .route(
            "/api/lifecycle/bulk-transition",
            post(routes::lifecycle::bulk_transition),
        )
        .route("/api/lifecycle/notes", post(routes::lifecycle::update_notes))
        .route(
            "/api/lifecycle/history/:record_id",
            get(routes::lifecycle::get_history),
        )
        .with_state(state)
}
