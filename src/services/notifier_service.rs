use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use uuid::Uuid;

use crate::models::EntityType;

/// Event handed off to the downstream notifier after a committed transition.
/// Consumers drive email/in-app notifications from it; delivery is their
/// problem, not ours.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    pub record_id: Uuid,
    pub entity_type: EntityType,
    pub previous_status: String,
    pub new_status: String,
    pub actor_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Best-effort hand-off to the notification webhook. Emission happens off the
/// commit path: an unreachable notifier logs a warning and the transition
/// stays committed.
#[derive(Clone)]
pub struct NotifierService {
    client: Client,
    target_url: Option<String>,
}

impl NotifierService {
    pub fn new(target_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            target_url,
        }
    }

    pub fn emit(&self, event: LifecycleEvent) {
        let Some(url) = self.target_url.clone() else {
            tracing::debug!(
                record_id = %event.record_id,
                new_status = %event.new_status,
                "no notifier configured, dropping lifecycle event"
            );
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.post(&url).json(&event).send().await {
                Ok(resp) if resp.status().is_success() => {}
                Ok(resp) => {
                    tracing::warn!(
                        record_id = %event.record_id,
                        status = %resp.status(),
                        "notifier rejected lifecycle event"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        record_id = %event.record_id,
                        error = %err,
                        "failed to deliver lifecycle event"
                    );
                }
            }
        });
    }
}
