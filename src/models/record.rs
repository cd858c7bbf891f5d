use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::application::Application;
use crate::models::history::HistoryEntry;
use crate::models::job_posting::JobPosting;

/// Everything the lifecycle engine can be asked to do, across both entity
/// types. Which actions are legal where is decided by the transition engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MarkReviewed,
    Accept,
    Reject,
    Withdraw,
    Approve,
    RequestChanges,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MarkReviewed => "mark_reviewed",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Withdraw => "withdraw",
            Self::Approve => "approve",
            Self::RequestChanges => "request_changes",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Candidate,
    Recruiter,
    Moderator,
}

impl ActorRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Recruiter => "recruiter",
            Self::Moderator => "moderator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    Application,
    JobPosting,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::JobPosting => "jobPosting",
        }
    }
}

/// A lifecycle-managed record. The store keys these by id and the discriminant
/// travels with the payload so any backing store can round-trip it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "entity_type", rename_all = "snake_case")]
pub enum Record {
    Application(Application),
    JobPosting(JobPosting),
}

impl Record {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Application(app) => app.id,
            Self::JobPosting(posting) => posting.id,
        }
    }

    pub fn version(&self) -> i64 {
        match self {
            Self::Application(app) => app.version,
            Self::JobPosting(posting) => posting.version,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Application(_) => EntityType::Application,
            Self::JobPosting(_) => EntityType::JobPosting,
        }
    }

    pub fn status_name(&self) -> &'static str {
        match self {
            Self::Application(app) => app.status.as_str(),
            Self::JobPosting(posting) => posting.moderation_status.as_str(),
        }
    }

    /// Status-agnostic view of the audit trail, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry<String>> {
        match self {
            Self::Application(app) => app
                .status_history
                .iter()
                .map(|entry| HistoryEntry {
                    status: entry.status.as_str().to_string(),
                    timestamp: entry.timestamp,
                    actor_id: entry.actor_id,
                    note: entry.note.clone(),
                })
                .collect(),
            Self::JobPosting(posting) => posting
                .review_history
                .iter()
                .map(|entry| HistoryEntry {
                    status: entry.status.as_str().to_string(),
                    timestamp: entry.timestamp,
                    actor_id: entry.actor_id,
                    note: entry.note.clone(),
                })
                .collect(),
        }
    }

    pub fn bump_version(&mut self) {
        match self {
            Self::Application(app) => app.version += 1,
            Self::JobPosting(posting) => posting.version += 1,
        }
    }

    /// Notes are a side channel: versioned like any write, but never part of
    /// the audit trail and legal in terminal states.
    pub fn set_notes(&mut self, notes: Option<String>, now: DateTime<Utc>) {
        match self {
            Self::Application(app) => {
                app.recruiter_notes = notes;
                app.updated_at = Some(now);
            }
            Self::JobPosting(posting) => {
                posting.moderator_notes = notes;
                posting.updated_at = Some(now);
            }
        }
    }
}
