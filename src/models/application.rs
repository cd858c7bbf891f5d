use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::history::HistoryEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected | Self::Withdrawn)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate's application to a job posting.
///
/// `match_score` is computed upstream and never changes after creation.
/// `status_history` is the audit trail; the lifecycle service is the only
/// writer and always keeps the last entry in sync with `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: ApplicationStatus,
    pub match_score: i32,
    pub status_history: Vec<HistoryEntry<ApplicationStatus>>,
    pub recruiter_notes: Option<String>,
    pub version: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Application {
    /// Fresh `pending` application as the authoring flow creates it, with the
    /// initial history entry attributed to the candidate.
    pub fn new(job_id: Uuid, candidate_id: Uuid, match_score: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            job_id,
            candidate_id,
            status: ApplicationStatus::Pending,
            match_score: match_score.clamp(0, 100),
            status_history: vec![HistoryEntry::new(
                ApplicationStatus::Pending,
                candidate_id,
                None,
            )],
            recruiter_notes: None,
            version: 1,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}
