use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::history::HistoryEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
    ChangesRequested,
}

impl ModerationStatus {
    /// `pending` is the only state a posting can leave. A posting sent back
    /// for changes is resubmitted as a brand-new pending record by the
    /// authoring flow, not transitioned in place.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::ChangesRequested => "changes_requested",
        }
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job posting as the moderation queue sees it.
///
/// `flag_count` is informational only; it never gates a transition but
/// moderators tend to cite it in rejection reasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub submitted_by: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub moderation_status: ModerationStatus,
    pub flag_count: i32,
    pub review_history: Vec<HistoryEntry<ModerationStatus>>,
    pub moderator_notes: Option<String>,
    pub version: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    pub fn new(title: String, company: String, submitted_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            company,
            submitted_by,
            submitted_at: now,
            moderation_status: ModerationStatus::Pending,
            flag_count: 0,
            review_history: vec![HistoryEntry::new(
                ModerationStatus::Pending,
                submitted_by,
                None,
            )],
            moderator_notes: None,
            version: 1,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}
