//! Pure transition rules for applications and job-posting moderation.
//!
//! Every "can this action happen from this state" question is answered here
//! and nowhere else. The engine only computes a decision; it never touches
//! the store and never mutates a record.

use crate::error::{Error, Result};
use crate::models::{Action, ActorRole, ApplicationStatus, ModerationStatus};

fn invalid(from: &str, action: Action) -> Error {
    Error::InvalidTransition {
        from: from.to_string(),
        action: action.as_str().to_string(),
    }
}

fn require_reason(reason: Option<&str>) -> Result<()> {
    match reason {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(Error::ReasonRequired),
    }
}

/// Decide the next status for an application, or reject the action.
///
/// Role rules: `withdraw` belongs to the candidate (ownership of the record is
/// checked by the caller, which holds the record); every other application
/// action belongs to a recruiter.
pub fn decide_application(
    current: ApplicationStatus,
    action: Action,
    role: ActorRole,
    reason: Option<&str>,
) -> Result<ApplicationStatus> {
    use ApplicationStatus::*;

    match action {
        Action::Withdraw => {
            if role != ActorRole::Candidate {
                return Err(Error::Forbidden(
                    "only the applying candidate may withdraw".to_string(),
                ));
            }
        }
        Action::MarkReviewed | Action::Accept | Action::Reject => {
            if role != ActorRole::Recruiter {
                return Err(Error::Forbidden(format!(
                    "action '{}' requires the recruiter role",
                    action
                )));
            }
        }
        // Moderation actions never apply to an application.
        Action::Approve | Action::RequestChanges => {
            return Err(invalid(current.as_str(), action));
        }
    }

    if action == Action::Reject {
        require_reason(reason)?;
    }

    let next = match (current, action) {
        (Pending, Action::MarkReviewed) => Reviewed,
        (Pending | Reviewed, Action::Accept) => Accepted,
        (Pending | Reviewed, Action::Reject) => Rejected,
        (Pending | Reviewed, Action::Withdraw) => Withdrawn,
        _ => return Err(invalid(current.as_str(), action)),
    };
    Ok(next)
}

/// Decide the next moderation status for a job posting, or reject the action.
///
/// All moderation actions require the moderator role. Every state but
/// `pending` is terminal: a posting sent back for changes comes back as a new
/// pending record, not as a transition of this one.
pub fn decide_posting(
    current: ModerationStatus,
    action: Action,
    role: ActorRole,
    reason: Option<&str>,
) -> Result<ModerationStatus> {
    use ModerationStatus::*;

    match action {
        Action::Approve | Action::Reject | Action::RequestChanges => {
            if role != ActorRole::Moderator {
                return Err(Error::Forbidden(format!(
                    "action '{}' requires the moderator role",
                    action
                )));
            }
        }
        Action::MarkReviewed | Action::Accept | Action::Withdraw => {
            return Err(invalid(current.as_str(), action));
        }
    }

    if action == Action::Reject {
        require_reason(reason)?;
    }

    let next = match (current, action) {
        (Pending, Action::Approve) => Approved,
        (Pending, Action::Reject) => Rejected,
        (Pending, Action::RequestChanges) => ChangesRequested,
        _ => return Err(invalid(current.as_str(), action)),
    };
    Ok(next)
}
