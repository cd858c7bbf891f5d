pub mod application;
pub mod history;
pub mod job_posting;
pub mod record;

pub use application::{Application, ApplicationStatus};
pub use history::HistoryEntry;
pub use job_posting::{JobPosting, ModerationStatus};
pub use record::{Action, ActorRole, EntityType, Record};
