pub mod error;
pub mod event;
pub mod group;
pub mod ids;
pub mod progress;
pub mod record;

pub use error::AcknowledgeError;
pub use event::{PROGRESS_TOPIC, ProgressUpdated};
pub use group::{GroupId, GroupMembership, GroupState};
pub use ids::{AssignmentId, CourseId};
pub use progress::{CourseProgress, DashboardStats};
pub use record::{
    AssignmentRecord, AssignmentSeed, AssignmentStatus, DeadlineUrgency, StatusHint,
    SubmissionType, URGENT_WINDOW_DAYS,
};
