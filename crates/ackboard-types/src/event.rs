use crate::ids::CourseId;
use serde::{Deserialize, Serialize};

/// Topic name for same-context progress notifications.
pub const PROGRESS_TOPIC: &str = "assignmentProgressUpdated";

/// Fast-path notification published after a successful acknowledgment.
///
/// Delivered only to subscribers alive in the execution context that
/// performed the write; never a source of truth. Late subscribers see
/// nothing and must reconcile from the store instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdated {
    pub course_id: CourseId,
    pub completed_count: u32,
    pub total_count: u32,
}
