use crate::ids::{AssignmentId, CourseId};

/// Validation failures surfaced by the acknowledgment engine.
///
/// All variants occur before any write; a failed call leaves both the record
/// and the course aggregate untouched. Note what is deliberately absent:
/// "already acknowledged" is not an error (idempotent success) and corrupt
/// store bytes self-heal inside the store layer without reaching callers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AcknowledgeError {
    /// Group-type assignment with no group membership. The caller should
    /// route the user to the group-formation flow.
    #[error("assignment {assignment_id} requires group membership to acknowledge")]
    GroupRequired { assignment_id: AssignmentId },

    /// Actor is a group member but not the leader. The caller should present
    /// a waiting-for-leader state, not an error dialog.
    #[error("only group leader {leader_id} may acknowledge assignment {assignment_id}")]
    PermissionDenied {
        assignment_id: AssignmentId,
        leader_id: String,
    },

    /// A second acknowledge for the same assignment while the first is still
    /// resolving in this context. Transient; retry after the in-flight call
    /// completes.
    #[error("acknowledgment already in flight for assignment {assignment_id}")]
    AlreadyInFlight { assignment_id: AssignmentId },

    /// The assignment is unknown to the authoring catalog.
    #[error("assignment {assignment_id} not found in course {course_id}")]
    UnknownAssignment {
        course_id: CourseId,
        assignment_id: AssignmentId,
    },
}
