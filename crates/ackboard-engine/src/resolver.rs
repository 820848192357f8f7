use ackboard_types::{AssignmentId, CourseId, GroupState};
use async_trait::async_trait;
use std::collections::HashMap;

/// The consumed group-formation seam.
///
/// Resolution is asynchronous (the original backs it with a mock network
/// call). `None` means the current actor is in no group for that assignment.
/// The engine reads the result exactly once per acknowledge attempt and never
/// caches it.
#[async_trait]
pub trait GroupResolver: Send + Sync {
    async fn resolve(
        &self,
        course_id: &CourseId,
        assignment_id: &AssignmentId,
    ) -> Option<GroupState>;
}

/// Map-backed [`GroupResolver`], for tests and mock-data hosts.
#[derive(Clone, Debug, Default)]
pub struct StaticGroups {
    groups: HashMap<(CourseId, AssignmentId), GroupState>,
}

impl StaticGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(
        mut self,
        course_id: CourseId,
        assignment_id: AssignmentId,
        group: GroupState,
    ) -> Self {
        self.groups.insert((course_id, assignment_id), group);
        self
    }
}

#[async_trait]
impl GroupResolver for StaticGroups {
    async fn resolve(
        &self,
        course_id: &CourseId,
        assignment_id: &AssignmentId,
    ) -> Option<GroupState> {
        self.groups
            .get(&(course_id.clone(), assignment_id.clone()))
            .cloned()
    }
}
