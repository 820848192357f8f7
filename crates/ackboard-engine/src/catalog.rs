use ackboard_types::{AssignmentId, AssignmentSeed, CourseId};
use std::collections::BTreeMap;

/// Read-only view of the assignment-authoring collaborator's data.
///
/// Seeds carry identity, deadline, submission type, and the authoring
/// baseline; the engine overlays the store's acknowledgment rows on top of
/// them and never writes back through this seam.
pub trait AssignmentCatalog: Send + Sync {
    /// Course identifiers known to the catalog.
    fn courses(&self) -> Vec<CourseId>;

    /// All seeds for one course. Unknown courses yield an empty set.
    fn assignments(&self, course_id: &CourseId) -> Vec<AssignmentSeed>;

    /// Lookup one seed by its composite identity.
    fn find(&self, course_id: &CourseId, assignment_id: &AssignmentId) -> Option<AssignmentSeed> {
        self.assignments(course_id)
            .into_iter()
            .find(|seed| &seed.id == assignment_id)
    }
}

/// Map-backed [`AssignmentCatalog`], for tests and mock-data hosts.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    courses: BTreeMap<CourseId, Vec<AssignmentSeed>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a course with its seeds, replacing any previous entry.
    pub fn with_course(mut self, course_id: CourseId, seeds: Vec<AssignmentSeed>) -> Self {
        self.courses.insert(course_id, seeds);
        self
    }
}

impl AssignmentCatalog for StaticCatalog {
    fn courses(&self) -> Vec<CourseId> {
        self.courses.keys().cloned().collect()
    }

    fn assignments(&self, course_id: &CourseId) -> Vec<AssignmentSeed> {
        self.courses.get(course_id).cloned().unwrap_or_default()
    }
}
