use ackboard_types::{AssignmentRecord, CourseId, CourseProgress};

/// Recompute a course's aggregate from its full current record set.
///
/// Pure and total: defined for zero records (all-zero progress), independent
/// of record order, and identical on identical input. The engine always
/// re-derives the aggregate through this function rather than patching
/// counters incrementally, so out-of-band record mutations cannot make the
/// counters drift.
///
/// Overdue records count toward `pending_count`: overdue is a display
/// refinement of pending, not a third bucket.
pub fn recompute(course_id: &CourseId, records: &[AssignmentRecord]) -> CourseProgress {
    let total = records.len() as u32;
    let completed = records.iter().filter(|r| r.acknowledged).count() as u32;
    CourseProgress {
        course_id: course_id.clone(),
        total_assignments: total,
        completed_count: completed,
        pending_count: total - completed,
    }
}
