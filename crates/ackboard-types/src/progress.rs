use crate::ids::CourseId;
use serde::{Deserialize, Serialize};

/// Derived per-course progress counters.
///
/// Entirely owned by the aggregator: recomputed wholesale from the current
/// record set on every successful acknowledgment and on every reconciliation
/// read, never incrementally patched. Overdue records count toward
/// `pending_count` — overdue is a display refinement of pending, not a third
/// bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseProgress {
    pub course_id: CourseId,
    pub total_assignments: u32,
    pub completed_count: u32,
    pub pending_count: u32,
}

impl CourseProgress {
    /// The all-zero progress for a course with no records.
    pub fn empty(course_id: CourseId) -> Self {
        Self {
            course_id,
            total_assignments: 0,
            completed_count: 0,
            pending_count: 0,
        }
    }

    /// Holds after every successful recompute: completed + pending == total.
    pub fn is_consistent(&self) -> bool {
        self.completed_count + self.pending_count == self.total_assignments
    }

    /// Completed share in `[0.0, 1.0]`; `0.0` for an empty course.
    pub fn completion_rate(&self) -> f64 {
        if self.total_assignments == 0 {
            0.0
        } else {
            f64::from(self.completed_count) / f64::from(self.total_assignments)
        }
    }
}

/// Cross-course dashboard totals, folded from per-course progress.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_courses: u32,
    pub total_assignments: u32,
    pub completed_assignments: u32,
    pub pending_assignments: u32,
}

impl DashboardStats {
    /// Sum a set of course aggregates. Order-independent.
    pub fn from_progress<'a>(progress: impl IntoIterator<Item = &'a CourseProgress>) -> Self {
        progress
            .into_iter()
            .fold(Self::default(), |mut stats, course| {
                stats.total_courses += 1;
                stats.total_assignments += course.total_assignments;
                stats.completed_assignments += course.completed_count;
                stats.pending_assignments += course.pending_count;
                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(course: &str, total: u32, completed: u32) -> CourseProgress {
        CourseProgress {
            course_id: CourseId::new(course),
            total_assignments: total,
            completed_count: completed,
            pending_count: total - completed,
        }
    }

    #[test]
    fn empty_progress_is_consistent() {
        let empty = CourseProgress::empty(CourseId::new("1"));
        assert!(empty.is_consistent());
        assert_eq!(empty.completion_rate(), 0.0);
    }

    #[test]
    fn completion_rate_is_completed_over_total() {
        assert_eq!(progress("1", 4, 1).completion_rate(), 0.25);
        assert_eq!(progress("1", 2, 2).completion_rate(), 1.0);
    }

    #[test]
    fn stats_sum_across_courses() {
        let courses = [progress("1", 2, 1), progress("2", 2, 0), progress("3", 2, 1)];
        let stats = DashboardStats::from_progress(&courses);
        similar_asserts::assert_eq!(
            stats,
            DashboardStats {
                total_courses: 3,
                total_assignments: 6,
                completed_assignments: 2,
                pending_assignments: 4,
            }
        );
    }

    #[test]
    fn stats_are_order_independent() {
        let a = [progress("1", 2, 1), progress("2", 3, 2)];
        let b = [progress("2", 3, 2), progress("1", 2, 1)];
        assert_eq!(
            DashboardStats::from_progress(&a),
            DashboardStats::from_progress(&b)
        );
    }
}
