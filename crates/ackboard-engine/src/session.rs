use crate::engine::{AcknowledgmentEngine, CourseSnapshot};
use ackboard_types::{
    AssignmentRecord, CourseId, DashboardStats, DeadlineUrgency, ProgressUpdated,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// A view subscriber's cached state for one execution context.
///
/// Holds per-course snapshots that are only ever rebuilt wholesale by
/// [`reconcile`](Self::reconcile) or nudged by a same-context
/// [`ProgressUpdated`] event. A session in another context never sees the
/// event; it converges by reconciling on any possibly-stale signal (focus
/// regain, visibility change, poll timer).
pub struct ViewSession {
    engine: Arc<AcknowledgmentEngine>,
    snapshots: BTreeMap<CourseId, CourseSnapshot>,
}

impl ViewSession {
    /// A session with empty caches. Callers reconcile on mount, mirroring a
    /// view's initial load.
    pub fn new(engine: Arc<AcknowledgmentEngine>) -> Self {
        Self {
            engine,
            snapshots: BTreeMap::new(),
        }
    }

    /// Discard every cached snapshot and re-derive from the Durable Store.
    ///
    /// The only mechanism that observes writes made in other execution
    /// contexts.
    pub fn reconcile(&mut self) {
        self.snapshots.clear();
        for course_id in self.engine.catalog().courses() {
            let snapshot = self.engine.reconcile_course(&course_id);
            self.snapshots.insert(course_id, snapshot);
        }
        debug!(courses = self.snapshots.len(), "session reconciled");
    }

    /// Fold a same-context progress event into the cached counters.
    ///
    /// Fast path only — the event is a notification, not truth. Events for
    /// courses this session has never loaded are ignored; the initial
    /// reconcile covers them.
    pub fn apply_event(&mut self, event: &ProgressUpdated) {
        if let Some(snapshot) = self.snapshots.get_mut(&event.course_id) {
            snapshot.progress.completed_count = event.completed_count;
            snapshot.progress.total_assignments = event.total_count;
            snapshot.progress.pending_count =
                event.total_count.saturating_sub(event.completed_count);
        }
    }

    /// The cached snapshot for one course, if loaded.
    pub fn course(&self, course_id: &CourseId) -> Option<&CourseSnapshot> {
        self.snapshots.get(course_id)
    }

    /// Cross-course dashboard totals over the cached snapshots.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_progress(self.snapshots.values().map(|s| &s.progress))
    }

    /// Unacknowledged records across all cached courses, soonest deadline
    /// first, each classified for display urgency at the current clock.
    pub fn upcoming_deadlines(&self) -> Vec<(AssignmentRecord, DeadlineUrgency)> {
        let now = self.engine.clock().now();
        let mut upcoming: Vec<_> = self
            .snapshots
            .values()
            .flat_map(|s| s.records.iter())
            .filter(|r| !r.acknowledged)
            .cloned()
            .map(|r| {
                let urgency = DeadlineUrgency::classify(r.deadline, now);
                (r, urgency)
            })
            .collect();
        upcoming.sort_by_key(|(r, _)| r.deadline);
        upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::RecordingBus;
    use crate::catalog::StaticCatalog;
    use crate::clock::FixedClock;
    use crate::resolver::StaticGroups;
    use ackboard_store::MemoryStore;
    use ackboard_types::{
        AssignmentId, AssignmentSeed, AssignmentStatus, StatusHint, SubmissionType,
    };
    use chrono::{DateTime, TimeZone, Utc};

    fn seed(course: &str, id: &str, deadline: DateTime<Utc>) -> AssignmentSeed {
        AssignmentSeed {
            id: AssignmentId::new(id),
            course_id: CourseId::new(course),
            submission_type: SubmissionType::Individual,
            deadline,
            hint: StatusHint::Pending,
            acknowledged: false,
            acknowledged_at: None,
        }
    }

    fn catalog() -> StaticCatalog {
        let d1 = Utc.with_ymd_and_hms(2024, 12, 22, 23, 59, 0).unwrap();
        let d2 = Utc.with_ymd_and_hms(2024, 12, 28, 23, 59, 0).unwrap();
        StaticCatalog::new()
            .with_course(
                CourseId::new("3"),
                vec![seed("3", "5", d1), seed("3", "6", d2)],
            )
            .with_course(
                CourseId::new("1"),
                vec![seed(
                    "1",
                    "2",
                    Utc.with_ymd_and_hms(2024, 12, 20, 23, 59, 0).unwrap(),
                )],
            )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap()
    }

    /// One "tab": engine plus its own bus over a shared store clone.
    fn tab(store: MemoryStore) -> (Arc<AcknowledgmentEngine>, Arc<RecordingBus>) {
        let bus = Arc::new(RecordingBus::new());
        let engine = Arc::new(AcknowledgmentEngine::new(
            Arc::new(store),
            Arc::new(catalog()),
            Arc::new(StaticGroups::new()),
            bus.clone(),
            Arc::new(FixedClock(now())),
        ));
        (engine, bus)
    }

    #[tokio::test]
    async fn reconcile_populates_snapshots_and_stats() {
        let (engine, _) = tab(MemoryStore::new());
        let mut session = ViewSession::new(engine.clone());
        assert_eq!(session.stats(), DashboardStats::default());

        session.reconcile();

        let stats = session.stats();
        assert_eq!(stats.total_courses, 2);
        assert_eq!(stats.total_assignments, 3);
        assert_eq!(stats.completed_assignments, 0);
        assert_eq!(stats.pending_assignments, 3);
        assert!(session.course(&CourseId::new("3")).is_some());
    }

    #[tokio::test]
    async fn cross_context_write_becomes_visible_after_reconcile() {
        let shared = MemoryStore::new();
        let (engine_a, _bus_a) = tab(shared.clone());
        let (engine_b, bus_b) = tab(shared.clone());

        // Context B renders before A writes.
        let mut session_b = ViewSession::new(engine_b);
        session_b.reconcile();

        // Context A acknowledges assignment 5 in course 3.
        engine_a
            .acknowledge(&CourseId::new("3"), &AssignmentId::new("5"))
            .await
            .unwrap();

        // B received no in-process event across the context boundary.
        assert!(bus_b.events().is_empty());
        assert_eq!(
            session_b
                .course(&CourseId::new("3"))
                .unwrap()
                .progress
                .completed_count,
            0
        );

        // Focus regain: B discards its view and re-reads the store.
        session_b.reconcile();

        let snapshot = session_b.course(&CourseId::new("3")).unwrap();
        let five = snapshot
            .records
            .iter()
            .find(|r| r.id.as_str() == "5")
            .unwrap();
        assert_eq!(five.status_at(now()), AssignmentStatus::Completed);
        assert_eq!(snapshot.progress.completed_count, 1);
        assert_eq!(snapshot.progress.pending_count, 1);
        assert!(snapshot.progress.is_consistent());
    }

    #[tokio::test]
    async fn same_context_event_updates_cached_counters() {
        let (engine, _) = tab(MemoryStore::new());
        let mut session = ViewSession::new(engine.clone());
        session.reconcile();

        // Fold the fast-path notification without touching the store.
        session.apply_event(&ProgressUpdated {
            course_id: CourseId::new("3"),
            completed_count: 1,
            total_count: 2,
        });

        let progress = &session.course(&CourseId::new("3")).unwrap().progress;
        assert_eq!(progress.completed_count, 1);
        assert_eq!(progress.pending_count, 1);
        assert!(progress.is_consistent());
    }

    #[tokio::test]
    async fn event_for_unloaded_course_is_ignored() {
        let (engine, _) = tab(MemoryStore::new());
        let mut session = ViewSession::new(engine);

        session.apply_event(&ProgressUpdated {
            course_id: CourseId::new("3"),
            completed_count: 1,
            total_count: 2,
        });

        assert!(session.course(&CourseId::new("3")).is_none());
    }

    #[tokio::test]
    async fn upcoming_deadlines_skip_acknowledged_and_sort_soonest_first() {
        let (engine, _) = tab(MemoryStore::new());

        engine
            .acknowledge(&CourseId::new("1"), &AssignmentId::new("2"))
            .await
            .unwrap();

        let mut session = ViewSession::new(engine);
        session.reconcile();

        let upcoming = session.upcoming_deadlines();
        let ids: Vec<_> = upcoming.iter().map(|(r, _)| r.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "6"]);

        // Dec 22 deadline seen on Dec 21 is inside the urgent window;
        // Dec 28 is not.
        assert_eq!(upcoming[0].1, DeadlineUrgency::Urgent);
        assert_eq!(upcoming[1].1, DeadlineUrgency::Normal);
    }
}
