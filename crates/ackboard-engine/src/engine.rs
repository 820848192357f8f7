use crate::aggregate::recompute;
use crate::broadcast::ProgressBus;
use crate::catalog::AssignmentCatalog;
use crate::clock::Clock;
use crate::resolver::GroupResolver;
use ackboard_store::{
    AcknowledgmentRow, DurableStore, ProgressRow, read_acknowledgment, write_acknowledgment,
    write_progress,
};
use ackboard_types::{
    AcknowledgeError, AssignmentId, AssignmentRecord, AssignmentSeed, CourseId, CourseProgress,
    GroupMembership, ProgressUpdated, SubmissionType,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Result of a successful `acknowledge` call.
///
/// `AlreadyAcknowledged` is success, not failure: the record was terminal
/// before the call, nothing was written, and nothing was published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AckOutcome {
    /// First acknowledgment: record persisted, aggregate recomputed and
    /// persisted, event published.
    Acknowledged {
        acknowledged_at: DateTime<Utc>,
        progress: CourseProgress,
    },
    /// Idempotent no-op carrying the existing timestamp (absent only for
    /// baseline-acknowledged seeds that never carried one).
    AlreadyAcknowledged {
        acknowledged_at: Option<DateTime<Utc>>,
    },
}

/// One course's reconciled view: live records plus their re-derived aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseSnapshot {
    pub records: Vec<AssignmentRecord>,
    pub progress: CourseProgress,
}

/// The state-machine core: validates, mutates, persists, recomputes,
/// broadcasts.
///
/// All collaborators are injected at construction — the engine holds no
/// hidden global reference, so unit tests run against in-memory doubles.
/// Only this engine writes `acknowledgment_*` and `course_progress_*` keys;
/// every other collaborator is read-only over them.
pub struct AcknowledgmentEngine {
    store: Arc<dyn DurableStore>,
    catalog: Arc<dyn AssignmentCatalog>,
    resolver: Arc<dyn GroupResolver>,
    bus: Arc<dyn ProgressBus>,
    clock: Arc<dyn Clock>,
    /// Assignments with an acknowledge currently resolving in this context.
    in_flight: Mutex<HashSet<(CourseId, AssignmentId)>>,
}

impl AcknowledgmentEngine {
    pub fn new(
        store: Arc<dyn DurableStore>,
        catalog: Arc<dyn AssignmentCatalog>,
        resolver: Arc<dyn GroupResolver>,
        bus: Arc<dyn ProgressBus>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            catalog,
            resolver,
            bus,
            clock,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Acknowledge one assignment for the current actor.
    ///
    /// Preconditions run before any write: per-assignment in-flight guard,
    /// catalog lookup, idempotency check, then (for group assignments) the
    /// leadership gate against the resolver. On first acknowledgment the side
    /// effects are strictly sequential: persist the record row, recompute the
    /// course aggregate from the full record set, persist it, publish
    /// [`ProgressUpdated`]. A validation failure leaves no partial state.
    ///
    /// Not cancellable once past validation, and not reentrant per
    /// assignment: a second call for the same id while one is resolving in
    /// this context gets [`AcknowledgeError::AlreadyInFlight`].
    pub async fn acknowledge(
        &self,
        course_id: &CourseId,
        assignment_id: &AssignmentId,
    ) -> Result<AckOutcome, AcknowledgeError> {
        let _guard = self.claim_in_flight(course_id, assignment_id)?;

        let seed = self.catalog.find(course_id, assignment_id).ok_or_else(|| {
            AcknowledgeError::UnknownAssignment {
                course_id: course_id.clone(),
                assignment_id: assignment_id.clone(),
            }
        })?;

        let record = self.load_record(&seed);
        if record.acknowledged {
            // Strict no-op: no re-timestamp, no writes, no broadcast.
            return Ok(AckOutcome::AlreadyAcknowledged {
                acknowledged_at: record.acknowledged_at,
            });
        }

        if seed.submission_type == SubmissionType::Group {
            match self.resolver.resolve(course_id, assignment_id).await {
                None => {
                    return Err(AcknowledgeError::GroupRequired {
                        assignment_id: assignment_id.clone(),
                    });
                }
                Some(group) => match group.membership() {
                    GroupMembership::Leader => {}
                    GroupMembership::Member { leader_id } => {
                        return Err(AcknowledgeError::PermissionDenied {
                            assignment_id: assignment_id.clone(),
                            leader_id,
                        });
                    }
                },
            }
        }

        let now = self.clock.now();
        write_acknowledgment(
            self.store.as_ref(),
            course_id,
            assignment_id,
            &AcknowledgmentRow::completed(now),
        );

        // Full re-derivation over the course's current record set, never an
        // increment, so out-of-band mutations cannot skew the counters.
        let records = self.load_course(course_id);
        let progress = recompute(course_id, &records);
        write_progress(
            self.store.as_ref(),
            course_id,
            &ProgressRow {
                completed: progress.completed_count,
                pending: progress.pending_count,
                assignments: progress.total_assignments,
            },
        );

        self.bus.publish(ProgressUpdated {
            course_id: course_id.clone(),
            completed_count: progress.completed_count,
            total_count: progress.total_assignments,
        });

        debug!(
            %course_id,
            %assignment_id,
            completed = progress.completed_count,
            total = progress.total_assignments,
            "assignment acknowledged"
        );

        Ok(AckOutcome::Acknowledged {
            acknowledged_at: now,
            progress,
        })
    }

    /// Load one course's live records: catalog seeds overlaid with the
    /// store's acknowledgment rows.
    pub fn load_course(&self, course_id: &CourseId) -> Vec<AssignmentRecord> {
        self.catalog
            .assignments(course_id)
            .iter()
            .map(|seed| self.load_record(seed))
            .collect()
    }

    /// Re-read one course from scratch and re-derive its aggregate.
    ///
    /// This is the reconciliation read path; it takes nothing from memory and
    /// writes nothing back.
    pub fn reconcile_course(&self, course_id: &CourseId) -> CourseSnapshot {
        let records = self.load_course(course_id);
        let progress = recompute(course_id, &records);
        CourseSnapshot { records, progress }
    }

    pub(crate) fn catalog(&self) -> &dyn AssignmentCatalog {
        self.catalog.as_ref()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    fn load_record(&self, seed: &AssignmentSeed) -> AssignmentRecord {
        let mut record = AssignmentRecord::from_seed(seed);
        // Missing row: never acknowledged here. Corrupt row: already healed
        // to None (and logged) by the store layer.
        if let Some(row) = read_acknowledgment(self.store.as_ref(), &seed.course_id, &seed.id) {
            if row.acknowledged {
                record.acknowledged = true;
                record.acknowledged_at = Some(row.acknowledged_at);
            }
        }
        record
    }

    fn claim_in_flight(
        &self,
        course_id: &CourseId,
        assignment_id: &AssignmentId,
    ) -> Result<InFlightGuard<'_>, AcknowledgeError> {
        let key = (course_id.clone(), assignment_id.clone());
        let mut in_flight = self.in_flight.lock().expect("in-flight mutex poisoned");
        if !in_flight.insert(key.clone()) {
            return Err(AcknowledgeError::AlreadyInFlight {
                assignment_id: assignment_id.clone(),
            });
        }
        Ok(InFlightGuard { engine: self, key })
    }
}

/// Releases the per-assignment in-flight claim when the acknowledge call
/// resolves, whether by success, validation failure, or drop.
struct InFlightGuard<'a> {
    engine: &'a AcknowledgmentEngine,
    key: (CourseId, AssignmentId),
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.engine
            .in_flight
            .lock()
            .expect("in-flight mutex poisoned")
            .remove(&self.key);
    }
}
