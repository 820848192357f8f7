use crate::ids::{AssignmentId, CourseId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How an assignment is submitted.
///
/// Drives the authorization branch in the engine: `Group` assignments require
/// a leadership check against the resolved group state, `Individual` ones do
/// not consult the resolver at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    Individual,
    Group,
}

/// Authoring-side initial status hint.
///
/// `InProgress` is a pre-engine display label. It carries no weight once the
/// engine evaluates a record: derivation collapses it into the 3-state model
/// below, so a hinted record and an unhinted one derive identically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusHint {
    #[default]
    Pending,
    InProgress,
}

/// Derived assignment status. Never stored as independent truth — computed
/// from (`acknowledged`, `deadline`, `now`) on every read.
///
/// Only `Completed` is terminal. `Overdue` is a live re-derivation from the
/// clock, not a stored transition: the same record can report `Pending` before
/// the deadline and `Overdue` after it, and a late acknowledgment still moves
/// it to `Completed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Overdue,
    Completed,
}

impl AssignmentStatus {
    /// Whether this status ends the record's lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Overdue => write!(f, "overdue"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Days before a deadline at which it is flagged urgent for display.
pub const URGENT_WINDOW_DAYS: i64 = 3;

/// Display refinement of an upcoming deadline, for dashboard ordering.
///
/// Distinct from [`AssignmentStatus`]: urgency ignores acknowledgment and
/// looks only at where `now` sits relative to the deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeadlineUrgency {
    Overdue,
    /// Due within [`URGENT_WINDOW_DAYS`].
    Urgent,
    Normal,
}

impl DeadlineUrgency {
    /// Classify a deadline relative to `now`.
    pub fn classify(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if deadline < now {
            Self::Overdue
        } else if deadline < now + Duration::days(URGENT_WINDOW_DAYS) {
            Self::Urgent
        } else {
            Self::Normal
        }
    }
}

/// Authoring-flow baseline for one assignment.
///
/// Owned by the (external) assignment-authoring collaborator. The engine
/// never mutates seeds; it overlays the Durable Store's acknowledgment row on
/// top of one to build the live [`AssignmentRecord`]. Mock data may ship a
/// seed already acknowledged, which the engine treats as terminal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSeed {
    pub id: AssignmentId,
    pub course_id: CourseId,
    pub submission_type: SubmissionType,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub hint: StatusHint,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
}

/// The live acknowledgment record for one assignment.
///
/// Identity, submission type, and deadline are immutable to the engine; only
/// the acknowledgment pair changes, exactly once (pending → completed).
/// `acknowledged_at` is present iff `acknowledged`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub id: AssignmentId,
    pub course_id: CourseId,
    pub submission_type: SubmissionType,
    pub deadline: DateTime<Utc>,
    pub acknowledged: bool,
    pub acknowledged_at: Option<DateTime<Utc>>,
}

impl AssignmentRecord {
    /// Build the default record from its authoring seed, collapsing the
    /// status hint. A baseline-acknowledged seed yields an already-terminal
    /// record.
    pub fn from_seed(seed: &AssignmentSeed) -> Self {
        Self {
            id: seed.id.clone(),
            course_id: seed.course_id.clone(),
            submission_type: seed.submission_type,
            deadline: seed.deadline,
            acknowledged: seed.acknowledged,
            acknowledged_at: if seed.acknowledged {
                seed.acknowledged_at
            } else {
                None
            },
        }
    }

    /// Derive the status at observation time `now`.
    ///
    /// Pure over (`acknowledged`, `deadline`, `now`); two reads on either side
    /// of the deadline may legitimately disagree for an unacknowledged record.
    pub fn status_at(&self, now: DateTime<Utc>) -> AssignmentStatus {
        if self.acknowledged {
            AssignmentStatus::Completed
        } else if now > self.deadline {
            AssignmentStatus::Overdue
        } else {
            AssignmentStatus::Pending
        }
    }

    /// Stamp the one permitted transition (pending → completed).
    ///
    /// Idempotence is the caller's concern; this assumes the record is not
    /// yet acknowledged.
    pub fn mark_acknowledged(&mut self, at: DateTime<Utc>) {
        debug_assert!(!self.acknowledged, "acknowledge is a one-shot transition");
        self.acknowledged = true;
        self.acknowledged_at = Some(at);
    }
}
