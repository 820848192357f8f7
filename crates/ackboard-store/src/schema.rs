use crate::error::StoreError;
use crate::store::DurableStore;
use ackboard_types::{AssignmentId, CourseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key for one assignment's acknowledgment row.
pub fn acknowledgment_key(course_id: &CourseId, assignment_id: &AssignmentId) -> String {
    format!("acknowledgment_{course_id}_{assignment_id}")
}

/// Key for one course's aggregate row.
pub fn progress_key(course_id: &CourseId) -> String {
    format!("course_progress_{course_id}")
}

/// Persisted acknowledgment row.
///
/// Only `acknowledged`/`acknowledgedAt` are authoritative source fields. The
/// `status` string is a display cache for out-of-process collaborators; this
/// engine writes `"completed"` and never reads the field back as truth —
/// status is re-derived from the source fields on every read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgmentRow {
    pub acknowledged: bool,
    pub acknowledged_at: DateTime<Utc>,
    pub status: String,
}

impl AcknowledgmentRow {
    /// The row written on first acknowledgment.
    pub fn completed(acknowledged_at: DateTime<Utc>) -> Self {
        Self {
            acknowledged: true,
            acknowledged_at,
            status: "completed".to_owned(),
        }
    }
}

/// Persisted per-course aggregate row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRow {
    pub completed: u32,
    pub pending: u32,
    pub assignments: u32,
}

fn decode<T: for<'de> Deserialize<'de>>(key: &str, bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Corrupt {
        key: key.to_owned(),
        source,
    })
}

/// Read an acknowledgment row, self-healing on corruption.
///
/// Missing key → `None` (never acknowledged). Malformed bytes → `None` with a
/// `warn!`; the condition never reaches the caller as an error.
pub fn read_acknowledgment(
    store: &dyn DurableStore,
    course_id: &CourseId,
    assignment_id: &AssignmentId,
) -> Option<AcknowledgmentRow> {
    let key = acknowledgment_key(course_id, assignment_id);
    let bytes = store.get(&key)?;
    match decode(&key, &bytes) {
        Ok(row) => Some(row),
        Err(err) => {
            warn!(%key, %err, "discarding corrupt acknowledgment row");
            None
        }
    }
}

/// Persist an acknowledgment row under its composite key.
pub fn write_acknowledgment(
    store: &dyn DurableStore,
    course_id: &CourseId,
    assignment_id: &AssignmentId,
    row: &AcknowledgmentRow,
) {
    let key = acknowledgment_key(course_id, assignment_id);
    let bytes = serde_json::to_vec(row).expect("acknowledgment row serializes");
    store.set(&key, bytes);
}

/// Read a course aggregate row, with the same self-healing as acknowledgment
/// reads. Callers treat `None` as "recompute from records".
pub fn read_progress(store: &dyn DurableStore, course_id: &CourseId) -> Option<ProgressRow> {
    let key = progress_key(course_id);
    let bytes = store.get(&key)?;
    match decode(&key, &bytes) {
        Ok(row) => Some(row),
        Err(err) => {
            warn!(%key, %err, "discarding corrupt progress row");
            None
        }
    }
}

/// Persist a course aggregate row.
pub fn write_progress(store: &dyn DurableStore, course_id: &CourseId, row: &ProgressRow) {
    let key = progress_key(course_id);
    let bytes = serde_json::to_vec(row).expect("progress row serializes");
    store.set(&key, bytes);
}
