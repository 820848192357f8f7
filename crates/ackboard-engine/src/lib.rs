//! Assignment-acknowledgment state engine.
//!
//! Keeps two redundant representations — per-assignment acknowledgment rows
//! and per-course aggregate counters — consistent with each other and with
//! independently-reloading views, over a transactionless key/value store.
//! Two synchronization signals exist and must not be conflated:
//!
//! - the in-process [`ProgressUpdated`](ackboard_types::ProgressUpdated)
//!   broadcast, a fast-path notification for subscribers in the same
//!   execution context as the write;
//! - [`ViewSession::reconcile`], a full re-read and re-derivation from the
//!   store, the only mechanism that reaches views in other contexts.
//!
//! Known limitation: across execution contexts sharing one store there is no
//! locking. Writes are last-write-wins per key and the system provides only
//! eventual consistency via reconciliation, never linearizability.

pub mod aggregate;
pub mod broadcast;
pub mod catalog;
pub mod clock;
pub mod engine;
pub mod resolver;
pub mod session;

pub use aggregate::recompute;
pub use broadcast::{BroadcastBus, ProgressBus, RecordingBus};
pub use catalog::{AssignmentCatalog, StaticCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{AckOutcome, AcknowledgmentEngine, CourseSnapshot};
pub use resolver::{GroupResolver, StaticGroups};
pub use session::ViewSession;
