//! Durable Store seam and persisted schema.
//!
//! The store contract is deliberately thin: string keys to opaque bytes, no
//! cross-key atomicity, no transactions, synchronous within one execution
//! context. Across contexts sharing one store, writes are last-write-wins per
//! key — consumers get eventual consistency via reconciliation, never
//! linearizability.

pub mod error;
pub mod schema;
pub mod store;

pub use error::StoreError;
pub use schema::{
    AcknowledgmentRow, ProgressRow, acknowledgment_key, progress_key, read_acknowledgment,
    read_progress, write_acknowledgment, write_progress,
};
pub use store::{DurableStore, MemoryStore};
