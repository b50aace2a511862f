//! Domain layer: store statistics. Entities and errors live in `shared-types`.

pub use shared_types::{DocType, Document, DocumentKey, SeqNo, StoreError};

/// Point-in-time counters for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub documents: usize,
    pub last_seq_no: Option<SeqNo>,
}
