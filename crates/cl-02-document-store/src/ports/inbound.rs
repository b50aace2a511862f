//! # Inbound Ports
//!
//! The store is driven by the request handler: `put` from the commit path,
//! everything else from the read path.

use crate::domain::{DocType, Document, DocumentKey, SeqNo, StoreError, StoreStats};
use std::sync::Arc;

/// Append-only store of committed documents.
///
/// Readers only ever observe fully committed documents. A reader may wait
/// on a concurrent `put` only while that put inserts its document, and only
/// for keys that share storage with the written key. A reader never waits
/// for a put that is itself waiting on another put.
pub trait DocumentStore: Send + Sync {
    /// Insert a committed document.
    ///
    /// Fails with [`StoreError::KeyAlreadyExists`] if the key is occupied and
    /// with [`StoreError::SeqNoNotMonotonic`] if `seq_no` does not advance.
    /// On failure the store is unchanged.
    fn put(&self, document: Document) -> Result<Arc<Document>, StoreError>;

    /// Exact match on all four of author, name, version and type.
    fn get(&self, key: &DocumentKey, doc_type: DocType) -> Option<Arc<Document>>;

    fn contains_key(&self, key: &DocumentKey) -> bool;

    fn get_by_seq_no(&self, seq_no: SeqNo) -> Option<Arc<Document>>;

    fn last_seq_no(&self) -> Option<SeqNo>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> StoreStats {
        StoreStats {
            documents: self.len(),
            last_seq_no: self.last_seq_no(),
        }
    }
}
