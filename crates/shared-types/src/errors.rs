//! # Error Types
//!
//! Errors that cross subsystem boundaries.

use crate::entities::{DocumentKey, SeqNo};
use thiserror::Error;

/// Errors raised by the versioned document store.
///
/// Both variants are invariant violations on the commit path. They abort the
/// commit that triggered them and leave the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The key is already occupied. Records are never overwritten.
    #[error("Key already exists: {key} (committed at seqNo {existing_seq_no})")]
    KeyAlreadyExists {
        key: DocumentKey,
        existing_seq_no: SeqNo,
    },

    /// Commits must arrive in strictly increasing sequence order.
    #[error("Sequence number not monotonic: got {got}, last committed {last}")]
    SeqNoNotMonotonic { got: SeqNo, last: SeqNo },
}

/// A role string that names no known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRoleError(pub String);
