//! # Versioned Document Store Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Holds every committed document, keyed by `(author, name, version)`.
//! Append-only: a key is written once and never overwritten or removed.
//! Every replica that applies the same commit stream ends up with the same
//! contents.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Unique key, never overwritten | `put()` via map entry, `KeyAlreadyExists` |
//! | Strictly increasing `seqNo` | `put()` against the commit tip, `SeqNoNotMonotonic` |
//! | Exact-match reads | `get()` compares key and `docType` |
//! | Readers see whole documents only | documents are published as `Arc<Document>` |
//!
//! A failed `put` leaves the store exactly as it was.
//!
//! ## Module Structure
//!
//! ```text
//! domain/mod.rs       - StoreStats (entities come from shared-types)
//! ports/inbound.rs    - DocumentStore trait
//! adapters/memory.rs  - InMemoryDocumentStore (DashMap + commit tip)
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryDocumentStore;
pub use domain::*;
pub use ports::*;
