//! # Shared Types Crate
//!
//! This crate contains the domain entities, the wire reply envelope and the
//! error types that more than one subsystem needs.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Every cross-subsystem type is defined here.
//! - **Immutable Records**: A [`Document`] is only ever built by committing a
//!   [`DocumentDraft`] with the sequence number and commit time handed back by
//!   ordering. Nothing mutates a committed document.
//! - **Wire Fidelity**: Field names on the wire (`reqId`, `seqNo`, `txnTime`)
//!   are fixed by serde attributes, never by Rust naming.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::*;
pub use errors::*;
