//! # Context Ledger Test Suite
//!
//! Unified test crate reproducing what a client observes when talking to a
//! node: every scenario starts a fully wired node and drives it through the
//! request handler.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── mod.rs          # Node harness and request builders
//!     ├── set_context.rs  # Writes: commit, authorization, conflicts
//!     ├── get_context.rs  # Reads: exact match, absent results, rejections
//!     └── properties.rs   # Property tests over live nodes
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cl-tests
//! ```

pub mod integration;
