//! # Node Runtime Library
//!
//! This library exposes the wiring and the JSON-lines front end of the node
//! for testing. The main entry point is the `main.rs` binary.
//!
//! ```text
//! stdin line ──parse──→ RequestHandler ──→ reply / nack ──→ stdout line
//!                           │
//!                           └── LocalOrderer ──commits──→ CommitApplier ──→ store
//! ```

pub mod container;
pub mod handlers;

pub use container::{ConfigError, NodeConfig, NodeContainer};
pub use handlers::process_line;
