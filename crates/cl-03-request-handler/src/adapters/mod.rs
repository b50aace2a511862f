//! Adapters layer.

pub mod local_orderer;
pub mod pending;
pub mod roles;

pub use local_orderer::LocalOrderer;
pub use pending::{cleanup_task, CommitResult, PendingCommits, PendingStats};
pub use roles::StaticRoleProvider;
