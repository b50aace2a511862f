//! # Outbound Ports
//!
//! Collaborators the handler depends on.
//!
//! | Port | Collaborator | Purpose |
//! |------|--------------|---------|
//! | `OrderingService` | BFT ordering | Assigns `seqNo` and commit time to writes |
//! | `RoleProvider` | Role/credential management | Submitter role for authorization |

use crate::domain::{OrderingError, OrderingRequest, RoleLookupError};
use async_trait::async_trait;
use shared_types::Role;

/// Ordering/consensus boundary.
///
/// `submit` returns once the write is accepted for ordering. The commit
/// arrives later through `RequestHandlerApi::on_commit`; timeouts belong to
/// the ordering side.
#[async_trait]
pub trait OrderingService: Send + Sync {
    async fn submit(&self, request: OrderingRequest) -> Result<(), OrderingError>;
}

/// Role lookup. `Ok(None)` means the identity has no role record.
pub trait RoleProvider: Send + Sync {
    fn role_of(&self, identifier: &str) -> Result<Option<Role>, RoleLookupError>;
}
