//! Request handler errors.

use cl_01_request_validation::Rejection;
use shared_types::{DocumentKey, RequestKey, StoreError};
use thiserror::Error;

/// Errors from the ordering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    #[error("Ordering service unavailable: {0}")]
    Unavailable(String),

    #[error("Ordering service is shut down")]
    Shutdown,
}

/// The role collaborator could not answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Role lookup failed: {0}")]
pub struct RoleLookupError(pub String);

/// Why a write could not be registered as pending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("request {0} is already in flight")]
    DuplicateRequest(RequestKey),

    /// Another write to the same document is waiting for its commit.
    #[error("document {0} is already being written")]
    KeyInFlight(DocumentKey),
}

/// Every way a request can end other than a reply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandlerError {
    /// Turned away before ordering.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Same `identifier:reqId` already waiting for a commit.
    #[error("request {0} is already in flight")]
    DuplicateRequest(RequestKey),

    #[error("Ordering failed: {0}")]
    Ordering(#[from] OrderingError),

    /// The store refused the commit. The ledger position is spent, the
    /// document is not stored.
    #[error("Commit aborted: {0}")]
    CommitAborted(#[from] StoreError),

    /// Continuation swept or dropped before the commit arrived. The write
    /// may still commit later.
    #[error(
        "outcome of request {0} is unknown: no commit arrived within the pending timeout, \
         read the document to learn whether it was written"
    )]
    Abandoned(RequestKey),
}

impl HandlerError {
    /// Whether the failure depends on the request alone. Those are
    /// answered with `REQNACK`, the rest with `REJECT`.
    pub fn is_static(&self) -> bool {
        match self {
            HandlerError::Rejected(rejection) => rejection.kind().is_static(),
            HandlerError::DuplicateRequest(_) => true,
            HandlerError::Ordering(_)
            | HandlerError::CommitAborted(_)
            | HandlerError::Abandoned(_) => false,
        }
    }
}
