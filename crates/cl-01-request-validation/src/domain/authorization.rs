//! # Authorization Checker
//!
//! Decides whether a validated write may proceed given the submitter's role.
//! Reads never come through here.

use crate::domain::errors::{AuthorizationError, Rejection};
use crate::domain::request::{OperationName, RequestHeader, WriteTarget};
use shared_types::Role;

/// Permit (`Ok`) or deny a write.
///
/// The role must carry write privilege, and the document must be written
/// into the submitter's own namespace.
pub fn authorize_write(
    header: &RequestHeader,
    target: &WriteTarget,
    role: Option<Role>,
) -> Result<(), Rejection> {
    let deny = |err: AuthorizationError| Rejection::new(OperationName::SetContext, err);

    match role {
        Some(role) if role.can_write() => {}
        other => {
            return Err(deny(AuthorizationError::InsufficientRole {
                identifier: header.identifier.clone(),
                role: other.map_or("none", |r| r.name()).to_string(),
            }));
        }
    }

    if target.key.author != header.identifier {
        return Err(deny(AuthorizationError::ForeignNamespace {
            identifier: header.identifier.clone(),
            namespace: target.key.author.clone(),
        }));
    }

    Ok(())
}
