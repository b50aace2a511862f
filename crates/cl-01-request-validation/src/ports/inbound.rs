//! # Inbound Ports
//!
//! The API the request handler drives.

use crate::domain::{Rejection, ValidatedRequest};
use shared_types::Role;

/// Result of running a raw body through schema then semantic validation.
pub type ValidationOutcome = Result<ValidatedRequest, Rejection>;

pub trait RequestValidationApi: Send + Sync {
    /// Schema then semantic checks. Pure and deterministic.
    fn validate(&self, raw: &serde_json::Value) -> ValidationOutcome;

    /// Authorization for writes. Reads are permitted unconditionally.
    fn authorize(&self, request: &ValidatedRequest, role: Option<Role>) -> Result<(), Rejection>;
}
