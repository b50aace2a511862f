//! # Validation Errors
//!
//! Every rejection a request can receive before it reaches ordering.
//! Rendered messages are part of the client contract and are identical on
//! every replica.

use crate::domain::request::OperationName;
use shared_types::{DocType, DocumentKey};
use thiserror::Error;

/// Structural errors: missing fields, wrong JSON types, unknown actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Request body is not a JSON object.
    #[error("expected type 'object', got '{actual}' (request)")]
    NotAnObject { actual: &'static str },

    /// Required fields absent, in declaration order.
    #[error("missed fields - {}", .0.join(", "))]
    MissedFields(Vec<&'static str>),

    /// Field present with the wrong JSON type.
    #[error("expected type '{expected}', got '{actual}' ({field}={value})")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
        value: String,
    },

    #[error("unknown transaction type '{0}'")]
    UnknownTxnType(String),
}

/// Domain-rule errors on well-typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("should not contain the following chars [{}] ({field}={value})", render_chars(.chars))]
    ForbiddenChars {
        field: &'static str,
        chars: Vec<char>,
        value: String,
    },

    #[error("empty or whitespace-only value is not allowed ({field}='{value}')")]
    Blank { field: &'static str, value: String },

    #[error("name length {len} exceeds limit {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("Invalid version: '{0}'")]
    InvalidVersion(String),

    #[error("expected one of [{}], got '{actual}' (type={actual})", render_tags())]
    UnknownDocType { actual: String },

    #[error("Unsupported protocol version {received}, expected {supported}")]
    UnsupportedProtocolVersion { received: u64, supported: u64 },
}

/// Write denied for the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("{identifier} has no role permitted to write (role={role})")]
    InsufficientRole { identifier: String, role: String },

    #[error("{identifier} is not allowed to write to namespace {namespace}")]
    ForeignNamespace {
        identifier: String,
        namespace: String,
    },

    #[error("role of {identifier} could not be resolved: {reason}")]
    RoleUnavailable { identifier: String, reason: String },
}

/// Why a request was turned away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// Key already committed. Checked against the store before ordering.
    #[error("{doc_type} with name '{}' and version '{}' already exists for {}", .key.name, .key.version, .key.author)]
    Conflict { key: DocumentKey, doc_type: DocType },
}

/// Coarse classification of a rejection, used for reply shape and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    Schema,
    Semantic,
    Authorization,
    Conflict,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::Schema => "schema",
            RejectionKind::Semantic => "semantic",
            RejectionKind::Authorization => "authorization",
            RejectionKind::Conflict => "conflict",
        }
    }

    /// Static rejections depend on the request alone (REQNACK); the rest
    /// depend on ledger state (REJECT).
    pub fn is_static(&self) -> bool {
        matches!(self, RejectionKind::Schema | RejectionKind::Semantic)
    }
}

/// A rejected request. Never reaches ordering and never builds a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation error [{operation}]: {reason}")]
pub struct Rejection {
    pub operation: OperationName,
    pub reason: RejectionReason,
}

impl Rejection {
    pub fn new(operation: OperationName, reason: impl Into<RejectionReason>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }

    pub fn conflict(operation: OperationName, key: DocumentKey, doc_type: DocType) -> Self {
        Self::new(operation, RejectionReason::Conflict { key, doc_type })
    }

    pub fn kind(&self) -> RejectionKind {
        match self.reason {
            RejectionReason::Schema(_) => RejectionKind::Schema,
            RejectionReason::Semantic(_) => RejectionKind::Semantic,
            RejectionReason::Authorization(_) => RejectionKind::Authorization,
            RejectionReason::Conflict { .. } => RejectionKind::Conflict,
        }
    }
}

/// Invalid validation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid identifier alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },
}

fn render_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_tags() -> String {
    DocType::ALL
        .iter()
        .map(|t| format!("'{}'", t.tag()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missed_fields_lists_all() {
        let err = SchemaError::MissedFields(vec!["dest", "version"]);
        assert_eq!(err.to_string(), "missed fields - dest, version");
    }

    #[test]
    fn test_forbidden_chars_rendering() {
        let err = SemanticError::ForbiddenChars {
            field: "dest",
            chars: vec!['-', '_'],
            value: "a_b-c".into(),
        };
        assert_eq!(
            err.to_string(),
            "should not contain the following chars ['-', '_'] (dest=a_b-c)"
        );
    }

    #[test]
    fn test_unknown_doc_type_rendering() {
        let err = SemanticError::UnknownDocType {
            actual: "xyz".into(),
        };
        assert_eq!(
            err.to_string(),
            "expected one of ['ctx', 'sch'], got 'xyz' (type=xyz)"
        );
    }

    #[test]
    fn test_rejection_wraps_operation_name() {
        let rejection = Rejection::new(
            OperationName::GetContext,
            SemanticError::InvalidVersion("asd".into()),
        );
        assert_eq!(
            rejection.to_string(),
            "validation error [GetContext]: Invalid version: 'asd'"
        );
        assert_eq!(rejection.kind(), RejectionKind::Semantic);
        assert!(rejection.kind().is_static());
    }

    #[test]
    fn test_conflict_message() {
        let rejection = Rejection::conflict(
            OperationName::SetContext,
            DocumentKey::new("author", "ctx", "1.0"),
            DocType::Context,
        );
        assert!(rejection
            .to_string()
            .ends_with("ctx with name 'ctx' and version '1.0' already exists for author"));
        assert!(!rejection.kind().is_static());
    }
}
