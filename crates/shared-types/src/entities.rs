//! # Core Domain Entities
//!
//! Documents, their keys and tags, submitter roles, and the transaction type
//! constants used on the wire.

use crate::errors::UnknownRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ledger-wide sequence number assigned by ordering at commit.
pub type SeqNo = u64;

/// Commit time in seconds since the Unix epoch, supplied by ordering.
pub type Timestamp = u64;

/// Transaction type tags carried in `operation.type`.
pub mod txn_types {
    /// Write a context document.
    pub const SET_CONTEXT: &str = "200";
    /// Read a context document.
    pub const GET_CONTEXT: &str = "300";
}

/// The only client protocol version this node speaks.
pub const CURRENT_PROTOCOL_VERSION: u64 = 2;

// =============================================================================
// DOCUMENT TYPE
// =============================================================================

/// Enumerated document type tag (`meta.type` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocType {
    /// JSON-LD context.
    #[serde(rename = "ctx")]
    Context,
    /// Rich schema.
    #[serde(rename = "sch")]
    RichSchema,
}

impl DocType {
    /// Every known tag, in the order used by rejection messages.
    pub const ALL: [DocType; 2] = [DocType::Context, DocType::RichSchema];

    /// Wire tag for this type.
    pub fn tag(&self) -> &'static str {
        match self {
            DocType::Context => "ctx",
            DocType::RichSchema => "sch",
        }
    }

    /// Parse a wire tag. Exact, case-sensitive match.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// DOCUMENT KEY / META
// =============================================================================

/// Unique key of a committed document.
///
/// Equality is exact string equality on every component: `"1.0"` and
/// `"1.00"` are different versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentKey {
    pub author: String,
    pub name: String,
    pub version: String,
}

impl DocumentKey {
    pub fn new(
        author: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.author, self.name, self.version)
    }
}

/// The `meta` object of requests and replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "type")]
    pub doc_type: DocType,
    pub name: String,
    pub version: String,
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// A validated write that has not been ordered yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub key: DocumentKey,
    pub doc_type: DocType,
    pub payload: serde_json::Value,
}

impl DocumentDraft {
    /// Seal the draft with the position ordering gave it.
    pub fn commit(self, seq_no: SeqNo, commit_time: Timestamp) -> Document {
        Document {
            key: self.key,
            doc_type: self.doc_type,
            payload: self.payload,
            seq_no,
            commit_time,
        }
    }
}

/// A committed document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub key: DocumentKey,
    pub doc_type: DocType,
    /// Stored verbatim, never interpreted.
    pub payload: serde_json::Value,
    pub seq_no: SeqNo,
    pub commit_time: Timestamp,
}

impl Document {
    pub fn author(&self) -> &str {
        &self.key.author
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn version(&self) -> &str {
        &self.key.version
    }

    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            doc_type: self.doc_type,
            name: self.key.name.clone(),
            version: self.key.version.clone(),
        }
    }
}

// =============================================================================
// ROLES
// =============================================================================

/// Submitter role as reported by the role/credential collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Trustee,
    Steward,
    Endorser,
    NetworkMonitor,
}

impl Role {
    /// Ledger role code used by the pool's NYM records.
    pub fn code(&self) -> &'static str {
        match self {
            Role::Trustee => "0",
            Role::Steward => "2",
            Role::Endorser => "101",
            Role::NetworkMonitor => "201",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Trustee => "trustee",
            Role::Steward => "steward",
            Role::Endorser => "endorser",
            Role::NetworkMonitor => "network_monitor",
        }
    }

    /// Whether documents may be written under this role.
    pub fn can_write(&self) -> bool {
        matches!(self, Role::Trustee | Role::Steward | Role::Endorser)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    /// Accepts either the role name or its ledger code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trustee" | "0" => Ok(Role::Trustee),
            "steward" | "2" => Ok(Role::Steward),
            "endorser" | "101" => Ok(Role::Endorser),
            "network_monitor" | "201" => Ok(Role::NetworkMonitor),
            _ => Err(UnknownRoleError(s.to_string())),
        }
    }
}
