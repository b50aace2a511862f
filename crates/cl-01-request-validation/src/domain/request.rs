//! # Typed Requests
//!
//! A request that passed validation. Dispatch is a closed variant with one
//! case per action, each carrying exactly the fields that action needs.

use shared_types::{txn_types, DocType, DocumentDraft, DocumentKey, DocumentMeta, RequestKey};
use std::fmt;

/// What a request does to ledger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Write,
    Read,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Write => "write",
            Action::Read => "read",
        }
    }
}

/// Name a rejection is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationName {
    SetContext,
    GetContext,
    /// The action could not be determined.
    Client,
}

impl OperationName {
    pub fn from_txn_type(txn_type: &str) -> Self {
        match txn_type {
            txn_types::SET_CONTEXT => OperationName::SetContext,
            txn_types::GET_CONTEXT => OperationName::GetContext,
            _ => OperationName::Client,
        }
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            OperationName::SetContext => Some(Action::Write),
            OperationName::GetContext => Some(Action::Read),
            OperationName::Client => None,
        }
    }

    pub fn txn_type(&self) -> Option<&'static str> {
        match self {
            OperationName::SetContext => Some(txn_types::SET_CONTEXT),
            OperationName::GetContext => Some(txn_types::GET_CONTEXT),
            OperationName::Client => None,
        }
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationName::SetContext => "SetContext",
            OperationName::GetContext => "GetContext",
            OperationName::Client => "ClientOperation",
        };
        f.write_str(name)
    }
}

/// Envelope metadata shared by every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeader {
    pub identifier: String,
    pub req_id: u64,
    pub protocol_version: Option<u64>,
}

impl RequestHeader {
    pub fn request_key(&self) -> RequestKey {
        RequestKey::new(self.identifier.clone(), self.req_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteTarget {
    pub key: DocumentKey,
    pub doc_type: DocType,
    pub payload: serde_json::Value,
}

impl WriteTarget {
    pub fn meta(&self) -> DocumentMeta {
        meta_of(&self.key, self.doc_type)
    }

    pub fn into_draft(self) -> DocumentDraft {
        DocumentDraft {
            key: self.key,
            doc_type: self.doc_type,
            payload: self.payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadTarget {
    pub key: DocumentKey,
    pub doc_type: DocType,
}

impl ReadTarget {
    pub fn meta(&self) -> DocumentMeta {
        meta_of(&self.key, self.doc_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    SetContext(WriteTarget),
    GetContext(ReadTarget),
}

impl Operation {
    pub fn name(&self) -> OperationName {
        match self {
            Operation::SetContext(_) => OperationName::SetContext,
            Operation::GetContext(_) => OperationName::GetContext,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Operation::SetContext(_) => Action::Write,
            Operation::GetContext(_) => Action::Read,
        }
    }

    pub fn key(&self) -> &DocumentKey {
        match self {
            Operation::SetContext(t) => &t.key,
            Operation::GetContext(t) => &t.key,
        }
    }

    pub fn meta(&self) -> DocumentMeta {
        match self {
            Operation::SetContext(t) => t.meta(),
            Operation::GetContext(t) => t.meta(),
        }
    }
}

/// Output of a successful validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub header: RequestHeader,
    pub operation: Operation,
}

impl ValidatedRequest {
    pub fn action(&self) -> Action {
        self.operation.action()
    }
}

fn meta_of(key: &DocumentKey, doc_type: DocType) -> DocumentMeta {
    DocumentMeta {
        doc_type,
        name: key.name.clone(),
        version: key.version.clone(),
    }
}
