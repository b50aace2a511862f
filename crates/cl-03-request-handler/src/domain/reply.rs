//! # Reply Assembly
//!
//! Terminal states of a request and the wire message each one produces.
//!
//! | State | Message | `seqNo` | `data` |
//! |-------|---------|---------|--------|
//! | `Committed` | `REPLY` | stored | stored document |
//! | `ReadOk(found)` | `REPLY` | stored | stored document |
//! | `ReadOk(absent)` | `REPLY` | `null` | `null` |
//! | static rejection | `REQNACK` | - | - |
//! | dynamic rejection, commit abort | `REJECT` | - | - |

use crate::domain::errors::HandlerError;
use cl_01_request_validation::{ReadTarget, RequestHeader};
use shared_types::{
    txn_types, Document, DocumentView, Nack, NodeMessage, ReplyResult, TxnMetadata,
};

/// Successful end of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Committed(ReplyResult),
    ReadOk(ReplyResult),
}

impl RequestOutcome {
    pub fn reply(&self) -> &ReplyResult {
        match self {
            RequestOutcome::Committed(reply) | RequestOutcome::ReadOk(reply) => reply,
        }
    }

    pub fn into_reply(self) -> ReplyResult {
        match self {
            RequestOutcome::Committed(reply) | RequestOutcome::ReadOk(reply) => reply,
        }
    }

    pub fn into_message(self) -> NodeMessage {
        NodeMessage::Reply {
            result: self.into_reply(),
        }
    }
}

/// Reply to a read. The request's own meta is echoed whether or not a
/// document matched.
pub fn read_reply(
    header: &RequestHeader,
    target: &ReadTarget,
    found: Option<&Document>,
) -> ReplyResult {
    ReplyResult {
        txn_type: txn_types::GET_CONTEXT.to_string(),
        identifier: header.identifier.clone(),
        req_id: header.req_id,
        dest: target.key.author.clone(),
        meta: target.meta(),
        seq_no: found.map(|doc| doc.seq_no),
        txn_time: found.map(|doc| doc.commit_time),
        txn_metadata: None,
        data: found.map(DocumentView::from),
    }
}

/// Reply to a committed write, mirroring the stored document.
pub fn write_reply(header: &RequestHeader, document: &Document) -> ReplyResult {
    ReplyResult {
        txn_type: txn_types::SET_CONTEXT.to_string(),
        identifier: header.identifier.clone(),
        req_id: header.req_id,
        dest: document.key.author.clone(),
        meta: document.meta(),
        seq_no: Some(document.seq_no),
        txn_time: Some(document.commit_time),
        txn_metadata: Some(TxnMetadata {
            seq_no: document.seq_no,
            txn_time: document.commit_time,
        }),
        data: Some(DocumentView::from(document)),
    }
}

/// Negative acknowledgement for `raw`. Identity fields are copied when the
/// body carries them with the right types.
pub fn error_message(raw: &serde_json::Value, error: &HandlerError) -> NodeMessage {
    let nack = Nack {
        identifier: raw
            .get("identifier")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        req_id: raw.get("reqId").and_then(serde_json::Value::as_u64),
        reason: error.to_string(),
    };
    if error.is_static() {
        NodeMessage::ReqNack(nack)
    } else {
        NodeMessage::Reject(nack)
    }
}
