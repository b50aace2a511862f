//! # Wire Envelope
//!
//! Outbound messages a node sends back to a client: `REPLY` for a finished
//! request, `REQNACK` for a statically invalid one and `REJECT` for one that
//! is well formed but not allowed.

use crate::entities::{Document, DocumentMeta, SeqNo, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Client-side identity of a request: submitter plus its request id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey {
    pub identifier: String,
    #[serde(rename = "reqId")]
    pub req_id: u64,
}

impl RequestKey {
    pub fn new(identifier: impl Into<String>, req_id: u64) -> Self {
        Self {
            identifier: identifier.into(),
            req_id,
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.identifier, self.req_id)
    }
}

/// Every message a node writes back to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum NodeMessage {
    #[serde(rename = "REPLY")]
    Reply { result: ReplyResult },
    #[serde(rename = "REQNACK")]
    ReqNack(Nack),
    #[serde(rename = "REJECT")]
    Reject(Nack),
}

/// Negative acknowledgement. Identity fields are absent when the request
/// was too malformed to carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "reqId", default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<u64>,
    pub reason: String,
}

/// Stored document as mirrored in a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentView {
    pub meta: DocumentMeta,
    pub data: serde_json::Value,
}

impl From<&Document> for DocumentView {
    fn from(doc: &Document) -> Self {
        Self {
            meta: doc.meta(),
            data: doc.payload.clone(),
        }
    }
}

/// Ledger position of a committed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnMetadata {
    #[serde(rename = "seqNo")]
    pub seq_no: SeqNo,
    #[serde(rename = "txnTime")]
    pub txn_time: Timestamp,
}

/// Body of a `REPLY`.
///
/// `seq_no`, `txn_time` and `data` serialize as `null` for a read that found
/// nothing; absent is a successful answer, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyResult {
    #[serde(rename = "type")]
    pub txn_type: String,
    pub identifier: String,
    #[serde(rename = "reqId")]
    pub req_id: u64,
    pub dest: String,
    pub meta: DocumentMeta,
    #[serde(rename = "seqNo")]
    pub seq_no: Option<SeqNo>,
    #[serde(rename = "txnTime")]
    pub txn_time: Option<Timestamp>,
    #[serde(
        rename = "txnMetadata",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub txn_metadata: Option<TxnMetadata>,
    pub data: Option<DocumentView>,
}

impl ReplyResult {
    pub fn is_found(&self) -> bool {
        self.data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::DocType;
    use serde_json::json;

    fn meta() -> DocumentMeta {
        DocumentMeta {
            doc_type: DocType::Context,
            name: "ctx".into(),
            version: "1.0".into(),
        }
    }

    #[test]
    fn test_absent_reply_serializes_nulls() {
        let msg = NodeMessage::Reply {
            result: ReplyResult {
                txn_type: "300".into(),
                identifier: "id".into(),
                req_id: 1,
                dest: "id".into(),
                meta: meta(),
                seq_no: None,
                txn_time: None,
                txn_metadata: None,
                data: None,
            },
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["op"], "REPLY");
        assert!(value["result"]["seqNo"].is_null());
        assert!(value["result"]["data"].is_null());
        assert!(value["result"].get("txnMetadata").is_none());
        assert_eq!(value["result"]["meta"]["type"], "ctx");
    }

    #[test]
    fn test_nack_omits_missing_identity() {
        let msg = NodeMessage::ReqNack(Nack {
            identifier: None,
            req_id: None,
            reason: "bad".into(),
        });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"op": "REQNACK", "reason": "bad"}));
    }

    #[test]
    fn test_request_key_display() {
        assert_eq!(RequestKey::new("abc", 42).to_string(), "abc:42");
    }
}
