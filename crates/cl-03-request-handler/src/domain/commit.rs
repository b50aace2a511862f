//! Messages exchanged with the ordering collaborator.

use crate::domain::correlation::CorrelationId;
use shared_types::{DocumentDraft, RequestKey, SeqNo, Timestamp};

/// A validated write handed to ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingRequest {
    pub correlation_id: CorrelationId,
    pub request_key: RequestKey,
    pub draft: DocumentDraft,
}

impl OrderingRequest {
    /// Attach the position ordering decided on.
    pub fn into_commit(self, seq_no: SeqNo, commit_time: Timestamp) -> CommitNotice {
        CommitNotice {
            correlation_id: self.correlation_id,
            request_key: self.request_key,
            draft: self.draft,
            seq_no,
            commit_time,
        }
    }
}

/// Ordering's callback: the write is committed at `seq_no`.
///
/// Carries the draft itself, so a replica that did not receive the original
/// request applies the same commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitNotice {
    pub correlation_id: CorrelationId,
    pub request_key: RequestKey,
    pub draft: DocumentDraft,
    pub seq_no: SeqNo,
    pub commit_time: Timestamp,
}
