//! # Inbound Ports
//!
//! The API transports and the ordering collaborator drive.

use crate::domain::{error_message, CommitNotice, HandlerError, RequestOutcome};
use async_trait::async_trait;
use shared_types::{Document, NodeMessage, StoreError};
use std::sync::Arc;

#[async_trait]
pub trait RequestHandlerApi: Send + Sync {
    /// Run one raw request to a terminal state.
    ///
    /// Reads return immediately. Writes suspend until ordering commits
    /// them (or the continuation expires).
    async fn handle(&self, raw: &serde_json::Value) -> Result<RequestOutcome, HandlerError>;

    /// Commit callback from ordering: store the document and resume the
    /// waiting request, if this node holds one.
    fn on_commit(&self, notice: CommitNotice) -> Result<Arc<Document>, StoreError>;

    /// [`handle`](Self::handle) rendered as the wire message.
    async fn respond(&self, raw: &serde_json::Value) -> NodeMessage {
        match self.handle(raw).await {
            Ok(outcome) => outcome.into_message(),
            Err(err) => error_message(raw, &err),
        }
    }
}
