//! # Request Handler Service
//!
//! ```text
//! raw ──validate──┬── read ──→ store.get ──→ ReadOk(found | absent)
//!                 │
//!                 └── write ──→ role + authorize ──→ duplicate pre-check
//!                                   ──→ reserve request + document ──→ ordering.submit
//!                                   ⋯ commit callback ⋯ store.put ──→ Committed
//! ```
//!
//! The commit side lives in [`CommitApplier`], which owns no ordering handle,
//! so the commit loop never keeps ordering alive.

use crate::adapters::PendingCommits;
use crate::domain::{
    read_reply, write_reply, CommitNotice, HandlerError, OrderingRequest, RegisterError,
    RequestOutcome,
};
use crate::ports::{OrderingService, RequestHandlerApi, RoleProvider};
use async_trait::async_trait;
use cl_01_request_validation::{
    operation_name_of, Action, AuthorizationError, Operation, OperationName, ReadTarget,
    Rejection, RequestHeader, RequestValidationApi, ValidatedRequest, WriteTarget,
};
use cl_02_document_store::DocumentStore;
use ledger_telemetry::{
    log_request_event, metric_inc, COMMIT_ABORTS, DOCUMENTS_COMMITTED, READS_NOT_FOUND,
    REQUESTS_RECEIVED, REQUESTS_REJECTED,
};
use shared_types::{Document, Role, StoreError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const SUBSYSTEM: &str = "request_handler";

// =============================================================================
// COMMIT SIDE
// =============================================================================

/// Applies commits from ordering to the store and resumes waiting writes.
pub struct CommitApplier {
    store: Arc<dyn DocumentStore>,
    pending: Arc<PendingCommits>,
}

impl CommitApplier {
    pub fn new(store: Arc<dyn DocumentStore>, pending: Arc<PendingCommits>) -> Self {
        Self { store, pending }
    }

    /// Store the committed document. A store refusal aborts this commit
    /// only; the waiting client learns of it and the store is unchanged.
    pub fn apply(&self, notice: CommitNotice) -> Result<Arc<Document>, StoreError> {
        let CommitNotice {
            correlation_id,
            request_key,
            draft,
            seq_no,
            commit_time,
        } = notice;

        match self.store.put(draft.commit(seq_no, commit_time)) {
            Ok(document) => {
                metric_inc!(DOCUMENTS_COMMITTED);
                info!(
                    correlation_id = %correlation_id,
                    request = %request_key,
                    seq_no,
                    key = %document.key,
                    "Document committed"
                );
                self.pending
                    .complete(correlation_id, Ok(Arc::clone(&document)));
                Ok(document)
            }
            Err(err) => {
                let reason = match err {
                    StoreError::KeyAlreadyExists { .. } => "key_exists",
                    StoreError::SeqNoNotMonotonic { .. } => "seq_no",
                };
                metric_inc!(COMMIT_ABORTS, &[reason]);
                error!(
                    correlation_id = %correlation_id,
                    request = %request_key,
                    seq_no,
                    error = %err,
                    "Commit aborted by store"
                );
                self.pending
                    .complete(correlation_id, Err(HandlerError::CommitAborted(err.clone())));
                Err(err)
            }
        }
    }
}

/// Drain the commit stream until ordering closes it.
pub async fn run_commit_loop(
    applier: Arc<CommitApplier>,
    mut commits: mpsc::Receiver<CommitNotice>,
) {
    while let Some(notice) = commits.recv().await {
        // Failures are logged and reported to the waiter by `apply`.
        let _ = applier.apply(notice);
    }
    debug!("Commit stream closed");
}

// =============================================================================
// REQUEST SIDE
// =============================================================================

pub struct RequestHandler {
    validator: Arc<dyn RequestValidationApi>,
    store: Arc<dyn DocumentStore>,
    ordering: Arc<dyn OrderingService>,
    roles: Arc<dyn RoleProvider>,
    pending: Arc<PendingCommits>,
    applier: Arc<CommitApplier>,
}

impl RequestHandler {
    pub fn new(
        validator: Arc<dyn RequestValidationApi>,
        store: Arc<dyn DocumentStore>,
        ordering: Arc<dyn OrderingService>,
        roles: Arc<dyn RoleProvider>,
        pending: Arc<PendingCommits>,
    ) -> Self {
        let applier = Arc::new(CommitApplier::new(Arc::clone(&store), Arc::clone(&pending)));
        Self {
            validator,
            store,
            ordering,
            roles,
            pending,
            applier,
        }
    }

    pub fn applier(&self) -> Arc<CommitApplier> {
        Arc::clone(&self.applier)
    }

    pub fn pending(&self) -> &Arc<PendingCommits> {
        &self.pending
    }

    fn rejected(&self, rejection: Rejection) -> HandlerError {
        let kind = rejection.kind();
        metric_inc!(REQUESTS_REJECTED, &[kind.as_str()]);
        warn!(
            kind = kind.as_str(),
            reason = %rejection,
            "Request rejected"
        );
        HandlerError::Rejected(rejection)
    }

    fn role_of(&self, header: &RequestHeader) -> Result<Option<Role>, HandlerError> {
        self.roles.role_of(&header.identifier).map_err(|err| {
            self.rejected(Rejection::new(
                OperationName::SetContext,
                AuthorizationError::RoleUnavailable {
                    identifier: header.identifier.clone(),
                    reason: err.to_string(),
                },
            ))
        })
    }

    fn read(&self, header: &RequestHeader, target: &ReadTarget) -> RequestOutcome {
        let found = self.store.get(&target.key, target.doc_type);
        if found.is_none() {
            metric_inc!(READS_NOT_FOUND);
        }
        log_request_event!(
            debug,
            SUBSYSTEM,
            "Read answered",
            header.identifier,
            header.req_id,
            key = %target.key,
            found = found.is_some()
        );
        RequestOutcome::ReadOk(read_reply(header, target, found.as_deref()))
    }

    async fn write(
        &self,
        header: &RequestHeader,
        target: WriteTarget,
    ) -> Result<RequestOutcome, HandlerError> {
        if self.store.contains_key(&target.key) {
            return Err(self.rejected(Rejection::conflict(
                OperationName::SetContext,
                target.key,
                target.doc_type,
            )));
        }

        let request_key = header.request_key();
        let (correlation_id, commit_rx) = match self
            .pending
            .register(request_key.clone(), target.key.clone())
        {
            Ok(registered) => registered,
            Err(RegisterError::DuplicateRequest(key)) => {
                warn!(request = %request_key, "Duplicate in-flight request");
                return Err(HandlerError::DuplicateRequest(key));
            }
            Err(RegisterError::KeyInFlight(key)) => {
                debug!(
                    request = %request_key,
                    document = %key,
                    "Document already being written"
                );
                return Err(self.rejected(Rejection::conflict(
                    OperationName::SetContext,
                    key,
                    target.doc_type,
                )));
            }
        };

        // A write that held the reservation may have committed between the
        // check above and `register`: its put happens before its release.
        if self.store.contains_key(&target.key) {
            self.pending.cancel(&correlation_id);
            return Err(self.rejected(Rejection::conflict(
                OperationName::SetContext,
                target.key,
                target.doc_type,
            )));
        }

        let submission = OrderingRequest {
            correlation_id,
            request_key: request_key.clone(),
            draft: target.into_draft(),
        };
        if let Err(err) = self.ordering.submit(submission).await {
            self.pending.cancel(&correlation_id);
            warn!(
                correlation_id = %correlation_id,
                request = %request_key,
                error = %err,
                "Ordering refused write"
            );
            return Err(err.into());
        }
        debug!(
            correlation_id = %correlation_id,
            request = %request_key,
            "Write submitted to ordering"
        );

        let document = commit_rx
            .await
            .map_err(|_| HandlerError::Abandoned(request_key))??;
        Ok(RequestOutcome::Committed(write_reply(header, &document)))
    }
}

#[async_trait]
impl RequestHandlerApi for RequestHandler {
    async fn handle(&self, raw: &serde_json::Value) -> Result<RequestOutcome, HandlerError> {
        let action = operation_name_of(raw)
            .action()
            .map_or("unknown", |a| a.as_str());
        metric_inc!(REQUESTS_RECEIVED, &[action]);

        let request: ValidatedRequest = self
            .validator
            .validate(raw)
            .map_err(|rejection| self.rejected(rejection))?;
        log_request_event!(
            debug,
            SUBSYSTEM,
            "Request accepted",
            request.header.identifier,
            request.header.req_id,
            action = request.action().as_str()
        );

        if request.action() == Action::Write {
            let role = self.role_of(&request.header)?;
            self.validator
                .authorize(&request, role)
                .map_err(|rejection| self.rejected(rejection))?;
        }

        let ValidatedRequest { header, operation } = request;
        match operation {
            Operation::GetContext(target) => Ok(self.read(&header, &target)),
            Operation::SetContext(target) => self.write(&header, target).await,
        }
    }

    fn on_commit(&self, notice: CommitNotice) -> Result<Arc<Document>, StoreError> {
        self.applier.apply(notice)
    }
}
