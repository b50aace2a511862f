//! Pending commit continuations.
//!
//! Maps correlation IDs to writes waiting for their commit callback. Each
//! pending write also reserves its request key and its document key, so
//! neither the same request nor a second write to the same document can be
//! in flight at once.

use crate::domain::{CorrelationId, HandlerError, RegisterError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ledger_telemetry::{metric_set, PENDING_COMMITS};
use shared_types::{Document, DocumentKey, RequestKey};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// What a waiting write eventually receives.
pub type CommitResult = Result<Arc<Document>, HandlerError>;

/// A write waiting for its commit
struct PendingCommit {
    sender: oneshot::Sender<CommitResult>,
    request_key: RequestKey,
    document_key: DocumentKey,
    created_at: Instant,
    ttl: Duration,
}

/// Statistics for pending commits
#[derive(Debug, Default)]
pub struct PendingStats {
    pub total_registered: AtomicU64,
    pub total_committed: AtomicU64,
    /// Resolved with an error (store refused the commit)
    pub total_aborted: AtomicU64,
    pub total_expired: AtomicU64,
    /// Removed without resolution, or the waiter went away first
    pub total_cancelled: AtomicU64,
}

/// Flow:
/// 1. Handler calls `register()` with the request and document keys, gets a
///    receiver
/// 2. Handler submits the write to ordering with the correlation ID
/// 3. Commit callback stores the document and calls `complete()`
/// 4. Handler awaits the receiver; a swept entry drops the sender
pub struct PendingCommits {
    pending: DashMap<CorrelationId, PendingCommit>,
    in_flight: DashMap<RequestKey, CorrelationId>,
    in_flight_documents: DashMap<DocumentKey, CorrelationId>,
    default_ttl: Duration,
    stats: PendingStats,
}

impl PendingCommits {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            pending: DashMap::new(),
            in_flight: DashMap::new(),
            in_flight_documents: DashMap::new(),
            default_ttl,
            stats: PendingStats::default(),
        }
    }

    /// Register a continuation for a write of `document_key` requested as
    /// `request_key`.
    ///
    /// Fails with [`RegisterError::DuplicateRequest`] if the same request is
    /// already waiting, and with [`RegisterError::KeyInFlight`] if another
    /// write to the same document is. A failed registration reserves
    /// nothing.
    pub fn register(
        &self,
        request_key: RequestKey,
        document_key: DocumentKey,
    ) -> Result<(CorrelationId, oneshot::Receiver<CommitResult>), RegisterError> {
        // Lock order: request slot, then document slot.
        let request_slot = match self.in_flight.entry(request_key.clone()) {
            Entry::Occupied(_) => return Err(RegisterError::DuplicateRequest(request_key)),
            Entry::Vacant(slot) => slot,
        };
        let document_slot = match self.in_flight_documents.entry(document_key.clone()) {
            Entry::Occupied(_) => return Err(RegisterError::KeyInFlight(document_key)),
            Entry::Vacant(slot) => slot,
        };
        let correlation_id = CorrelationId::new();
        document_slot.insert(correlation_id);
        request_slot.insert(correlation_id);

        let (tx, rx) = oneshot::channel();
        self.pending.insert(
            correlation_id,
            PendingCommit {
                sender: tx,
                request_key: request_key.clone(),
                document_key: document_key.clone(),
                created_at: Instant::now(),
                ttl: self.default_ttl,
            },
        );
        self.stats.total_registered.fetch_add(1, Ordering::Relaxed);
        self.publish_gauge();

        debug!(
            correlation_id = %correlation_id,
            request = %request_key,
            document = %document_key,
            "Registered pending commit"
        );

        Ok((correlation_id, rx))
    }

    /// Resolve a continuation.
    ///
    /// Returns false if none is registered under `correlation_id` (the
    /// request was submitted elsewhere, or already expired) or if its waiter
    /// is gone.
    pub fn complete(&self, correlation_id: CorrelationId, result: CommitResult) -> bool {
        let Some(pending) = self.take(&correlation_id) else {
            debug!(
                correlation_id = %correlation_id,
                "Commit has no local continuation"
            );
            return false;
        };

        let elapsed = pending.created_at.elapsed();
        let aborted = result.is_err();
        match pending.sender.send(result) {
            Ok(()) => {
                let counter = if aborted {
                    &self.stats.total_aborted
                } else {
                    &self.stats.total_committed
                };
                counter.fetch_add(1, Ordering::Relaxed);
                debug!(
                    correlation_id = %correlation_id,
                    request = %pending.request_key,
                    elapsed_ms = elapsed.as_millis() as u64,
                    aborted,
                    "Completed pending commit"
                );
                true
            }
            Err(_) => {
                self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
                debug!(
                    correlation_id = %correlation_id,
                    request = %pending.request_key,
                    "Pending commit receiver dropped"
                );
                false
            }
        }
    }

    /// Drop a continuation without resolving it.
    pub fn cancel(&self, correlation_id: &CorrelationId) -> bool {
        if self.take(correlation_id).is_some() {
            self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    /// Remove continuations older than their TTL. Their waiters observe a
    /// closed channel.
    pub fn remove_expired(&self) -> usize {
        let now = Instant::now();
        let mut expired = Vec::new();

        self.pending.retain(|id, pending| {
            let elapsed = now.duration_since(pending.created_at);
            if elapsed > pending.ttl {
                warn!(
                    correlation_id = %id,
                    request = %pending.request_key,
                    elapsed_ms = elapsed.as_millis() as u64,
                    ttl_ms = pending.ttl.as_millis() as u64,
                    "Removing expired pending commit"
                );
                expired.push((pending.request_key.clone(), pending.document_key.clone(), *id));
                false
            } else {
                true
            }
        });

        for (request_key, document_key, id) in &expired {
            self.release(request_key, document_key, id);
        }
        self.stats
            .total_expired
            .fetch_add(expired.len() as u64, Ordering::Relaxed);
        self.publish_gauge();

        expired.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, correlation_id: &CorrelationId) -> bool {
        self.pending.contains_key(correlation_id)
    }

    pub fn is_in_flight(&self, request_key: &RequestKey) -> bool {
        self.in_flight.contains_key(request_key)
    }

    pub fn is_document_in_flight(&self, document_key: &DocumentKey) -> bool {
        self.in_flight_documents.contains_key(document_key)
    }

    pub fn stats(&self) -> &PendingStats {
        &self.stats
    }

    fn take(&self, correlation_id: &CorrelationId) -> Option<PendingCommit> {
        let (_, pending) = self.pending.remove(correlation_id)?;
        self.release(&pending.request_key, &pending.document_key, correlation_id);
        self.publish_gauge();
        Some(pending)
    }

    fn release(
        &self,
        request_key: &RequestKey,
        document_key: &DocumentKey,
        correlation_id: &CorrelationId,
    ) {
        self.in_flight
            .remove_if(request_key, |_, current| current == correlation_id);
        self.in_flight_documents
            .remove_if(document_key, |_, current| current == correlation_id);
    }

    fn publish_gauge(&self) {
        metric_set!(PENDING_COMMITS, self.pending.len() as i64);
    }
}

/// Background task sweeping expired continuations.
pub async fn cleanup_task(pending: Arc<PendingCommits>, interval: Duration) {
    let mut cleanup_interval = tokio::time::interval(interval);
    cleanup_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        cleanup_interval.tick().await;
        let removed = pending.remove_expired();
        if removed > 0 {
            debug!(removed = removed, "Cleaned up expired pending commits");
        }
    }
}
