//! In-process ordering.
//!
//! A single task drains one submission queue and emits commits in arrival
//! order, numbering them consecutively and stamping wall-clock time. It
//! gives a single node a total commit order; it is not consensus.

use crate::domain::{CommitNotice, OrderingError, OrderingRequest};
use crate::ports::OrderingService;
use async_trait::async_trait;
use shared_types::{SeqNo, Timestamp};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct LocalOrderer {
    submissions: mpsc::Sender<OrderingRequest>,
}

impl LocalOrderer {
    /// Spawn the ordering task. Commits are delivered on `commits`, the
    /// first one numbered `first_seq_no`.
    ///
    /// The task ends once every `LocalOrderer` clone is dropped and the
    /// queue is drained.
    pub fn spawn(
        first_seq_no: SeqNo,
        capacity: usize,
        commits: mpsc::Sender<CommitNotice>,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let handle = tokio::spawn(run(rx, commits, first_seq_no));
        (Self { submissions: tx }, handle)
    }
}

#[async_trait]
impl OrderingService for LocalOrderer {
    async fn submit(&self, request: OrderingRequest) -> Result<(), OrderingError> {
        self.submissions
            .send(request)
            .await
            .map_err(|_| OrderingError::Shutdown)
    }
}

async fn run(
    mut submissions: mpsc::Receiver<OrderingRequest>,
    commits: mpsc::Sender<CommitNotice>,
    mut next_seq_no: SeqNo,
) {
    while let Some(request) = submissions.recv().await {
        let notice = request.into_commit(next_seq_no, now());
        debug!(
            correlation_id = %notice.correlation_id,
            seq_no = next_seq_no,
            "Ordered write"
        );
        next_seq_no += 1;
        if commits.send(notice).await.is_err() {
            warn!("Commit stream closed, ordering stopped");
            return;
        }
    }
    debug!(next_seq_no, "Ordering queue closed");
}

fn now() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
