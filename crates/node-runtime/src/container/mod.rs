//! # Node Container
//!
//! Builds every subsystem from [`NodeConfig`] and owns the background tasks.
//!
//! ## Initialization Order
//!
//! 1. Rule tables and the request validator
//! 2. Document store and role table
//! 3. Pending commits and the commit stream
//! 4. Ordering, starting after the store's last `seqNo`
//! 5. Request handler, commit loop and cleanup task
//!
//! ## Shutdown Order
//!
//! Dropping the handler closes the ordering queue. Ordering drains what was
//! already submitted, then closes the commit stream, which ends the commit
//! loop. The cleanup task is aborted last.

pub mod config;

pub use config::{parse_roles, ConfigError, NodeConfig};

use cl_01_request_validation::{RequestValidator, ValidationRules};
use cl_02_document_store::{DocumentStore, InMemoryDocumentStore};
use cl_03_request_handler::{
    cleanup_task, run_commit_loop, LocalOrderer, PendingCommits, RequestHandler, RoleProvider,
    StaticRoleProvider,
};
use ledger_telemetry::log_event;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const SUBSYSTEM: &str = "node_runtime";

/// All subsystem instances of a running node.
pub struct NodeContainer {
    pub config: NodeConfig,
    store: Arc<InMemoryDocumentStore>,
    roles: Arc<StaticRoleProvider>,
    handler: Arc<RequestHandler>,
    orderer_task: JoinHandle<()>,
    commit_task: JoinHandle<()>,
    cleanup_task: JoinHandle<()>,
}

impl NodeContainer {
    /// Wire the subsystems and spawn their tasks. Must be called from
    /// within a tokio runtime.
    pub fn start(config: NodeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rules = Arc::new(ValidationRules::from_config(&config.validation)?);
        let validator = Arc::new(RequestValidator::new(rules));

        let store = Arc::new(InMemoryDocumentStore::new());
        let roles = Arc::new(
            config
                .roles
                .iter()
                .map(|(identifier, role)| (identifier.clone(), *role))
                .collect::<StaticRoleProvider>(),
        );

        let pending = Arc::new(PendingCommits::new(config.handler.pending_ttl()));
        let (commit_tx, commit_rx) = mpsc::channel(config.handler.commit_queue_capacity);

        let first_seq_no = store.last_seq_no().map_or(1, |seq_no| seq_no + 1);
        let (orderer, orderer_task) = LocalOrderer::spawn(
            first_seq_no,
            config.handler.ordering_queue_capacity,
            commit_tx,
        );

        let handler = Arc::new(RequestHandler::new(
            validator,
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            Arc::new(orderer),
            Arc::clone(&roles) as Arc<dyn RoleProvider>,
            Arc::clone(&pending),
        ));

        let commit_task = tokio::spawn(run_commit_loop(handler.applier(), commit_rx));
        let cleanup_task = tokio::spawn(cleanup_task(
            Arc::clone(&pending),
            config.handler.cleanup_interval(),
        ));

        log_event!(
            info,
            SUBSYSTEM,
            "Node subsystems started",
            roles = roles.len(),
            first_seq_no = first_seq_no,
            pending_ttl_ms = config.handler.pending_ttl_ms
        );

        Ok(Self {
            config,
            store,
            roles,
            handler,
            orderer_task,
            commit_task,
            cleanup_task,
        })
    }

    pub fn handler(&self) -> Arc<RequestHandler> {
        Arc::clone(&self.handler)
    }

    pub fn store(&self) -> &Arc<InMemoryDocumentStore> {
        &self.store
    }

    pub fn roles(&self) -> &Arc<StaticRoleProvider> {
        &self.roles
    }

    /// Stop the node. Handler clones handed out by [`handler`](Self::handler)
    /// must be dropped first, otherwise ordering stays open.
    pub async fn shutdown(self) {
        info!("Initiating graceful shutdown...");

        let Self {
            handler,
            orderer_task,
            commit_task,
            cleanup_task,
            store,
            ..
        } = self;

        if Arc::strong_count(&handler) > 1 {
            warn!("Request handler still shared during shutdown");
        }
        drop(handler);

        if let Err(err) = orderer_task.await {
            warn!(error = %err, "Ordering task ended abnormally");
        }
        if let Err(err) = commit_task.await {
            warn!(error = %err, "Commit loop ended abnormally");
        }
        cleanup_task.abort();

        let stats = store.stats();
        log_event!(
            info,
            SUBSYSTEM,
            "Shutdown complete",
            documents = stats.documents,
            last_seq_no = ?stats.last_seq_no
        );
    }
}
