//! Prometheus metrics for the context ledger node.
//!
//! All metrics follow the naming convention: `cl_<subsystem>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // REQUEST HANDLER METRICS (Subsystem 3)
    // =========================================================================

    /// Requests received, by action
    pub static ref REQUESTS_RECEIVED: IntCounterVec = IntCounterVec::new(
        Opts::new("cl_handler_requests_received_total", "Requests received by the handler"),
        &["action"]  // action: write/read/unknown
    ).expect("metric creation failed");

    /// Requests rejected before ordering, by kind
    pub static ref REQUESTS_REJECTED: IntCounterVec = IntCounterVec::new(
        Opts::new("cl_handler_requests_rejected_total", "Requests rejected before ordering"),
        &["kind"]  // kind: schema/semantic/authorization/conflict
    ).expect("metric creation failed");

    /// Reads answered with no matching document
    pub static ref READS_NOT_FOUND: IntCounter = IntCounter::new(
        "cl_handler_reads_not_found_total",
        "Reads that matched no committed document"
    ).expect("metric creation failed");

    /// Writes waiting for their commit callback
    pub static ref PENDING_COMMITS: IntGauge = IntGauge::new(
        "cl_handler_pending_commits",
        "Writes submitted to ordering and not yet committed"
    ).expect("metric creation failed");

    // =========================================================================
    // DOCUMENT STORE METRICS (Subsystem 2)
    // =========================================================================

    /// Documents committed to the store
    pub static ref DOCUMENTS_COMMITTED: IntCounter = IntCounter::new(
        "cl_store_documents_committed_total",
        "Documents committed to the versioned store"
    ).expect("metric creation failed");

    /// Commits aborted by a store invariant
    pub static ref COMMIT_ABORTS: IntCounterVec = IntCounterVec::new(
        Opts::new("cl_store_commit_aborts_total", "Commits aborted by the store"),
        &["reason"]  // reason: key_exists/seq_no
    ).expect("metric creation failed");
}

/// Handle returned once metrics are registered.
pub struct MetricsHandle {
    registry: Registry,
}

impl MetricsHandle {
    /// Encode all registered metrics as Prometheus text format.
    pub fn encode(&self) -> Result<String, TelemetryError> {
        encode_registry(&self.registry)
    }
}

/// Register all metrics with the global registry. Safe to call twice.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Handler
        Box::new(REQUESTS_RECEIVED.clone()),
        Box::new(REQUESTS_REJECTED.clone()),
        Box::new(READS_NOT_FOUND.clone()),
        Box::new(PENDING_COMMITS.clone()),
        // Store
        Box::new(DOCUMENTS_COMMITTED.clone()),
        Box::new(COMMIT_ABORTS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: REGISTRY.clone(),
    })
}

/// Encode the global registry as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    encode_registry(&REGISTRY)
}

fn encode_registry(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
