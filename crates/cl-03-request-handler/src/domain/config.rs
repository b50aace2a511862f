//! Request handler configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// How long a submitted write may wait for its commit before the
    /// continuation is swept.
    pub pending_ttl_ms: u64,
    /// Interval of the sweep.
    pub cleanup_interval_ms: u64,
    /// Bound of the submission queue into ordering.
    pub ordering_queue_capacity: usize,
    /// Bound of the commit stream out of ordering.
    pub commit_queue_capacity: usize,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            pending_ttl_ms: 30_000,
            cleanup_interval_ms: 5_000,
            ordering_queue_capacity: 1024,
            commit_queue_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerConfigError {
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    #[error("Invalid value for {var}: '{value}'")]
    InvalidEnv { var: String, value: String },
}

impl HandlerConfig {
    pub fn pending_ttl(&self) -> Duration {
        Duration::from_millis(self.pending_ttl_ms)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }

    pub fn validate(&self) -> Result<(), HandlerConfigError> {
        if self.pending_ttl_ms == 0 {
            return Err(HandlerConfigError::InvalidTimeout(
                "pending_ttl_ms cannot be 0".into(),
            ));
        }
        if self.cleanup_interval_ms == 0 {
            return Err(HandlerConfigError::InvalidTimeout(
                "cleanup_interval_ms cannot be 0".into(),
            ));
        }
        if self.ordering_queue_capacity == 0 || self.commit_queue_capacity == 0 {
            return Err(HandlerConfigError::InvalidCapacity(
                "queue capacities cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Default configuration with `CL_*` environment overrides applied.
    pub fn from_env() -> Result<Self, HandlerConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, HandlerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |var: &str, value: String| -> Result<u64, HandlerConfigError> {
            value
                .trim()
                .parse()
                .map_err(|_| HandlerConfigError::InvalidEnv {
                    var: var.to_string(),
                    value,
                })
        };

        if let Some(v) = lookup("CL_PENDING_TTL_MS") {
            self.pending_ttl_ms = parse("CL_PENDING_TTL_MS", v)?;
        }
        if let Some(v) = lookup("CL_CLEANUP_INTERVAL_MS") {
            self.cleanup_interval_ms = parse("CL_CLEANUP_INTERVAL_MS", v)?;
        }
        if let Some(v) = lookup("CL_ORDERING_QUEUE_CAPACITY") {
            self.ordering_queue_capacity = parse("CL_ORDERING_QUEUE_CAPACITY", v)? as usize;
        }
        if let Some(v) = lookup("CL_COMMIT_QUEUE_CAPACITY") {
            self.commit_queue_capacity = parse("CL_COMMIT_QUEUE_CAPACITY", v)? as usize;
        }
        self.validate()?;
        Ok(self)
    }
}
