//! # Node Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//!
//! Every section has sane defaults; `from_env()` applies the `CL_*`
//! overrides of each subsystem plus the role table:
//!
//! ```text
//! CL_ROLES="V4SGRU86Z58d6TV7PBUe6f:trustee,Th7MpTaRZVRYnPiabds81Y:endorser"
//! ```
//!
//! Identities absent from the table have no role and may only read.

use cl_01_request_validation::ValidationConfig;
use cl_03_request_handler::HandlerConfig;
use ledger_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use shared_types::Role;
use std::collections::HashMap;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Request validation rules.
    pub validation: ValidationConfig,
    /// Pending commits and ordering queues.
    pub handler: HandlerConfig,
    /// Logging and metrics.
    pub telemetry: TelemetryConfig,
    /// Submitter identifier to role.
    pub roles: HashMap<String, Role>,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation config: {0}")]
    Validation(#[from] cl_01_request_validation::ConfigError),

    #[error("handler config: {0}")]
    Handler(#[from] cl_03_request_handler::HandlerConfigError),

    #[error("invalid role entry '{entry}': {reason}")]
    InvalidRole { entry: String, reason: String },
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let roles = match lookup("CL_ROLES") {
            Some(table) => parse_roles(&table)?,
            None => HashMap::new(),
        };

        Ok(Self {
            validation: ValidationConfig::default().with_overrides(&lookup)?,
            handler: HandlerConfig::default().with_overrides(&lookup)?,
            telemetry: TelemetryConfig::from_lookup(&lookup),
            roles,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validation.validate()?;
        self.handler.validate()?;
        Ok(())
    }
}

/// Parse `identifier:role` pairs separated by commas. Roles are given by
/// name or ledger code.
pub fn parse_roles(table: &str) -> Result<HashMap<String, Role>, ConfigError> {
    let mut roles = HashMap::new();
    for entry in table.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = |reason: String| ConfigError::InvalidRole {
            entry: entry.to_string(),
            reason,
        };

        let (identifier, role) = entry
            .split_once(':')
            .ok_or_else(|| invalid("expected <identifier>:<role>".into()))?;
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(invalid("empty identifier".into()));
        }
        let role: Role = role.parse().map_err(|e| invalid(format!("{e}")))?;
        roles.insert(identifier.to_string(), role);
    }
    Ok(roles)
}
