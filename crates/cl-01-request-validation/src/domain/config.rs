//! Validation configuration.

use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use shared_types::CURRENT_PROTOCOL_VERSION;
use std::collections::HashSet;

/// Base58 alphabet used by ledger identifiers.
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub const DEFAULT_MAX_NAME_LENGTH: usize = 256;

/// Tunables for the rule tables. Loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Characters allowed in `identifier` and `dest`.
    pub identifier_alphabet: String,
    pub max_name_length: usize,
    pub min_version_components: usize,
    /// Upper bound on version components. `None` accepts any count.
    pub max_version_components: Option<usize>,
    pub protocol_version: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            identifier_alphabet: BASE58_ALPHABET.to_string(),
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            min_version_components: 1,
            max_version_components: None,
            protocol_version: CURRENT_PROTOCOL_VERSION,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identifier_alphabet.is_empty() {
            return Err(ConfigError::InvalidAlphabet("alphabet cannot be empty".into()));
        }

        let mut seen = HashSet::new();
        for c in self.identifier_alphabet.chars() {
            if c.is_whitespace() || c == '.' {
                return Err(ConfigError::InvalidAlphabet(format!(
                    "character {c:?} is not allowed in identifiers"
                )));
            }
            if !seen.insert(c) {
                return Err(ConfigError::InvalidAlphabet(format!("duplicate character {c:?}")));
            }
        }

        if self.max_name_length == 0 {
            return Err(ConfigError::InvalidLimit("max_name_length cannot be 0".into()));
        }

        if self.min_version_components == 0 {
            return Err(ConfigError::InvalidLimit(
                "min_version_components cannot be 0".into(),
            ));
        }

        if let Some(max) = self.max_version_components {
            if self.min_version_components > max {
                return Err(ConfigError::InvalidLimit(format!(
                    "min_version_components ({}) exceeds max_version_components ({max})",
                    self.min_version_components
                )));
            }
        }

        Ok(())
    }

    /// Default configuration with `CL_*` environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from any variable source.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(alphabet) = lookup("CL_IDENTIFIER_ALPHABET") {
            self.identifier_alphabet = alphabet;
        }
        if let Some(v) = lookup("CL_MAX_NAME_LENGTH") {
            self.max_name_length = parse_var("CL_MAX_NAME_LENGTH", &v)?;
        }
        if let Some(v) = lookup("CL_MIN_VERSION_COMPONENTS") {
            self.min_version_components = parse_var("CL_MIN_VERSION_COMPONENTS", &v)?;
        }
        if let Some(v) = lookup("CL_MAX_VERSION_COMPONENTS") {
            self.max_version_components = Some(parse_var("CL_MAX_VERSION_COMPONENTS", &v)?);
        }
        self.validate()?;
        Ok(self)
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}
