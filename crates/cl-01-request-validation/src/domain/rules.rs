//! # Rule Tables
//!
//! Immutable lookup tables built once from [`ValidationConfig`] and shared
//! behind an `Arc` by every validator in the process.

use crate::domain::config::ValidationConfig;
use crate::domain::errors::ConfigError;
use lazy_static::lazy_static;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// At most this many offending characters are named in a rejection.
pub const MAX_REPORTED_CHARS: usize = 10;

lazy_static! {
    static ref DEFAULT_RULES: Arc<ValidationRules> =
        Arc::new(ValidationRules::build(&ValidationConfig::default()));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    alphabet: HashSet<char>,
    max_name_length: usize,
    min_version_components: usize,
    max_version_components: Option<usize>,
    protocol_version: u64,
}

impl ValidationRules {
    pub fn from_config(config: &ValidationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Process-wide table for the default configuration.
    pub fn shared_default() -> Arc<Self> {
        Arc::clone(&DEFAULT_RULES)
    }

    fn build(config: &ValidationConfig) -> Self {
        Self {
            alphabet: config.identifier_alphabet.chars().collect(),
            max_name_length: config.max_name_length,
            min_version_components: config.min_version_components,
            max_version_components: config.max_version_components,
            protocol_version: config.protocol_version,
        }
    }

    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    pub fn protocol_version(&self) -> u64 {
        self.protocol_version
    }

    /// Distinct characters of `value` outside the identifier alphabet,
    /// sorted, capped at [`MAX_REPORTED_CHARS`].
    pub fn forbidden_chars(&self, value: &str) -> Vec<char> {
        value
            .chars()
            .filter(|c| !self.alphabet.contains(c))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .take(MAX_REPORTED_CHARS)
            .collect()
    }

    /// Dot-separated ASCII-digit components, none empty, count within the
    /// configured bounds.
    pub fn is_valid_version(&self, version: &str) -> bool {
        let components: Vec<&str> = version.split('.').collect();
        let count = components.len();
        count >= self.min_version_components
            && self.max_version_components.map_or(true, |max| count <= max)
            && components
                .iter()
                .all(|c| !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()))
    }
}
