//! Configuration error taxonomy

use std::fmt;
use thiserror::Error;

/// A single field-level rule violation found during validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Configuration key that failed (e.g. `ACCOUNT_ID`)
    pub field: String,
    /// Human-readable reason the value was rejected
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised by the configuration loader
///
/// `Invalid` carries every field-level violation found in a single
/// validation pass, so the operator sees the complete picture at once
/// instead of fixing fields one restart at a time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One or more raw inputs violated the schema; no snapshot was produced
    #[error("invalid configuration: {}", describe(.0))]
    Invalid(Vec<Violation>),

    /// An optional override was present but not parseable as its expected type
    #[error("invalid value for {key}: expected {expected}, got '{value}'")]
    InvalidOverride {
        key: String,
        expected: &'static str,
        value: String,
    },
}

impl ConfigError {
    /// The field-level violations carried by an `Invalid` error
    pub fn violations(&self) -> &[Violation] {
        match self {
            ConfigError::Invalid(violations) => violations,
            ConfigError::InvalidOverride { .. } => &[],
        }
    }
}

fn describe(violations: &[Violation]) -> String {
    let details: Vec<String> = violations.iter().map(Violation::to_string).collect();
    format!("{} violation(s): {}", violations.len(), details.join("; "))
}
