//! Error types used throughout the domain layer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for domain-level conversions and checks
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid value for {kind}: {value}")]
    InvalidEnumValue { kind: String, value: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, DomainError>;
