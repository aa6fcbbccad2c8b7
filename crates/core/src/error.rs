//! Domain error model.

use thiserror::Error;

/// Result type used at the input boundaries of the pipeline.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The analytics engines themselves never fail: degenerate or out-of-range
/// input is clamped or mapped to an empty result. This error only surfaces
/// where external data enters the system (raw item records, grid specs).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. empty or containing whitespace only).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
