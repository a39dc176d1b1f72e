//! Domain-level error types.

use thiserror::Error;

/// Domain errors - rule violations detected on the client before any I/O.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Active case has {found} coffee ids, expected {expected}")]
    IncompleteCase { found: usize, expected: usize },

    #[error("Unknown catalog category: {0}")]
    UnknownCategory(String),

    #[error("Unknown order status: {0}")]
    UnknownOrderStatus(String),

    #[error("Unauthorized access")]
    Unauthorized,
}
