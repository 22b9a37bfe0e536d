//! Error types for mockup operations.
//!
//! Editing is total: out-of-range values clamp, unknown ids are no-ops.
//! Errors only surface when loading external data or when an internal
//! invariant would be broken.

use thiserror::Error;

/// Result type for mockup operations.
pub type MockupResult<T> = Result<T, MockupError>;

/// Errors that can occur in mockup operations.
#[derive(Debug, Error)]
pub enum MockupError {
    /// Two scene entities would share an id.
    #[error("Duplicate scene entity: {0}")]
    DuplicateEntity(String),

    /// An entity id string could not be parsed.
    #[error("Invalid entity id: {0}")]
    InvalidEntityId(String),

    /// Document or scene serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
