//! Engine-level errors for the mating workflows.

use super::storage_error::StorageError;

/// Errors surfaced by the mating engine operations.
///
/// Numeric degenerate cases (zero herd mean weight, missing weight history,
/// missing parent links, missing birth date) are NOT errors; they resolve to
/// defined zero or `None` values inside the calculators.
#[derive(Debug, thiserror::Error)]
pub enum MatingError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("user {user_id} is not authorized for property {property_id}")]
    AccessDenied { user_id: String, property_id: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl MatingError {
    /// Shorthand for a `NotFound` over a numeric row id.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Shorthand for an `InvalidInput` with a formatted message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result alias for engine operations.
pub type MatingResult<T> = Result<T, MatingError>;
