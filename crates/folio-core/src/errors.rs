//! Cross-cutting error types for Folio.
//!
//! Storage errors (`DatabaseError`) and HTTP errors (`ApiError`) live in
//! their own crates and wrap this one.

use thiserror::Error;

use crate::enums::EntityType;

/// Errors that can be raised by any Folio crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
