//! Database error types for folio-db.

use folio_core::enums::EntityType;
use folio_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityType, id: String },

    /// The entity exists but belongs to another user.
    #[error("{entity} {id} belongs to another user")]
    Forbidden { entity: EntityType, id: String },

    /// A uniqueness rule would be violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Input rejected before any query ran.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CoreError> for DatabaseError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            CoreError::Other(e) => Self::Other(e),
        }
    }
}

impl DatabaseError {
    pub(crate) const fn not_found(entity: EntityType, id: String) -> Self {
        Self::NotFound { entity, id }
    }
}
