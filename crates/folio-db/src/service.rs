//! Service layer orchestrating database mutations with audit.
//!
//! `FolioService` wraps `FolioDb` (raw database access). All repo methods are
//! implemented as `impl FolioService` blocks under `repos/`.

use crate::FolioDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations with an audit trail.
///
/// Mutations that touch more than one row follow this protocol:
/// 1. Read and check ownership (no writes yet)
/// 2. Begin transaction
/// 3. Execute SQL
/// 4. Append audit entries (inside the transaction)
/// 5. Commit, or roll back on the first error
pub struct FolioService {
    db: FolioDb,
}

impl FolioService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = FolioDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `FolioDb`.
    #[must_use]
    pub const fn from_db(db: FolioDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &FolioDb {
        &self.db
    }

    pub(crate) const fn conn(&self) -> &libsql::Connection {
        self.db.conn()
    }
}
