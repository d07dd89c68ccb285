//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements are idempotent for safe re-running.

use crate::FolioDb;
use crate::error::DatabaseError;

/// Initial schema: 5 tables, 5 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");
/// Rewrites legacy lowercase categories to their canonical spelling.
const MIGRATION_002: &str = include_str!("../migrations/002_canonical_categories.sql");
/// About sections, backfilled for existing users.
const MIGRATION_003: &str = include_str!("../migrations/003_about.sql");

impl FolioDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        self.conn
            .execute_batch(MIGRATION_002)
            .await
            .map_err(|e| DatabaseError::Migration(format!("002_canonical_categories: {e}")))?;
        self.conn
            .execute_batch(MIGRATION_003)
            .await
            .map_err(|e| DatabaseError::Migration(format!("003_about: {e}")))?;
        Ok(())
    }
}
