//! Atomic reordering of timeline entries.
//!
//! A reorder batch is checked in full before anything is written: every id
//! must exist and belong to the caller. The writes then run in one
//! transaction, one UPDATE per item, and roll back together on any failure.
//! The stored orders become exactly the submitted values.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use folio_core::audit_detail::OrderChangedDetail;
use folio_core::entities::TimelineEntry;
use folio_core::enums::{AuditAction, EntityType, EntryCategory, MoveDirection};
use folio_core::reorder::{ReorderBatch, ReorderItem, plan_compaction, plan_move};

use crate::error::DatabaseError;
use crate::helpers::to_json;
use crate::repos::audit::insert_audit;
use crate::repos::timeline::{SELECT_COLS, load_entries, row_to_entry};
use crate::service::FolioService;

/// Ids per ownership lookup query.
const LOOKUP_CHUNK: usize = 500;

/// Write each item's order. Every UPDATE must hit exactly one row.
async fn write_orders(
    conn: &libsql::Connection,
    items: &[ReorderItem],
    now: DateTime<Utc>,
) -> Result<(), DatabaseError> {
    let ts = now.to_rfc3339();
    for item in items {
        let affected = conn
            .execute(
                "UPDATE timeline_entries SET sort_order = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![i64::from(item.order), ts.as_str(), item.id.as_str()],
            )
            .await?;
        if affected != 1 {
            return Err(DatabaseError::InvalidState(format!(
                "reorder of {} touched {affected} rows",
                item.id
            )));
        }
    }
    Ok(())
}

impl FolioService {
    /// Load the batch's entries and check ownership.
    ///
    /// Ids are looked up [`LOOKUP_CHUNK`] at a time to stay under SQLite's
    /// bound-parameter limit. Items are checked in batch order; the first
    /// missing id yields `NotFound`, the first foreign one `Forbidden`.
    async fn load_batch_entries(
        &self,
        user_id: &str,
        batch: &ReorderBatch,
    ) -> Result<HashMap<String, TimelineEntry>, DatabaseError> {
        let ids: Vec<&str> = batch.ids().collect();
        let mut found = HashMap::with_capacity(batch.len());
        for chunk in ids.chunks(LOOKUP_CHUNK) {
            let placeholders: Vec<String> = (1..=chunk.len()).map(|i| format!("?{i}")).collect();
            let sql = format!(
                "SELECT {SELECT_COLS} FROM timeline_entries WHERE id IN ({})",
                placeholders.join(", ")
            );
            let params: Vec<libsql::Value> =
                chunk.iter().map(|id| libsql::Value::from(*id)).collect();

            let mut rows = self
                .conn()
                .query(&sql, libsql::params_from_iter(params))
                .await?;
            while let Some(row) = rows.next().await? {
                let entry = row_to_entry(&row)?;
                found.insert(entry.id.clone(), entry);
            }
        }

        for id in batch.ids() {
            match found.get(id) {
                None => {
                    return Err(DatabaseError::not_found(
                        EntityType::TimelineEntry,
                        id.to_string(),
                    ));
                }
                Some(entry) if entry.user_id != user_id => {
                    return Err(DatabaseError::Forbidden {
                        entity: EntityType::TimelineEntry,
                        id: id.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(found)
    }

    /// Persist a reorder batch for `user_id` and return their full timeline.
    ///
    /// Nothing is written unless every id exists and is owned by the caller.
    /// Each changed order gets a `reordered` audit entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `Forbidden` from the ownership
    /// check, or the first SQL failure after rolling the transaction back.
    pub async fn reorder_entries(
        &self,
        user_id: &str,
        batch: &ReorderBatch,
    ) -> Result<Vec<TimelineEntry>, DatabaseError> {
        let current = self.load_batch_entries(user_id, batch).await?;
        let now = Utc::now();

        let mut audits = Vec::new();
        for item in batch.items() {
            let Some(entry) = current.get(&item.id) else {
                continue;
            };
            if entry.order == item.order {
                continue;
            }
            let detail = OrderChangedDetail {
                category: entry.category,
                from: entry.order,
                to: item.order,
            };
            audits.push(
                self.new_audit(
                    Some(user_id),
                    EntityType::TimelineEntry,
                    &item.id,
                    AuditAction::Reordered,
                    Some(to_json(&detail)?),
                    now,
                )
                .await?,
            );
        }

        let tx = self.conn().transaction().await?;
        let result: Result<(), DatabaseError> = async {
            write_orders(&tx, batch.items(), now).await?;
            for audit in &audits {
                insert_audit(&tx, audit).await?;
            }
            Ok(())
        }
        .await;
        match result {
            Ok(()) => tx.commit().await?,
            Err(e) => {
                tracing::warn!(user_id, items = batch.len(), error = %e, "reorder rolled back");
                tx.rollback().await?;
                return Err(e);
            }
        }

        tracing::info!(user_id, items = batch.len(), changed = audits.len(), "reorder committed");
        self.list_entries_for_user(user_id).await
    }

    /// Move an entry one step up or down within its category.
    ///
    /// The whole category is renumbered `0..n-1` and submitted as one batch.
    /// At the top (up) or bottom (down) this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` / `Forbidden` if the entry is not the
    /// caller's, or any error from [`Self::reorder_entries`].
    pub async fn move_entry(
        &self,
        user_id: &str,
        id: &str,
        direction: MoveDirection,
    ) -> Result<Vec<TimelineEntry>, DatabaseError> {
        self.get_owned_entry(user_id, id).await?;
        let entries = self.list_entries_for_user(user_id).await?;
        match plan_move(&entries, id, direction)? {
            Some(batch) => self.reorder_entries(user_id, &batch).await,
            None => {
                tracing::debug!(entry_id = id, %direction, "move is a no-op at the boundary");
                Ok(entries)
            }
        }
    }

    /// Renumber one category to `0..n-1` in its current display order.
    /// Returns the number of entries whose order changed.
    ///
    /// # Errors
    ///
    /// Returns the first SQL failure after rolling the transaction back.
    pub async fn compact_category(
        &self,
        user_id: &str,
        category: EntryCategory,
    ) -> Result<usize, DatabaseError> {
        let tx = self.conn().transaction().await?;
        match self.compact_on(&tx, user_id, category, Utc::now()).await {
            Ok(changed) => {
                tx.commit().await?;
                Ok(changed)
            }
            Err(e) => {
                tracing::warn!(user_id, %category, error = %e, "compaction rolled back");
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    /// Compact one category on `conn`, normally an open transaction.
    pub(crate) async fn compact_on(
        &self,
        conn: &libsql::Connection,
        user_id: &str,
        category: EntryCategory,
        now: DateTime<Utc>,
    ) -> Result<usize, DatabaseError> {
        let entries = load_entries(conn, user_id).await?;
        let Some(batch) = plan_compaction(&entries, category) else {
            return Ok(0);
        };
        let before: HashMap<&str, u32> = entries.iter().map(|e| (e.id.as_str(), e.order)).collect();

        write_orders(conn, batch.items(), now).await?;
        for item in batch.items() {
            let detail = OrderChangedDetail {
                category,
                from: before.get(item.id.as_str()).copied().unwrap_or_default(),
                to: item.order,
            };
            let audit = self
                .new_audit(
                    Some(user_id),
                    EntityType::TimelineEntry,
                    &item.id,
                    AuditAction::Compacted,
                    Some(to_json(&detail)?),
                    now,
                )
                .await?;
            insert_audit(conn, &audit).await?;
        }

        tracing::debug!(user_id, %category, changed = batch.len(), "category compacted");
        Ok(batch.len())
    }
}
