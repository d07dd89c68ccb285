//! Timeline entry repository: CRUD plus per-category order maintenance.
//!
//! `order` is stored in the `sort_order` column and scoped to
//! `(user_id, category)`. Creating appends to the end of the category,
//! deleting or moving an entry out of a category compacts what is left.

use chrono::Utc;

use folio_core::audit_detail::DeletedDetail;
use folio_core::entities::TimelineEntry;
use folio_core::enums::{AuditAction, EntityType, EntryCategory};
use folio_core::ids::PREFIX_ENTRY;
use folio_core::inputs::NewTimelineEntry;
use folio_core::validation::validate_date_range;

use crate::error::DatabaseError;
use crate::helpers::{
    clean_text, get_opt_string, get_order, parse_datetime, parse_enum, parse_optional_date,
    to_json,
};
use crate::repos::audit::insert_audit;
use crate::service::FolioService;
use crate::updates::timeline::TimelineEntryUpdate;

pub(crate) const SELECT_COLS: &str = "id, user_id, category, institution, title, field, period, \
     start_date, end_date, location, description, gpa, skills, sort_order, created_at, updated_at";

pub(crate) fn row_to_entry(row: &libsql::Row) -> Result<TimelineEntry, DatabaseError> {
    Ok(TimelineEntry {
        id: row.get::<String>(0)?,
        user_id: row.get::<String>(1)?,
        category: parse_enum(&row.get::<String>(2)?)?,
        institution: row.get::<String>(3)?,
        title: row.get::<String>(4)?,
        field: get_opt_string(row, 5)?,
        period: get_opt_string(row, 6)?,
        start_date: parse_optional_date(get_opt_string(row, 7)?.as_deref())?,
        end_date: parse_optional_date(get_opt_string(row, 8)?.as_deref())?,
        location: get_opt_string(row, 9)?,
        description: get_opt_string(row, 10)?,
        gpa: get_opt_string(row, 11)?,
        skills: get_opt_string(row, 12)?,
        order: get_order(row, 13)?,
        created_at: parse_datetime(&row.get::<String>(14)?)?,
        updated_at: parse_datetime(&row.get::<String>(15)?)?,
    })
}

/// All of a user's entries in public display order: category, then order,
/// then creation time.
pub(crate) async fn load_entries(
    conn: &libsql::Connection,
    user_id: &str,
) -> Result<Vec<TimelineEntry>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM timeline_entries WHERE user_id = ?1"),
            [user_id],
        )
        .await?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next().await? {
        entries.push(row_to_entry(&row)?);
    }
    entries.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then(a.order.cmp(&b.order))
            .then(a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(entries)
}

/// The order a new entry gets when appended to `category`.
pub(crate) async fn next_order(
    conn: &libsql::Connection,
    user_id: &str,
    category: EntryCategory,
) -> Result<u32, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM timeline_entries
             WHERE user_id = ?1 AND category = ?2",
            libsql::params![user_id, category.as_str()],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let next = row.get::<i64>(0)?;
    u32::try_from(next).map_err(|_| DatabaseError::InvalidState(format!("next order {next}")))
}

fn text_param(value: Option<&str>) -> libsql::Value {
    clean_text(value).into()
}

fn date_param(value: Option<chrono::NaiveDate>) -> libsql::Value {
    value.map(|d| d.format("%Y-%m-%d").to_string()).into()
}

impl FolioService {
    /// Create a timeline entry for `user_id`.
    ///
    /// Without an explicit `order` the entry is appended to its category
    /// (`max + 1` within that category, `0` for the first one).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a bad payload and
    /// `DatabaseError::NotFound` if the user does not exist.
    pub async fn create_entry(
        &self,
        user_id: &str,
        input: &NewTimelineEntry,
    ) -> Result<TimelineEntry, DatabaseError> {
        input.validate()?;
        self.get_user(user_id).await?;

        let order = match input.order {
            Some(order) => order,
            None => next_order(self.conn(), user_id, input.category).await?,
        };

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ENTRY).await?;
        let entry = TimelineEntry {
            id: id.clone(),
            user_id: user_id.to_string(),
            category: input.category,
            institution: input.institution.trim().to_string(),
            title: input.title.trim().to_string(),
            field: clean_text(input.field.as_deref()),
            period: clean_text(input.period.as_deref()),
            start_date: input.start_date,
            end_date: input.end_date,
            location: clean_text(input.location.as_deref()),
            description: clean_text(input.description.as_deref()),
            gpa: clean_text(input.gpa.as_deref()),
            skills: clean_text(input.skills.as_deref()),
            order,
            created_at: now,
            updated_at: now,
        };

        let insert = (
            "INSERT INTO timeline_entries (id, user_id, category, institution, title, field,
                 period, start_date, end_date, location, description, gpa, skills,
                 sort_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
                .to_string(),
            vec![
                libsql::Value::from(entry.id.as_str()),
                entry.user_id.as_str().into(),
                entry.category.as_str().into(),
                entry.institution.as_str().into(),
                entry.title.as_str().into(),
                entry.field.clone().into(),
                entry.period.clone().into(),
                date_param(entry.start_date),
                date_param(entry.end_date),
                entry.location.clone().into(),
                entry.description.clone().into(),
                entry.gpa.clone().into(),
                entry.skills.clone().into(),
                i64::from(order).into(),
                now.to_rfc3339().into(),
                now.to_rfc3339().into(),
            ],
        );
        let audit = self
            .new_audit(
                Some(user_id),
                EntityType::TimelineEntry,
                &id,
                AuditAction::Created,
                Some(to_json(&entry)?),
                now,
            )
            .await?;
        self.execute_audited(vec![insert], &audit).await?;

        tracing::debug!(entry_id = %id, category = %entry.category, order, "timeline entry created");
        Ok(entry)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no entry has this ID.
    pub async fn get_entry(&self, id: &str) -> Result<TimelineEntry, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM timeline_entries WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::TimelineEntry, id.to_string()))?;
        row_to_entry(&row)
    }

    /// Fetch an entry and check it belongs to `user_id`.
    pub(crate) async fn get_owned_entry(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<TimelineEntry, DatabaseError> {
        let entry = self.get_entry(id).await?;
        if entry.user_id != user_id {
            return Err(DatabaseError::Forbidden {
                entity: EntityType::TimelineEntry,
                id: id.to_string(),
            });
        }
        Ok(entry)
    }

    /// All of a user's entries ordered by `(category, order, created_at)`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_entries_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<TimelineEntry>, DatabaseError> {
        load_entries(self.conn(), user_id).await
    }

    /// Public timeline of the user named by `handle`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the handle matches nobody.
    pub async fn list_entries_by_handle(
        &self,
        handle: &str,
    ) -> Result<Vec<TimelineEntry>, DatabaseError> {
        let user = self.find_user_by_handle(handle).await?;
        self.list_entries_for_user(&user.id).await
    }

    /// Apply a partial update.
    ///
    /// Moving an entry to another category appends it to the end of the target
    /// category and compacts the category it left, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` / `Forbidden` from the ownership check,
    /// `DatabaseError::Validation` for bad fields, or the first SQL failure
    /// (after rolling back).
    pub async fn update_entry(
        &self,
        user_id: &str,
        id: &str,
        update: &TimelineEntryUpdate,
    ) -> Result<TimelineEntry, DatabaseError> {
        update.validate()?;
        let existing = self.get_owned_entry(user_id, id).await?;
        if update.is_empty() {
            return Ok(existing);
        }
        validate_date_range(
            update.start_date.unwrap_or(existing.start_date),
            update.end_date.unwrap_or(existing.end_date),
        )?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        let moved_from = update
            .category
            .filter(|c| *c != existing.category)
            .map(|_| existing.category);
        if let Some(category) = update.category {
            params.push(category.as_str().into());
            sets.push(format!("category = ?{}", params.len()));
            if moved_from.is_some() {
                let order = next_order(self.conn(), user_id, category).await?;
                params.push(i64::from(order).into());
                sets.push(format!("sort_order = ?{}", params.len()));
            }
        }
        if let Some(ref institution) = update.institution {
            params.push(institution.trim().into());
            sets.push(format!("institution = ?{}", params.len()));
        }
        if let Some(ref title) = update.title {
            params.push(title.trim().into());
            sets.push(format!("title = ?{}", params.len()));
        }
        for (column, value) in [
            ("field", &update.field),
            ("period", &update.period),
            ("location", &update.location),
            ("description", &update.description),
            ("gpa", &update.gpa),
            ("skills", &update.skills),
        ] {
            if let Some(value) = value {
                params.push(text_param(value.as_deref()));
                sets.push(format!("{column} = ?{}", params.len()));
            }
        }
        if let Some(start) = update.start_date {
            params.push(date_param(start));
            sets.push(format!("start_date = ?{}", params.len()));
        }
        if let Some(end) = update.end_date {
            params.push(date_param(end));
            sets.push(format!("end_date = ?{}", params.len()));
        }

        let now = Utc::now();
        params.push(now.to_rfc3339().into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(id.into());
        let sql = format!(
            "UPDATE timeline_entries SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );

        let audit = self
            .new_audit(
                Some(user_id),
                EntityType::TimelineEntry,
                id,
                AuditAction::Updated,
                Some(to_json(update)?),
                now,
            )
            .await?;

        let tx = self.conn().transaction().await?;
        let result = async {
            tx.execute(&sql, libsql::params_from_iter(params)).await?;
            if let Some(source) = moved_from {
                self.compact_on(&tx, user_id, source, now).await?;
            }
            insert_audit(&tx, &audit).await
        }
        .await;
        match result {
            Ok(()) => tx.commit().await?,
            Err(e) => {
                tracing::warn!(entry_id = id, error = %e, "timeline update rolled back");
                tx.rollback().await?;
                return Err(e);
            }
        }

        self.get_entry(id).await
    }

    /// Delete an entry and compact the rest of its category.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` / `Forbidden` from the ownership
    /// check, or the first SQL failure (after rolling back).
    pub async fn delete_entry(&self, user_id: &str, id: &str) -> Result<(), DatabaseError> {
        let existing = self.get_owned_entry(user_id, id).await?;
        let now = Utc::now();
        let audit = self
            .new_audit(
                Some(user_id),
                EntityType::TimelineEntry,
                id,
                AuditAction::Deleted,
                Some(to_json(&DeletedDetail {
                    title: existing.title.clone(),
                })?),
                now,
            )
            .await?;

        let tx = self.conn().transaction().await?;
        let result = async {
            tx.execute("DELETE FROM timeline_entries WHERE id = ?1", [id])
                .await?;
            self.compact_on(&tx, user_id, existing.category, now).await?;
            insert_audit(&tx, &audit).await
        }
        .await;
        match result {
            Ok(()) => tx.commit().await?,
            Err(e) => {
                tracing::warn!(entry_id = id, error = %e, "timeline delete rolled back");
                tx.rollback().await?;
                return Err(e);
            }
        }

        tracing::debug!(entry_id = id, category = %existing.category, "timeline entry deleted");
        Ok(())
    }
}
