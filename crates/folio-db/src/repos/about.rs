//! About section repository. One row per user, created with the account.

use chrono::Utc;

use folio_core::entities::About;
use folio_core::enums::{AuditAction, EntityType};

use crate::error::DatabaseError;
use crate::helpers::{clean_text, get_opt_string, parse_datetime, to_json};
use crate::service::FolioService;
use crate::updates::about::AboutUpdate;

fn row_to_about(row: &libsql::Row) -> Result<About, DatabaseError> {
    Ok(About {
        user_id: row.get::<String>(0)?,
        content: get_opt_string(row, 1)?,
        updated_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

impl FolioService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the user has no about section.
    pub async fn get_about(&self, user_id: &str) -> Result<About, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT user_id, content, updated_at FROM abouts WHERE user_id = ?1",
                [user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::About, user_id.to_string()))?;
        row_to_about(&row)
    }

    /// Public about section of the user named by `handle`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the handle matches nobody.
    pub async fn get_about_by_handle(&self, handle: &str) -> Result<About, DatabaseError> {
        let user = self.find_user_by_handle(handle).await?;
        self.get_about(&user.id).await
    }

    /// Replace or clear the caller's about text. Blank text clears it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the user has no about section.
    pub async fn update_about(
        &self,
        user_id: &str,
        update: &AboutUpdate,
    ) -> Result<About, DatabaseError> {
        let existing = self.get_about(user_id).await?;
        let Some(content) = &update.content else {
            return Ok(existing);
        };

        let now = Utc::now();
        let audit = self
            .new_audit(
                Some(user_id),
                EntityType::About,
                user_id,
                AuditAction::Updated,
                Some(to_json(update)?),
                now,
            )
            .await?;
        self.execute_audited(
            vec![(
                "UPDATE abouts SET content = ?1, updated_at = ?2 WHERE user_id = ?3".to_string(),
                vec![
                    clean_text(content.as_deref()).into(),
                    now.to_rfc3339().into(),
                    user_id.into(),
                ],
            )],
            &audit,
        )
        .await?;

        self.get_about(user_id).await
    }
}
