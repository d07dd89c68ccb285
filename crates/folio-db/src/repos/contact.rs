//! Contact message repository. Visitors write, the profile owner reads.

use chrono::Utc;

use folio_core::entities::ContactMessage;
use folio_core::enums::{AuditAction, EntityType};
use folio_core::ids::PREFIX_MESSAGE;
use folio_core::inputs::NewContactMessage;
use folio_core::validation::normalize_email;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::service::FolioService;

fn row_to_message(row: &libsql::Row) -> Result<ContactMessage, DatabaseError> {
    Ok(ContactMessage {
        id: row.get::<String>(0)?,
        user_id: row.get::<String>(1)?,
        sender_name: row.get::<String>(2)?,
        sender_email: row.get::<String>(3)?,
        message: row.get::<String>(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl FolioService {
    /// Leave a message for `user_id`. The sender is anonymous, so the audit
    /// entry carries no user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a bad payload and
    /// `DatabaseError::NotFound` if the recipient does not exist.
    pub async fn create_contact_message(
        &self,
        user_id: &str,
        input: &NewContactMessage,
    ) -> Result<ContactMessage, DatabaseError> {
        input.validate()?;
        self.get_user(user_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_MESSAGE).await?;
        let msg = ContactMessage {
            id: id.clone(),
            user_id: user_id.to_string(),
            sender_name: input.sender_name.trim().to_string(),
            sender_email: normalize_email(&input.sender_email)?,
            message: input.message.trim().to_string(),
            created_at: now,
        };

        let insert = (
            "INSERT INTO contact_messages (id, user_id, sender_name, sender_email, message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                .to_string(),
            vec![
                libsql::Value::from(msg.id.as_str()),
                msg.user_id.as_str().into(),
                msg.sender_name.as_str().into(),
                msg.sender_email.as_str().into(),
                msg.message.as_str().into(),
                now.to_rfc3339().into(),
            ],
        );
        let audit = self
            .new_audit(
                None,
                EntityType::ContactMessage,
                &id,
                AuditAction::Created,
                None,
                now,
            )
            .await?;
        self.execute_audited(vec![insert], &audit).await?;

        tracing::debug!(message_id = %id, recipient = user_id, "contact message stored");
        Ok(msg)
    }

    /// Messages left for `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_contact_messages(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<ContactMessage>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, user_id, sender_name, sender_email, message, created_at
                 FROM contact_messages WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC LIMIT ?2",
                libsql::params![user_id, i64::from(limit)],
            )
            .await?;
        let mut messages = Vec::new();
        while let Some(row) = rows.next().await? {
            messages.push(row_to_message(&row)?);
        }
        Ok(messages)
    }
}
