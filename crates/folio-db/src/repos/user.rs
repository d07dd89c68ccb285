//! User repository: registration, handle lookup, profile edits.

use chrono::Utc;

use folio_core::entities::User;
use folio_core::enums::{AuditAction, EntityType};
use folio_core::ids::PREFIX_USER;
use folio_core::inputs::NewUser;
use folio_core::validation::normalize_email;

use crate::error::DatabaseError;
use crate::helpers::{clean_text, get_opt_string, is_unique_violation, parse_datetime, to_json};
use crate::service::FolioService;
use crate::updates::profile::ProfileUpdate;

const SELECT_COLS: &str = "id, username, email, display_name, bio, created_at, updated_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<String>(0)?,
        username: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        display_name: get_opt_string(row, 3)?,
        bio: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl FolioService {
    /// Register a user. The email is stored lowercased.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a bad username or email, and
    /// `DatabaseError::Conflict` if either is already registered.
    pub async fn create_user(&self, input: &NewUser) -> Result<User, DatabaseError> {
        input.validate()?;
        let email = normalize_email(&input.email)?;

        let mut rows = self
            .conn()
            .query(
                "SELECT username, email FROM users WHERE username = ?1 OR email = ?2 LIMIT 1",
                libsql::params![input.username.as_str(), email.as_str()],
            )
            .await?;
        if let Some(row) = rows.next().await? {
            let taken = if row.get::<String>(0)? == input.username {
                format!("username '{}' is already taken", input.username)
            } else {
                format!("email '{email}' is already registered")
            };
            return Err(DatabaseError::Conflict(taken));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_USER).await?;
        let user = User {
            id: id.clone(),
            username: input.username.clone(),
            email,
            display_name: clean_text(input.display_name.as_deref()),
            bio: clean_text(input.bio.as_deref()),
            created_at: now,
            updated_at: now,
        };

        let insert_user = (
            "INSERT INTO users (id, username, email, display_name, bio, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                .to_string(),
            vec![
                libsql::Value::from(user.id.as_str()),
                user.username.as_str().into(),
                user.email.as_str().into(),
                user.display_name.clone().into(),
                user.bio.clone().into(),
                now.to_rfc3339().into(),
                now.to_rfc3339().into(),
            ],
        );
        let insert_about = (
            "INSERT INTO abouts (user_id, content, updated_at) VALUES (?1, NULL, ?2)".to_string(),
            vec![libsql::Value::from(user.id.as_str()), now.to_rfc3339().into()],
        );
        let audit = self
            .new_audit(Some(&id), EntityType::User, &id, AuditAction::Created, None, now)
            .await?;
        match self
            .execute_audited(vec![insert_user, insert_about], &audit)
            .await
        {
            Err(DatabaseError::LibSql(ref e)) if is_unique_violation(e) => {
                return Err(DatabaseError::Conflict(
                    "username or email is already registered".into(),
                ));
            }
            result => result?,
        }

        tracing::debug!(user_id = %id, username = %user.username, "user created");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no user has this ID.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::User, id.to_string()))?;
        row_to_user(&row)
    }

    /// Resolve a public handle: an email when it contains `@`, otherwise a
    /// username.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if nobody matches.
    pub async fn find_user_by_handle(&self, handle: &str) -> Result<User, DatabaseError> {
        let handle = handle.trim();
        let mut rows = if handle.contains('@') {
            self.conn()
                .query(
                    &format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"),
                    [handle.to_ascii_lowercase()],
                )
                .await?
        } else {
            self.conn()
                .query(
                    &format!("SELECT {SELECT_COLS} FROM users WHERE username = ?1"),
                    [handle],
                )
                .await?
        };
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::User, handle.to_string()))?;
        row_to_user(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the user does not exist.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<User, DatabaseError> {
        let existing = self.get_user(user_id).await?;
        if update.is_empty() {
            return Ok(existing);
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref display_name) = update.display_name {
            params.push(clean_text(display_name.as_deref()).into());
            sets.push(format!("display_name = ?{}", params.len()));
        }
        if let Some(ref bio) = update.bio {
            params.push(clean_text(bio.as_deref()).into());
            sets.push(format!("bio = ?{}", params.len()));
        }

        let now = Utc::now();
        params.push(now.to_rfc3339().into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(user_id.into());
        let sql = format!(
            "UPDATE users SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );

        let audit = self
            .new_audit(
                Some(user_id),
                EntityType::User,
                user_id,
                AuditAction::Updated,
                Some(to_json(update)?),
                now,
            )
            .await?;
        self.execute_audited(vec![(sql, params)], &audit).await?;

        self.get_user(user_id).await
    }
}
