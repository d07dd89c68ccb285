//! Portfolio item repository.

use chrono::Utc;

use folio_core::audit_detail::DeletedDetail;
use folio_core::entities::PortfolioItem;
use folio_core::enums::{AuditAction, EntityType};
use folio_core::ids::PREFIX_PORTFOLIO;
use folio_core::inputs::NewPortfolioItem;

use crate::error::DatabaseError;
use crate::helpers::{clean_text, get_opt_string, parse_datetime, to_json};
use crate::service::FolioService;
use crate::updates::portfolio::PortfolioItemUpdate;

const SELECT_COLS: &str =
    "id, user_id, title, description, link, image_url, created_at, updated_at";

fn row_to_item(row: &libsql::Row) -> Result<PortfolioItem, DatabaseError> {
    Ok(PortfolioItem {
        id: row.get::<String>(0)?,
        user_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        link: get_opt_string(row, 4)?,
        image_url: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl FolioService {
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a bad payload and
    /// `DatabaseError::NotFound` if the user does not exist.
    pub async fn create_portfolio_item(
        &self,
        user_id: &str,
        input: &NewPortfolioItem,
    ) -> Result<PortfolioItem, DatabaseError> {
        input.validate()?;
        self.get_user(user_id).await?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PORTFOLIO).await?;
        let item = PortfolioItem {
            id: id.clone(),
            user_id: user_id.to_string(),
            title: input.title.trim().to_string(),
            description: clean_text(input.description.as_deref()),
            link: clean_text(input.link.as_deref()),
            image_url: clean_text(input.image_url.as_deref()),
            created_at: now,
            updated_at: now,
        };

        let insert = (
            "INSERT INTO portfolio_items (id, user_id, title, description, link, image_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                .to_string(),
            vec![
                libsql::Value::from(item.id.as_str()),
                item.user_id.as_str().into(),
                item.title.as_str().into(),
                item.description.clone().into(),
                item.link.clone().into(),
                item.image_url.clone().into(),
                now.to_rfc3339().into(),
                now.to_rfc3339().into(),
            ],
        );
        let audit = self
            .new_audit(
                Some(user_id),
                EntityType::PortfolioItem,
                &id,
                AuditAction::Created,
                None,
                now,
            )
            .await?;
        self.execute_audited(vec![insert], &audit).await?;

        Ok(item)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no item has this ID.
    pub async fn get_portfolio_item(&self, id: &str) -> Result<PortfolioItem, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM portfolio_items WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::PortfolioItem, id.to_string()))?;
        row_to_item(&row)
    }

    async fn get_owned_portfolio_item(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<PortfolioItem, DatabaseError> {
        let item = self.get_portfolio_item(id).await?;
        if item.user_id != user_id {
            return Err(DatabaseError::Forbidden {
                entity: EntityType::PortfolioItem,
                id: id.to_string(),
            });
        }
        Ok(item)
    }

    /// A user's portfolio, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_portfolio_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<PortfolioItem>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM portfolio_items WHERE user_id = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                [user_id],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }
        Ok(items)
    }

    /// Public portfolio of the user named by `handle`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the handle matches nobody.
    pub async fn list_portfolio_by_handle(
        &self,
        handle: &str,
    ) -> Result<Vec<PortfolioItem>, DatabaseError> {
        let user = self.find_user_by_handle(handle).await?;
        self.list_portfolio_for_user(&user.id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` / `Forbidden` from the ownership
    /// check, or `DatabaseError::Validation` for bad fields.
    pub async fn update_portfolio_item(
        &self,
        user_id: &str,
        id: &str,
        update: &PortfolioItemUpdate,
    ) -> Result<PortfolioItem, DatabaseError> {
        update.validate()?;
        let existing = self.get_owned_portfolio_item(user_id, id).await?;
        if update.is_empty() {
            return Ok(existing);
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref title) = update.title {
            params.push(title.trim().into());
            sets.push(format!("title = ?{}", params.len()));
        }
        for (column, value) in [
            ("description", &update.description),
            ("link", &update.link),
            ("image_url", &update.image_url),
        ] {
            if let Some(value) = value {
                params.push(clean_text(value.as_deref()).into());
                sets.push(format!("{column} = ?{}", params.len()));
            }
        }

        let now = Utc::now();
        params.push(now.to_rfc3339().into());
        sets.push(format!("updated_at = ?{}", params.len()));
        params.push(id.into());
        let sql = format!(
            "UPDATE portfolio_items SET {} WHERE id = ?{}",
            sets.join(", "),
            params.len()
        );

        let audit = self
            .new_audit(
                Some(user_id),
                EntityType::PortfolioItem,
                id,
                AuditAction::Updated,
                Some(to_json(update)?),
                now,
            )
            .await?;
        self.execute_audited(vec![(sql, params)], &audit).await?;

        self.get_portfolio_item(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` / `Forbidden` from the ownership check.
    pub async fn delete_portfolio_item(&self, user_id: &str, id: &str) -> Result<(), DatabaseError> {
        let existing = self.get_owned_portfolio_item(user_id, id).await?;
        let now = Utc::now();

        let audit = self
            .new_audit(
                Some(user_id),
                EntityType::PortfolioItem,
                id,
                AuditAction::Deleted,
                Some(to_json(&DeletedDetail {
                    title: existing.title,
                })?),
                now,
            )
            .await?;
        self.execute_audited(
            vec![(
                "DELETE FROM portfolio_items WHERE id = ?1".to_string(),
                vec![id.into()],
            )],
            &audit,
        )
        .await?;
        Ok(())
    }
}
