//! Input payloads for create operations.
//!
//! These are the JSON bodies accepted by the HTTP layer and the arguments
//! taken by the `create_*` service methods. Each has a `validate()` that the
//! service calls before touching the database.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntryCategory;
use crate::errors::CoreError;
use crate::validation::{
    normalize_email, require_text, validate_date_range, validate_link, validate_username,
};

/// Registration payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl NewUser {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a bad username or email.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_username(&self.username)?;
        normalize_email(&self.email)?;
        Ok(())
    }
}

/// Payload for a new timeline entry.
///
/// `order` is optional; when absent the entry is appended to the end of its
/// category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTimelineEntry {
    #[serde(alias = "type")]
    pub category: EntryCategory,
    pub institution: String,
    #[serde(alias = "degree")]
    pub title: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
}

impl NewTimelineEntry {
    #[must_use]
    pub fn new(
        category: EntryCategory,
        institution: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            category,
            institution: institution.into(),
            title: title.into(),
            field: None,
            period: None,
            start_date: None,
            end_date: None,
            location: None,
            description: None,
            gpa: None,
            skills: None,
            order: None,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank required fields or an
    /// inverted date range.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("institution", &self.institution)?;
        require_text("title", &self.title)?;
        validate_date_range(self.start_date, self.end_date)
    }
}

/// Payload for a new portfolio item. The image itself is uploaded elsewhere;
/// only its URL is stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewPortfolioItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewPortfolioItem {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank title or a malformed link.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        if let Some(link) = &self.link {
            validate_link(link)?;
        }
        Ok(())
    }
}

/// Payload for a visitor's contact message.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewContactMessage {
    pub sender_name: String,
    pub sender_email: String,
    pub message: String,
}

impl NewContactMessage {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank fields or a malformed email.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("sender_name", &self.sender_name)?;
        normalize_email(&self.sender_email)?;
        require_text("message", &self.message)?;
        Ok(())
    }
}
