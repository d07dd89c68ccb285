//! Timeline entry update builder.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use folio_core::enums::EntryCategory;
use folio_core::errors::CoreError;
use folio_core::validation::{require_text, validate_date_range};

use super::double_option;

/// Partial update of a timeline entry.
///
/// `order` is deliberately absent: ordering changes go through the reorder
/// batch so that a partition is never renumbered one row at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineEntryUpdate {
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<EntryCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, alias = "degree", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub field: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub period: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub gpa: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub skills: Option<Option<String>>,
}

impl TimelineEntryUpdate {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the fields that are set. The date range is checked against the
    /// merged result by the repository.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank institution or title.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(institution) = &self.institution {
            require_text("institution", institution)?;
        }
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            validate_date_range(start, end)?;
        }
        Ok(())
    }
}

pub struct TimelineEntryUpdateBuilder(TimelineEntryUpdate);

impl TimelineEntryUpdateBuilder {
    pub fn new() -> Self {
        Self(TimelineEntryUpdate::default())
    }

    pub fn category(mut self, val: EntryCategory) -> Self {
        self.0.category = Some(val);
        self
    }

    pub fn institution(mut self, val: impl Into<String>) -> Self {
        self.0.institution = Some(val.into());
        self
    }

    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    pub fn field(mut self, val: Option<String>) -> Self {
        self.0.field = Some(val);
        self
    }

    pub fn period(mut self, val: Option<String>) -> Self {
        self.0.period = Some(val);
        self
    }

    pub fn start_date(mut self, val: Option<NaiveDate>) -> Self {
        self.0.start_date = Some(val);
        self
    }

    pub fn end_date(mut self, val: Option<NaiveDate>) -> Self {
        self.0.end_date = Some(val);
        self
    }

    pub fn location(mut self, val: Option<String>) -> Self {
        self.0.location = Some(val);
        self
    }

    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    pub fn gpa(mut self, val: Option<String>) -> Self {
        self.0.gpa = Some(val);
        self
    }

    pub fn skills(mut self, val: Option<String>) -> Self {
        self.0.skills = Some(val);
        self
    }

    pub fn build(self) -> TimelineEntryUpdate {
        self.0
    }
}

impl Default for TimelineEntryUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
