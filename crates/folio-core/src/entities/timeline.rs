use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntryCategory;

/// One education, work, internship, or certificate record on a user's timeline.
///
/// `order` is only meaningful within the `(user_id, category)` partition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimelineEntry {
    pub id: String,
    pub user_id: String,
    pub category: EntryCategory,
    pub institution: String,
    /// Degree for education, position for work and internships, name for certificates.
    pub title: String,
    pub field: Option<String>,
    /// Free-form period text kept from older entries (e.g. `"2019 - 2023"`).
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub gpa: Option<String>,
    pub skills: Option<String>,
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
