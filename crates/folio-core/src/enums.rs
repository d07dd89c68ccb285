//! Categories, directions, entity types, and audit actions for Folio.
//!
//! Storage enums expose `as_str()` for the exact spelling written to SQL.
//! `EntryCategory` is the one enum with legacy spellings: older rows and older
//! clients used lowercase `education` / `internship`, which still parse.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// EntryCategory
// ---------------------------------------------------------------------------

/// Timeline entry category. Each category is its own ordering partition.
///
/// Variant order is the display order of the public timeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryCategory {
    #[serde(alias = "education")]
    Education,
    Work,
    #[serde(alias = "internship")]
    Internship,
    Certificate,
}

impl EntryCategory {
    pub const ALL: [Self; 4] = [
        Self::Education,
        Self::Work,
        Self::Internship,
        Self::Certificate,
    ];

    /// Canonical spelling used in SQL and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Education => "EDUCATION",
            Self::Work => "WORK",
            Self::Internship => "INTERNSHIP",
            Self::Certificate => "CERTIFICATE",
        }
    }

    /// Legacy lowercase spellings accepted on input.
    #[must_use]
    pub fn from_legacy(s: &str) -> Option<Self> {
        match s {
            "education" => Some(Self::Education),
            "internship" => Some(Self::Internship),
            _ => None,
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .or_else(|| Self::from_legacy(s))
            .ok_or_else(|| CoreError::Validation(format!("unknown entry category '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// MoveDirection
// ---------------------------------------------------------------------------

/// Direction for a single-step move within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    Reordered,
    Compacted,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Reordered => "reordered",
            Self::Compacted => "compacted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in the audit trail and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    TimelineEntry,
    PortfolioItem,
    ContactMessage,
    About,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::TimelineEntry => "timeline_entry",
            Self::PortfolioItem => "portfolio_item",
            Self::ContactMessage => "contact_message",
            Self::About => "about",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
