//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob. These types
//! give the ordering actions a stable shape.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntryCategory;

/// Detail for `AuditAction::Reordered` and `AuditAction::Compacted`.
///
/// One entry is written per row whose order actually changed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OrderChangedDetail {
    pub category: EntryCategory,
    pub from: u32,
    pub to: u32,
}

/// Detail for `AuditAction::Deleted`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeletedDetail {
    pub title: String,
}
