use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Free-form "about me" text shown on a user's public page.
///
/// There is exactly one per user, created empty at registration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct About {
    pub user_id: String,
    pub content: Option<String>,
    pub updated_at: DateTime<Utc>,
}
