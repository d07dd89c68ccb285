use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A message left by a visitor on someone's public page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: String,
    pub user_id: String,
    pub sender_name: String,
    pub sender_email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
