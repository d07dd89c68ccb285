//! Profile update builder.

use serde::{Deserialize, Serialize};

use super::double_option;

/// Editable profile fields. Username and email are fixed after registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdate {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub bio: Option<Option<String>>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub struct ProfileUpdateBuilder(ProfileUpdate);

impl ProfileUpdateBuilder {
    pub fn new() -> Self {
        Self(ProfileUpdate::default())
    }

    pub fn display_name(mut self, val: Option<String>) -> Self {
        self.0.display_name = Some(val);
        self
    }

    pub fn bio(mut self, val: Option<String>) -> Self {
        self.0.bio = Some(val);
        self
    }

    pub fn build(self) -> ProfileUpdate {
        self.0
    }
}

impl Default for ProfileUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
