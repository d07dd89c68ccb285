//! Portfolio item update builder.

use serde::{Deserialize, Serialize};

use folio_core::errors::CoreError;
use folio_core::validation::{require_text, validate_link};

use super::double_option;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortfolioItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
}

impl PortfolioItemUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank title or a malformed link.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(Some(link)) = &self.link {
            validate_link(link)?;
        }
        Ok(())
    }
}

pub struct PortfolioItemUpdateBuilder(PortfolioItemUpdate);

impl PortfolioItemUpdateBuilder {
    pub fn new() -> Self {
        Self(PortfolioItemUpdate::default())
    }

    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    pub fn link(mut self, val: Option<String>) -> Self {
        self.0.link = Some(val);
        self
    }

    pub fn image_url(mut self, val: Option<String>) -> Self {
        self.0.image_url = Some(val);
        self
    }

    pub fn build(self) -> PortfolioItemUpdate {
        self.0
    }
}

impl Default for PortfolioItemUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
