//! About section update.

use serde::{Deserialize, Serialize};

use super::double_option;

/// `PATCH /about` body. `content: null` clears the section; an absent
/// `content` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutUpdate {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub content: Option<Option<String>>,
}

impl AboutUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    #[must_use]
    pub fn set(content: impl Into<String>) -> Self {
        Self {
            content: Some(Some(content.into())),
        }
    }

    #[must_use]
    pub const fn clear() -> Self {
        Self {
            content: Some(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: AboutUpdate = serde_json::from_str("{}").unwrap();
        assert!(absent.is_empty());

        let null: AboutUpdate = serde_json::from_str(r#"{"content": null}"#).unwrap();
        assert_eq!(null, AboutUpdate::clear());

        let set: AboutUpdate = serde_json::from_str(r#"{"content": "Hi"}"#).unwrap();
        assert_eq!(set, AboutUpdate::set("Hi"));
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(serde_json::from_str::<AboutUpdate>(r#"{"userId": 1}"#).is_err());
    }
}
