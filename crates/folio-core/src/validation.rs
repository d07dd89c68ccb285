//! Field validation shared by the storage layer and the HTTP layer.

use chrono::NaiveDate;

use crate::errors::CoreError;

const USERNAME_MIN: usize = 4;
const USERNAME_MAX: usize = 20;

/// Usernames are 4..=20 characters of `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns `CoreError::Validation` describing the first violated rule.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(CoreError::validation(format!(
            "username must be {USERNAME_MIN}-{USERNAME_MAX} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(CoreError::validation(
            "username may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(())
}

/// Trim and lowercase an email address after a shape check.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the address is not `local@domain.tld`.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim();
    let invalid = || CoreError::validation(format!("invalid email address '{email}'"));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(email.to_ascii_lowercase())
}

/// Links must be absolute `http://` or `https://` URLs.
///
/// # Errors
///
/// Returns `CoreError::Validation` for any other shape.
pub fn validate_link(link: &str) -> Result<(), CoreError> {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))
        .ok_or_else(|| CoreError::validation(format!("link must be an http(s) URL: '{link}'")))?;
    if rest.is_empty() || rest.starts_with('/') || rest.chars().any(char::is_whitespace) {
        return Err(CoreError::validation(format!("invalid link '{link}'")));
    }
    Ok(())
}

/// Require a non-blank text field. Returns the trimmed value.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming `field` if the value is blank.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// A date range must not end before it starts. Open ends are allowed.
///
/// # Errors
///
/// Returns `CoreError::Validation` if `end < start`.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), CoreError> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(CoreError::validation(format!(
            "end_date {e} is before start_date {s}"
        ))),
        _ => Ok(()),
    }
}
