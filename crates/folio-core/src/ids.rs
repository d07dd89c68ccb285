//! ID prefix constants.
//!
//! Every entity ID has the form `{prefix}-{8 hex chars}`, e.g. `tle-a3f8b2c1`.
//! The random part is produced by the database (`randomblob(4)`).

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_ENTRY: &str = "tle";
pub const PREFIX_PORTFOLIO: &str = "pfl";
pub const PREFIX_MESSAGE: &str = "msg";
pub const PREFIX_AUDIT: &str = "aud";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_ENTRY,
    PREFIX_PORTFOLIO,
    PREFIX_MESSAGE,
    PREFIX_AUDIT,
];

/// Returns `true` if `id` looks like `{prefix}-{8 hex}` for the given prefix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
