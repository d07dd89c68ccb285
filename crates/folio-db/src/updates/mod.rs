//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some` fields
//! generate SET clauses in the dynamic UPDATE SQL. Nullable columns use
//! `Option<Option<T>>`: `Some(None)` clears the column. The same structs are
//! the PATCH bodies of the HTTP layer, and are stored as the audit `detail`
//! (changed fields only).

pub mod about;
pub mod portfolio;
pub mod profile;
pub mod timeline;

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including `null`) as `Some(_)`.
///
/// Combined with `#[serde(default)]`, an absent field stays `None` while an
/// explicit `null` becomes `Some(None)`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
