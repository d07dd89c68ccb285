//! Reorder batches and move planning for timeline entries.
//!
//! Ordering is scoped to a `(user, category)` partition. A reorder batch is
//! the full, renumbered list of one partition after a move; the storage layer
//! applies it atomically and writes exactly the submitted values.
//!
//! ```text
//! WORK: [A(0), B(1), C(2)]   move C up   →   batch [A→0, C→1, B→2]
//! ```
//!
//! The planning functions here are pure: they take a snapshot of the user's
//! entries and return the batch to submit. Entries in other categories never
//! appear in a planned batch.

use std::collections::HashSet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::TimelineEntry;
use crate::enums::{EntityType, EntryCategory, MoveDirection};
use crate::errors::CoreError;

/// One `(entry id, new order)` pair.
///
/// On the wire the id may arrive as a string or a number and the order as an
/// integer or a numeric string; both are normalized here. Negative orders are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReorderItem {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "order_from_int_or_string")]
    pub order: u32,
}

impl ReorderItem {
    #[must_use]
    pub fn new(id: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            order,
        }
    }
}

/// Request body for `PATCH /educations/reorder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

/// Largest batch accepted. A category is expected to hold a handful of
/// entries; anything near this size is a malformed request.
pub const MAX_BATCH_ITEMS: usize = 10_000;

/// A validated, non-empty reorder batch with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderBatch {
    items: Vec<ReorderItem>,
}

impl ReorderBatch {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `items` is empty, longer than
    /// [`MAX_BATCH_ITEMS`], or names the same entry twice.
    pub fn new(items: Vec<ReorderItem>) -> Result<Self, CoreError> {
        if items.is_empty() {
            return Err(CoreError::validation("reorder batch must not be empty"));
        }
        if items.len() > MAX_BATCH_ITEMS {
            return Err(CoreError::validation(format!(
                "reorder batch has {} items; at most {MAX_BATCH_ITEMS} are accepted",
                items.len()
            )));
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CoreError::validation(format!(
                    "entry {} appears more than once in the reorder batch",
                    item.id
                )));
            }
        }
        Ok(Self { items })
    }

    #[must_use]
    pub fn items(&self) -> &[ReorderItem] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<ReorderItem> {
        self.items
    }
}

impl TryFrom<ReorderRequest> for ReorderBatch {
    type Error = CoreError;

    fn try_from(req: ReorderRequest) -> Result<Self, Self::Error> {
        Self::new(req.items)
    }
}

/// The entries of one category in display order: by `order`, then creation
/// time, then id so that ties are stable.
#[must_use]
pub fn partition(entries: &[TimelineEntry], category: EntryCategory) -> Vec<&TimelineEntry> {
    let mut part: Vec<&TimelineEntry> = entries
        .iter()
        .filter(|e| e.category == category)
        .collect();
    part.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    part
}

/// Number a display-ordered partition `0..n-1`.
#[must_use]
pub fn renumber(part: &[&TimelineEntry]) -> Vec<ReorderItem> {
    part.iter()
        .zip(0u32..)
        .map(|(entry, order)| ReorderItem::new(entry.id.clone(), order))
        .collect()
}

/// Plan a single-step move of `entry_id` within its category.
///
/// Swaps the entry with its neighbour in the display-ordered partition,
/// renumbers the partition `0..n-1`, and returns the whole partition as the
/// batch. Returns `Ok(None)` when the entry is already first (moving up) or
/// last (moving down).
///
/// # Errors
///
/// Returns `CoreError::NotFound` if `entry_id` is not in `entries`.
pub fn plan_move(
    entries: &[TimelineEntry],
    entry_id: &str,
    direction: MoveDirection,
) -> Result<Option<ReorderBatch>, CoreError> {
    let target = entries
        .iter()
        .find(|e| e.id == entry_id)
        .ok_or_else(|| CoreError::NotFound {
            entity_type: EntityType::TimelineEntry,
            id: entry_id.to_string(),
        })?;

    let mut part = partition(entries, target.category);
    let Some(pos) = part.iter().position(|e| e.id == entry_id) else {
        return Ok(None);
    };

    let neighbour = match direction {
        MoveDirection::Up => pos.checked_sub(1),
        MoveDirection::Down => Some(pos + 1).filter(|&n| n < part.len()),
    };
    let Some(neighbour) = neighbour else {
        return Ok(None);
    };

    part.swap(pos, neighbour);
    ReorderBatch::new(renumber(&part)).map(Some)
}

/// Plan the renumbering of one category to `0..n-1` in its current display
/// order. Only entries whose order changes are included; `None` when the
/// partition is already contiguous (or empty).
#[must_use]
pub fn plan_compaction(
    entries: &[TimelineEntry],
    category: EntryCategory,
) -> Option<ReorderBatch> {
    let part = partition(entries, category);
    let changed: Vec<ReorderItem> = renumber(&part)
        .into_iter()
        .zip(&part)
        .filter(|(item, entry)| item.order != entry.order)
        .map(|(item, _)| item)
        .collect();
    ReorderBatch::new(changed).ok()
}

/// Returns `true` if the category's orders are exactly `0..n-1`.
#[must_use]
pub fn is_contiguous(entries: &[TimelineEntry], category: EntryCategory) -> bool {
    partition(entries, category)
        .iter()
        .zip(0u32..)
        .all(|(entry, expected)| entry.order == expected)
}

fn id_from_string_or_number<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    match RawId::deserialize(de)? {
        RawId::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err(D::Error::custom("id must not be empty"));
            }
            Ok(s.to_string())
        }
        RawId::Number(n) => Ok(n.to_string()),
    }
}

fn order_from_int_or_string<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawOrder {
        Number(i64),
        Text(String),
    }

    let value = match RawOrder::deserialize(de)? {
        RawOrder::Number(n) => n,
        RawOrder::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("order must be an integer, got '{s}'")))?,
    };
    u32::try_from(value)
        .map_err(|_| D::Error::custom(format!("order must be a non-negative integer, got {value}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{TimeDelta, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn entry(id: &str, category: EntryCategory, order: u32) -> TimelineEntry {
        let base = Utc::now();
        TimelineEntry {
            id: id.to_string(),
            user_id: "usr-00000001".into(),
            category,
            institution: format!("Institution {id}"),
            title: format!("Title {id}"),
            field: None,
            period: None,
            start_date: None,
            end_date: None,
            location: None,
            description: None,
            gpa: None,
            skills: None,
            order,
            created_at: base,
            updated_at: base,
        }
    }

    fn orders(batch: &ReorderBatch) -> HashMap<&str, u32> {
        batch
            .items()
            .iter()
            .map(|i| (i.id.as_str(), i.order))
            .collect()
    }

    #[test]
    fn batch_rejects_empty() {
        assert!(matches!(
            ReorderBatch::new(vec![]),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn batch_rejects_duplicate_ids() {
        let result = ReorderBatch::new(vec![ReorderItem::new("a", 0), ReorderItem::new("a", 1)]);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn batch_size_is_capped() {
        let items = |n: usize| -> Vec<ReorderItem> {
            (0..n)
                .map(|i| ReorderItem::new(i.to_string(), 0))
                .collect()
        };
        assert_eq!(ReorderBatch::new(items(MAX_BATCH_ITEMS)).unwrap().len(), MAX_BATCH_ITEMS);
        assert!(matches!(
            ReorderBatch::new(items(MAX_BATCH_ITEMS + 1)),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn request_decodes_mixed_id_and_order_types() {
        let req: ReorderRequest = serde_json::from_value(serde_json::json!({
            "items": [
                { "id": "tle-00000001", "order": 0 },
                { "id": 42, "order": "1" },
            ]
        }))
        .unwrap();
        assert_eq!(
            req.items,
            vec![ReorderItem::new("tle-00000001", 0), ReorderItem::new("42", 1)]
        );
    }

    #[rstest]
    #[case(serde_json::json!({ "id": "a", "order": -1 }))]
    #[case(serde_json::json!({ "id": "a", "order": "-3" }))]
    #[case(serde_json::json!({ "id": "a", "order": 1.5 }))]
    #[case(serde_json::json!({ "id": "a", "order": "first" }))]
    #[case(serde_json::json!({ "id": "", "order": 0 }))]
    #[case(serde_json::json!({ "id": "a" }))]
    fn item_rejects_malformed_values(#[case] raw: serde_json::Value) {
        assert!(serde_json::from_value::<ReorderItem>(raw).is_err());
    }

    #[test]
    fn empty_request_fails_conversion() {
        let req = ReorderRequest { items: vec![] };
        assert!(ReorderBatch::try_from(req).is_err());
    }

    #[test]
    fn move_up_swaps_with_previous_neighbour() {
        let entries = vec![
            entry("A", EntryCategory::Work, 0),
            entry("B", EntryCategory::Work, 1),
            entry("C", EntryCategory::Work, 2),
        ];

        let batch = plan_move(&entries, "C", MoveDirection::Up).unwrap().unwrap();
        let got = orders(&batch);
        assert_eq!(got["A"], 0);
        assert_eq!(got["B"], 2);
        assert_eq!(got["C"], 1);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn move_down_swaps_with_next_neighbour() {
        let entries = vec![
            entry("A", EntryCategory::Education, 0),
            entry("B", EntryCategory::Education, 1),
            entry("C", EntryCategory::Education, 2),
        ];

        let batch = plan_move(&entries, "A", MoveDirection::Down)
            .unwrap()
            .unwrap();
        let got = orders(&batch);
        assert_eq!((got["A"], got["B"], got["C"]), (1, 0, 2));
    }

    #[rstest]
    #[case("A", MoveDirection::Up)]
    #[case("C", MoveDirection::Down)]
    fn move_at_boundary_is_noop(#[case] id: &str, #[case] direction: MoveDirection) {
        let entries = vec![
            entry("A", EntryCategory::Work, 0),
            entry("B", EntryCategory::Work, 1),
            entry("C", EntryCategory::Work, 2),
        ];
        assert_eq!(plan_move(&entries, id, direction).unwrap(), None);
    }

    #[test]
    fn move_unknown_entry_is_not_found() {
        let entries = vec![entry("A", EntryCategory::Work, 0)];
        assert!(matches!(
            plan_move(&entries, "Z", MoveDirection::Up),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn move_never_includes_other_categories() {
        let entries = vec![
            entry("W1", EntryCategory::Work, 0),
            entry("E1", EntryCategory::Education, 0),
            entry("W2", EntryCategory::Work, 1),
            entry("E2", EntryCategory::Education, 1),
            entry("C1", EntryCategory::Certificate, 5),
        ];

        let batch = plan_move(&entries, "W2", MoveDirection::Up).unwrap().unwrap();
        let ids: Vec<&str> = batch.ids().collect();
        assert_eq!(ids, vec!["W2", "W1"]);
    }

    #[test]
    fn move_renumbers_sparse_partition() {
        // A freshly appended entry can sit far past the end of the partition.
        let entries = vec![
            entry("A", EntryCategory::Certificate, 3),
            entry("B", EntryCategory::Certificate, 7),
            entry("C", EntryCategory::Certificate, 12),
        ];

        let batch = plan_move(&entries, "C", MoveDirection::Up).unwrap().unwrap();
        let got = orders(&batch);
        assert_eq!((got["A"], got["B"], got["C"]), (0, 2, 1));
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(7)]
    fn move_up_preserves_contiguous_order_set(#[case] n: u32) {
        for i in 1..n {
            let entries: Vec<TimelineEntry> = (0..n)
                .map(|k| entry(&format!("e{k}"), EntryCategory::Internship, k))
                .collect();
            let target = format!("e{i}");
            let batch = plan_move(&entries, &target, MoveDirection::Up)
                .unwrap()
                .unwrap();
            let got = orders(&batch);

            let mut values: Vec<u32> = got.values().copied().collect();
            values.sort_unstable();
            assert_eq!(values, (0..n).collect::<Vec<_>>());

            let prev = format!("e{}", i - 1);
            assert_eq!(got[target.as_str()], i - 1);
            assert_eq!(got[prev.as_str()], i);
            for k in (0..n).filter(|&k| k != i && k != i - 1) {
                assert_eq!(got[format!("e{k}").as_str()], k);
            }
        }
    }

    #[test]
    fn partition_breaks_ties_by_creation_time() {
        let mut older = entry("older", EntryCategory::Work, 1);
        let mut newer = entry("newer", EntryCategory::Work, 1);
        older.created_at = Utc::now() - TimeDelta::hours(1);
        newer.created_at = Utc::now();
        let entries = vec![newer, older];

        let part = partition(&entries, EntryCategory::Work);
        assert_eq!(part[0].id, "older");
        assert_eq!(part[1].id, "newer");
    }

    #[test]
    fn compaction_only_touches_changed_rows() {
        let entries = vec![
            entry("A", EntryCategory::Work, 0),
            entry("B", EntryCategory::Work, 2),
            entry("C", EntryCategory::Work, 5),
            entry("E", EntryCategory::Education, 9),
        ];

        let batch = plan_compaction(&entries, EntryCategory::Work).unwrap();
        assert_eq!(
            batch.into_items(),
            vec![ReorderItem::new("B", 1), ReorderItem::new("C", 2)]
        );
    }

    #[test]
    fn compaction_of_contiguous_partition_is_none() {
        let entries = vec![
            entry("A", EntryCategory::Work, 0),
            entry("B", EntryCategory::Work, 1),
        ];
        assert!(is_contiguous(&entries, EntryCategory::Work));
        assert_eq!(plan_compaction(&entries, EntryCategory::Work), None);
        assert_eq!(plan_compaction(&entries, EntryCategory::Education), None);
    }
}
