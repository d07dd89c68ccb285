//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use folio_core::audit_detail::{DeletedDetail, OrderChangedDetail};
use folio_core::entities::*;
use folio_core::enums::*;
use folio_core::inputs::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    user_roundtrip,
    User,
    User {
        id: "usr-a3f8b2c1".into(),
        username: "somchai".into(),
        email: "somchai@example.com".into(),
        display_name: Some("Somchai P.".into()),
        bio: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    about_roundtrip,
    About,
    About {
        user_id: "usr-a3f8b2c1".into(),
        content: Some("Backend developer based in Chiang Mai.".into()),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    timeline_entry_roundtrip,
    TimelineEntry,
    TimelineEntry {
        id: "tle-0badc0de".into(),
        user_id: "usr-a3f8b2c1".into(),
        category: EntryCategory::Internship,
        institution: "Acme Corp".into(),
        title: "Backend Intern".into(),
        field: Some("Software".into()),
        period: None,
        start_date: NaiveDate::from_ymd_opt(2023, 6, 1),
        end_date: NaiveDate::from_ymd_opt(2023, 8, 31),
        location: Some("Bangkok".into()),
        description: None,
        gpa: None,
        skills: Some("Rust, SQL".into()),
        order: 2,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    portfolio_item_roundtrip,
    PortfolioItem,
    PortfolioItem {
        id: "pfl-12345678".into(),
        user_id: "usr-a3f8b2c1".into(),
        title: "Compiler project".into(),
        description: Some("A toy compiler".into()),
        link: Some("https://example.com".into()),
        image_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    contact_message_roundtrip,
    ContactMessage,
    ContactMessage {
        id: "msg-87654321".into(),
        user_id: "usr-a3f8b2c1".into(),
        sender_name: "Recruiter".into(),
        sender_email: "hr@example.com".into(),
        message: "Let's talk".into(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    audit_entry_roundtrip,
    AuditEntry,
    AuditEntry {
        id: "aud-deadbeef".into(),
        user_id: Some("usr-a3f8b2c1".into()),
        entity_type: EntityType::TimelineEntry,
        entity_id: "tle-0badc0de".into(),
        action: AuditAction::Reordered,
        detail: Some(serde_json::json!({"category": "WORK", "from": 2, "to": 1})),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    order_changed_detail_roundtrip,
    OrderChangedDetail,
    OrderChangedDetail {
        category: EntryCategory::Work,
        from: 2,
        to: 1,
    }
);

roundtrip_and_validate!(
    deleted_detail_roundtrip,
    DeletedDetail,
    DeletedDetail {
        title: "B.Sc.".into(),
    }
);

roundtrip_and_validate!(
    new_timeline_entry_roundtrip,
    NewTimelineEntry,
    NewTimelineEntry {
        order: Some(4),
        ..NewTimelineEntry::new(EntryCategory::Certificate, "AWS", "Solutions Architect")
    }
);

roundtrip_and_validate!(
    new_user_roundtrip,
    NewUser,
    NewUser {
        username: "somchai".into(),
        email: "somchai@example.com".into(),
        display_name: None,
        bio: Some("Hello".into()),
    }
);

#[test]
fn legacy_category_rows_deserialize_to_canonical() {
    let json = serde_json::json!({
        "id": "tle-0badc0de",
        "user_id": "usr-a3f8b2c1",
        "category": "education",
        "institution": "KMUTT",
        "title": "B.Eng.",
        "field": null,
        "period": "2016 - 2020",
        "start_date": null,
        "end_date": null,
        "location": null,
        "description": null,
        "gpa": "3.50",
        "skills": null,
        "order": 0,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    });
    let entry: TimelineEntry = serde_json::from_value(json).unwrap();
    assert_eq!(entry.category, EntryCategory::Education);
    assert_eq!(serde_json::to_value(&entry).unwrap()["category"], "EDUCATION");
}
