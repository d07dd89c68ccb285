//! End-to-end tests of the HTTP surface against an in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use folio_config::FolioConfig;
use folio_db::service::FolioService;
use folio_server::build_router;
use folio_server::extract::CALLER_HEADER;
use folio_server::state::AppState;

async fn app() -> Router {
    let service = FolioService::new_local(":memory:").await.unwrap();
    build_router(AppState::new(service, 50), &FolioConfig::default())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    caller: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        req = req.header(CALLER_HEADER, caller);
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        None,
        Some(json!({"username": username, "email": format!("{username}@example.com")})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn add_entry(app: &Router, user_id: &str, category: &str, title: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/educations",
        Some(user_id),
        Some(json!({"type": category, "institution": "Acme", "degree": title})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

/// `(title, order)` of one category, as served publicly.
async fn orders(app: &Router, handle: &str, category: &str) -> Vec<(String, u64)> {
    let (status, body) = send(
        app,
        Method::GET,
        &format!("/users/{handle}/educations"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body.as_array()
        .unwrap()
        .iter()
        .filter(|e| e["category"] == category)
        .map(|e| {
            (
                e["title"].as_str().unwrap().to_string(),
                e["order"].as_u64().unwrap(),
            )
        })
        .collect()
}

fn pairs(items: &[(&str, u64)]) -> Vec<(String, u64)> {
    items.iter().map(|(t, o)| ((*t).to_string(), *o)).collect()
}

#[tokio::test]
async fn health_is_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn reorder_applies_submitted_orders() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    let a = add_entry(&app, &alice, "WORK", "A").await;
    let b = add_entry(&app, &alice, "WORK", "B").await;
    let c = add_entry(&app, &alice, "WORK", "C").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/educations/reorder",
        Some(&alice),
        Some(json!({"items": [
            {"id": a, "order": 0},
            {"id": b, "order": 2},
            {"id": c, "order": 1}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["A", "C", "B"]);

    assert_eq!(
        orders(&app, "alice", "WORK").await,
        pairs(&[("A", 0), ("C", 1), ("B", 2)])
    );
}

#[tokio::test]
async fn reorder_coerces_numeric_strings() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    let a = add_entry(&app, &alice, "WORK", "A").await;
    let b = add_entry(&app, &alice, "WORK", "B").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/educations/reorder",
        Some(&alice),
        Some(json!({"items": [{"id": a, "order": "1"}, {"id": b, "order": "0"}]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        orders(&app, "alice", "WORK").await,
        pairs(&[("B", 0), ("A", 1)])
    );
}

#[tokio::test]
async fn malformed_batches_are_rejected() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    let a = add_entry(&app, &alice, "WORK", "A").await;

    for items in [
        json!([]),
        json!([{"id": a, "order": -1}]),
        json!([{"id": a, "order": "first"}]),
        json!([{"id": a, "order": 0}, {"id": a, "order": 1}]),
    ] {
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/educations/reorder",
            Some(&alice),
            Some(json!({ "items": items })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{items}: {body}");
        assert_eq!(body["error"], "validation");
    }
}

#[tokio::test]
async fn foreign_entry_rejects_batch_without_changes() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    let mallory = register(&app, "mallory").await;
    let a = add_entry(&app, &alice, "WORK", "A").await;
    let b = add_entry(&app, &alice, "WORK", "B").await;
    let m = add_entry(&app, &mallory, "WORK", "M").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/educations/reorder",
        Some(&alice),
        Some(json!({"items": [
            {"id": a, "order": 1},
            {"id": b, "order": 0},
            {"id": m, "order": 5}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    assert_eq!(
        orders(&app, "alice", "WORK").await,
        pairs(&[("A", 0), ("B", 1)])
    );
    assert_eq!(orders(&app, "mallory", "WORK").await, pairs(&[("M", 0)]));
}

#[tokio::test]
async fn unknown_entry_is_not_found() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/educations/reorder",
        Some(&alice),
        Some(json!({"items": [{"id": "tle-00000000", "order": 0}]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn writes_require_caller() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/educations/reorder",
        None,
        Some(json!({"items": [{"id": "tle-00000000", "order": 0}]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn move_endpoint_stays_within_category() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    add_entry(&app, &alice, "education", "E0").await;
    let e1 = add_entry(&app, &alice, "EDUCATION", "E1").await;
    add_entry(&app, &alice, "WORK", "W0").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/educations/{e1}/move"),
        Some(&alice),
        Some(json!({"direction": "up"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    assert_eq!(
        orders(&app, "alice", "EDUCATION").await,
        pairs(&[("E1", 0), ("E0", 1)])
    );
    assert_eq!(orders(&app, "alice", "WORK").await, pairs(&[("W0", 0)]));
}

#[tokio::test]
async fn delete_compacts_category() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    let a = add_entry(&app, &alice, "CERTIFICATE", "A").await;
    add_entry(&app, &alice, "CERTIFICATE", "B").await;
    add_entry(&app, &alice, "CERTIFICATE", "C").await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/educations/{a}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        orders(&app, "alice", "CERTIFICATE").await,
        pairs(&[("B", 0), ("C", 1)])
    );
}

#[tokio::test]
async fn patch_entry_updates_fields() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    let a = add_entry(&app, &alice, "INTERNSHIP", "Intern").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/educations/{a}"),
        Some(&alice),
        Some(json!({"title": "Senior Intern", "gpa": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["title"], "Senior Intern");
    assert_eq!(body["category"], "INTERNSHIP");
}

#[tokio::test]
async fn users_and_profiles() {
    let app = app().await;
    let alice = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        None,
        Some(json!({"username": "alice", "email": "other@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, _) = send(&app, Method::GET, "/users/nobody", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/profile",
        Some(&alice),
        Some(json!({"display_name": "Alice A."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = send(&app, Method::GET, "/users/alice@example.com", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "Alice A.");
}

#[tokio::test]
async fn portfolio_and_contact_flow() {
    let app = app().await;
    let alice = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/portfolio",
        Some(&alice),
        Some(json!({"title": "Compiler", "link": "https://example.com/compiler"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = send(&app, Method::GET, "/users/alice/portfolio", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/alice/contact",
        None,
        Some(json!({
            "sender_name": "Bob",
            "sender_email": "bob@example.com",
            "message": "Nice work"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = send(&app, Method::GET, "/contact?limit=10", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["message"], "Nice work");
}

#[tokio::test]
async fn cors_preflight_allows_default_frontend() {
    let app = app().await;
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/educations/reorder")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}

#[tokio::test]
async fn compact_closes_gaps_and_is_audited() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    let a = add_entry(&app, &alice, "WORK", "A").await;
    let b = add_entry(&app, &alice, "WORK", "B").await;
    let c = add_entry(&app, &alice, "WORK", "C").await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/educations/reorder",
        Some(&alice),
        Some(json!({"items": [
            {"id": a, "order": 0},
            {"id": b, "order": 5},
            {"id": c, "order": 9},
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/educations/compact",
        Some(&alice),
        Some(json!({"category": "WORK"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["changed"], 2);
    assert_eq!(
        orders(&app, "alice", "WORK").await,
        pairs(&[("A", 0), ("B", 1), ("C", 2)])
    );

    let (status, body) = send(&app, Method::GET, "/audit?limit=100", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions.iter().filter(|a| **a == "compacted").count(), 2);
    assert_eq!(actions.iter().filter(|a| **a == "reordered").count(), 2);
}

#[tokio::test]
async fn audit_requires_caller() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/audit", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn about_section_flow() {
    let app = app().await;
    let alice = register(&app, "alice").await;

    let (status, body) = send(&app, Method::GET, "/users/alice/about", None, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user_id"], alice.as_str());
    assert_eq!(body["content"], Value::Null);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/about",
        Some(&alice),
        Some(json!({"content": "I build backends."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["content"], "I build backends.");

    let (_, body) = send(&app, Method::GET, "/users/alice/about", None, None).await;
    assert_eq!(body["content"], "I build backends.");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/about",
        None,
        Some(json!({"content": "anonymous"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, "/users/nobody/about", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn bad_query_string_gets_json_error() {
    let app = app().await;
    let alice = register(&app, "alice").await;

    for uri in ["/contact?limit=abc", "/audit?limit=-1"] {
        let (status, body) = send(&app, Method::GET, uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "validation", "{uri}");
        assert!(body["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn bad_path_parameter_gets_json_error() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/users/%FF/educations", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn oversized_reorder_batch_is_rejected() {
    let app = app().await;
    let alice = register(&app, "alice").await;
    let items: Vec<Value> = (0..=folio_core::reorder::MAX_BATCH_ITEMS)
        .map(|i| json!({"id": i, "order": 0}))
        .collect();

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/educations/reorder",
        Some(&alice),
        Some(json!({ "items": items })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["error"], "validation");
}
