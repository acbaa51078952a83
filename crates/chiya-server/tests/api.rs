//! Router-level tests: each request is fired through the full router
//! with `tower::ServiceExt::oneshot` against a store in a temp dir.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use chiya_core::DataStore;
use chiya_server::{create_router, AppState};

fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(DataStore::new(dir.path()));
    let app = create_router(Arc::new(AppState::new(store)));
    (dir, app)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn notes_start_empty() {
    let (_dir, app) = test_app();
    let response = app.oneshot(get("/api/notes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn note_create_update_delete_through_the_api() {
    let (_dir, app) = test_app();

    let response = app
        .clone()
        .oneshot(with_json(
            "POST",
            "/api/notes/items",
            json!({ "title": "Tea notes", "content": "Oolong is best brewed at 85°C" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let note = json_body(response).await;
    assert_eq!(note["title"], "Tea notes");
    assert_eq!(note["isPinned"], json!(false));
    let id = note["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(with_json(
            "PATCH",
            &format!("/api/notes/items/{}", id),
            json!({ "isPinned": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["isPinned"], json!(true));
    let edited_at = |value: &Value| {
        chrono::DateTime::parse_from_rfc3339(value["lastEdited"].as_str().unwrap()).unwrap()
    };
    assert!(edited_at(&updated) > edited_at(&note));

    let response = app
        .clone()
        .oneshot(with_json("DELETE", &format!("/api/notes/items/{}", id), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "success": true }));

    let response = app.oneshot(get("/api/notes")).await.unwrap();
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn updating_an_unknown_note_is_404_with_an_error_object() {
    let (_dir, app) = test_app();
    let response = app
        .oneshot(with_json(
            "PATCH",
            "/api/notes/items/nonexistent-id",
            json!({ "isPinned": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Note not found" }));
}

#[tokio::test]
async fn bulk_replace_round_trips() {
    let (_dir, app) = test_app();

    let document = json!([
        { "id": "1", "text": "morning chiya", "completed": false },
        { "id": "2", "text": "water the plants", "completed": true }
    ]);
    let response = app
        .clone()
        .oneshot(with_json("POST", "/api/rituals", document.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "success": true }));

    let response = app.oneshot(get("/api/rituals")).await.unwrap();
    assert_eq!(json_body(response).await, document);
}

#[tokio::test]
async fn bookmarks_seed_their_categories() {
    let (_dir, app) = test_app();
    let response = app.oneshot(get("/api/bookmarks")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let document = json_body(response).await;
    for category in ["youtube", "study", "fun", "projects"] {
        assert_eq!(document[category], json!([]), "category {}", category);
    }
}

#[tokio::test]
async fn bookmark_mutations_are_category_scoped() {
    let (_dir, app) = test_app();

    let response = app
        .clone()
        .oneshot(with_json(
            "POST",
            "/api/bookmarks/items",
            json!({
                "title": "nepali grammar",
                "url": "https://example.com/grammar",
                "icon": "📚",
                "category": "study"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bookmark = json_body(response).await;
    let id = bookmark["id"].as_str().unwrap().to_string();

    // Wrong category: 404, nothing moved.
    let response = app
        .clone()
        .oneshot(with_json(
            "PATCH",
            &format!("/api/bookmarks/items/{}", id),
            json!({ "category": "fun", "title": "renamed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "Bookmark not found" }));

    // Right category: the patch lands.
    let response = app
        .clone()
        .oneshot(with_json(
            "PATCH",
            &format!("/api/bookmarks/items/{}", id),
            json!({ "category": "study", "title": "renamed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "renamed");

    let response = app
        .clone()
        .oneshot(with_json(
            "DELETE",
            &format!("/api/bookmarks/items/{}", id),
            json!({ "category": "study" }),
        ))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!({ "success": true }));

    let response = app.oneshot(get("/api/bookmarks")).await.unwrap();
    assert_eq!(json_body(response).await["study"], json!([]));
}

#[tokio::test]
async fn ritual_checklist_through_the_api() {
    let (_dir, app) = test_app();

    let response = app
        .clone()
        .oneshot(with_json("POST", "/api/rituals/items", json!({ "text": "morning chiya" })))
        .await
        .unwrap();
    let ritual = json_body(response).await;
    assert_eq!(ritual["completed"], json!(false));
    let id = ritual["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(with_json(
            "PATCH",
            &format!("/api/rituals/items/{}", id),
            json!({ "completed": true }),
        ))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["completed"], json!(true));
}

#[tokio::test]
async fn secrets_keep_content_while_locked() {
    let (_dir, app) = test_app();

    let response = app
        .clone()
        .oneshot(with_json(
            "POST",
            "/api/secrets/items",
            json!({ "title": "journal", "content": "dear diary" }),
        ))
        .await
        .unwrap();
    let secret = json_body(response).await;
    let id = secret["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(with_json(
            "PATCH",
            &format!("/api/secrets/items/{}", id),
            json!({ "isLocked": true }),
        ))
        .await
        .unwrap();
    let locked = json_body(response).await;
    assert_eq!(locked["isLocked"], json!(true));
    assert_eq!(locked["content"], "dear diary");
}

#[tokio::test]
async fn preferences_default_and_round_trip() {
    let (_dir, app) = test_app();

    let response = app.clone().oneshot(get("/api/preferences")).await.unwrap();
    assert_eq!(json_body(response).await, json!({ "wallpaper": "tea-garden-1" }));

    let response = app
        .clone()
        .oneshot(with_json("POST", "/api/preferences", json!({ "wallpaper": "tea-garden-3" })))
        .await
        .unwrap();
    assert_eq!(json_body(response).await, json!({ "success": true }));

    let response = app.oneshot(get("/api/preferences")).await.unwrap();
    assert_eq!(json_body(response).await, json!({ "wallpaper": "tea-garden-3" }));
}
