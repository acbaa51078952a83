//! HTTP endpoint handlers
//!
//! GET handlers return the full collection document; POST handlers on
//! the collection path persist a full replacement. The `/items` routes
//! carry the per-record operations the widgets use. Store faults are
//! logged here and surfaced to the client as a generic error object.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use chiya_core::{
    Bookmark, BookmarkPatch, BookmarksByCategory, Note, NotePatch, Preferences, Ritual,
    RitualPatch, Secret, SecretPatch, StoreError,
};

use crate::AppState;

type ErrorResponse = (StatusCode, Json<Value>);

fn fetch_failure(collection: &str, err: StoreError) -> ErrorResponse {
    tracing::error!("Failed to fetch {}: {}", collection, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("Failed to fetch {}", collection) })),
    )
}

fn save_failure(collection: &str, err: StoreError) -> ErrorResponse {
    tracing::error!("Failed to save {}: {}", collection, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("Failed to save {}", collection) })),
    )
}

/// Map a mutation fault: a missing target is the caller's 404, anything
/// else is a storage fault.
fn mutation_failure(kind: &str, collection: &str, err: StoreError) -> ErrorResponse {
    match err {
        StoreError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("{} not found", kind) })),
        ),
        other => save_failure(collection, other),
    }
}

fn saved() -> Json<Value> {
    Json(json!({ "success": true }))
}

// === Notes ===

pub async fn get_notes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Note>>, ErrorResponse> {
    state
        .notes
        .list()
        .map(Json)
        .map_err(|e| fetch_failure("notes", e))
}

pub async fn save_notes(
    State(state): State<Arc<AppState>>,
    Json(notes): Json<Vec<Note>>,
) -> Result<Json<Value>, ErrorResponse> {
    state
        .notes
        .replace(&notes)
        .map(|_| saved())
        .map_err(|e| save_failure("notes", e))
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

pub async fn create_note(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<Json<Note>, ErrorResponse> {
    state
        .notes
        .add(&request.title, &request.content)
        .map(Json)
        .map_err(|e| save_failure("notes", e))
}

pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<NotePatch>,
) -> Result<Json<Note>, ErrorResponse> {
    state
        .notes
        .update(&id, patch)
        .map(Json)
        .map_err(|e| mutation_failure("Note", "notes", e))
}

pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    state
        .notes
        .delete(&id)
        .map(|_| saved())
        .map_err(|e| save_failure("notes", e))
}

// === Daily rituals ===

pub async fn get_rituals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Ritual>>, ErrorResponse> {
    state
        .rituals
        .list()
        .map(Json)
        .map_err(|e| fetch_failure("rituals", e))
}

pub async fn save_rituals(
    State(state): State<Arc<AppState>>,
    Json(rituals): Json<Vec<Ritual>>,
) -> Result<Json<Value>, ErrorResponse> {
    state
        .rituals
        .replace(&rituals)
        .map(|_| saved())
        .map_err(|e| save_failure("rituals", e))
}

#[derive(Debug, Deserialize)]
pub struct CreateRitualRequest {
    pub text: String,
}

pub async fn create_ritual(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRitualRequest>,
) -> Result<Json<Ritual>, ErrorResponse> {
    state
        .rituals
        .add(&request.text)
        .map(Json)
        .map_err(|e| save_failure("rituals", e))
}

pub async fn update_ritual(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<RitualPatch>,
) -> Result<Json<Ritual>, ErrorResponse> {
    state
        .rituals
        .update(&id, patch)
        .map(Json)
        .map_err(|e| mutation_failure("Ritual", "rituals", e))
}

pub async fn delete_ritual(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    state
        .rituals
        .delete(&id)
        .map(|_| saved())
        .map_err(|e| save_failure("rituals", e))
}

// === Secret drawers ===

pub async fn get_secrets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Secret>>, ErrorResponse> {
    state
        .secrets
        .list()
        .map(Json)
        .map_err(|e| fetch_failure("secrets", e))
}

pub async fn save_secrets(
    State(state): State<Arc<AppState>>,
    Json(secrets): Json<Vec<Secret>>,
) -> Result<Json<Value>, ErrorResponse> {
    state
        .secrets
        .replace(&secrets)
        .map(|_| saved())
        .map_err(|e| save_failure("secrets", e))
}

#[derive(Debug, Deserialize)]
pub struct CreateSecretRequest {
    pub title: String,
    pub content: String,
}

pub async fn create_secret(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSecretRequest>,
) -> Result<Json<Secret>, ErrorResponse> {
    state
        .secrets
        .add(&request.title, &request.content)
        .map(Json)
        .map_err(|e| save_failure("secrets", e))
}

pub async fn update_secret(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<SecretPatch>,
) -> Result<Json<Secret>, ErrorResponse> {
    state
        .secrets
        .update(&id, patch)
        .map(Json)
        .map_err(|e| mutation_failure("Secret", "secrets", e))
}

pub async fn delete_secret(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    state
        .secrets
        .delete(&id)
        .map(|_| saved())
        .map_err(|e| save_failure("secrets", e))
}

// === Bookmarks ===

pub async fn get_bookmarks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BookmarksByCategory>, ErrorResponse> {
    state
        .bookmarks
        .all()
        .map(Json)
        .map_err(|e| fetch_failure("bookmarks", e))
}

pub async fn save_bookmarks(
    State(state): State<Arc<AppState>>,
    Json(bookmarks): Json<BookmarksByCategory>,
) -> Result<Json<Value>, ErrorResponse> {
    state
        .bookmarks
        .replace(&bookmarks)
        .map(|_| saved())
        .map_err(|e| save_failure("bookmarks", e))
}

#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    pub title: String,
    pub url: String,
    pub icon: String,
    pub category: String,
}

pub async fn create_bookmark(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBookmarkRequest>,
) -> Result<Json<Bookmark>, ErrorResponse> {
    state
        .bookmarks
        .add(&request.title, &request.url, &request.icon, &request.category)
        .map(Json)
        .map_err(|e| save_failure("bookmarks", e))
}

/// Update carries the category the record currently lives in; there is
/// no cross-category search.
#[derive(Debug, Deserialize)]
pub struct UpdateBookmarkRequest {
    pub category: String,
    #[serde(flatten)]
    pub patch: BookmarkPatch,
}

pub async fn update_bookmark(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBookmarkRequest>,
) -> Result<Json<Bookmark>, ErrorResponse> {
    state
        .bookmarks
        .update(&id, &request.category, request.patch)
        .map(Json)
        .map_err(|e| mutation_failure("Bookmark", "bookmarks", e))
}

#[derive(Debug, Deserialize)]
pub struct DeleteBookmarkRequest {
    pub category: String,
}

pub async fn delete_bookmark(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<DeleteBookmarkRequest>,
) -> Result<Json<Value>, ErrorResponse> {
    state
        .bookmarks
        .delete(&id, &request.category)
        .map(|_| saved())
        .map_err(|e| mutation_failure("Bookmark", "bookmarks", e))
}

// === Preferences ===

pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Preferences>, ErrorResponse> {
    state
        .prefs
        .get()
        .map(Json)
        .map_err(|e| fetch_failure("preferences", e))
}

pub async fn save_preferences(
    State(state): State<Arc<AppState>>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<Value>, ErrorResponse> {
    state
        .prefs
        .set(&preferences)
        .map(|_| saved())
        .map_err(|e| save_failure("preferences", e))
}
