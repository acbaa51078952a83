//! Chiya Bari server: HTTP API over the dashboard collections.
//!
//! Each collection gets a bulk pair (GET the whole document, POST a
//! full replacement) plus per-record action routes under `/items`.

pub mod http;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use chiya_core::{Bookmarks, DataStore, Notes, Prefs, Rituals, Secrets};

/// Shared application state: one operations handle per collection,
/// all over the same store.
pub struct AppState {
    pub notes: Notes,
    pub rituals: Rituals,
    pub secrets: Secrets,
    pub bookmarks: Bookmarks,
    pub prefs: Prefs,
}

impl AppState {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self {
            notes: Notes::new(store.clone()),
            rituals: Rituals::new(store.clone()),
            secrets: Secrets::new(store.clone()),
            bookmarks: Bookmarks::new(store.clone()),
            prefs: Prefs::new(store),
        }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Notes
        .route("/api/notes", get(http::get_notes))
        .route("/api/notes", post(http::save_notes))
        .route("/api/notes/items", post(http::create_note))
        .route("/api/notes/items/{id}", patch(http::update_note))
        .route("/api/notes/items/{id}", delete(http::delete_note))
        // Daily rituals
        .route("/api/rituals", get(http::get_rituals))
        .route("/api/rituals", post(http::save_rituals))
        .route("/api/rituals/items", post(http::create_ritual))
        .route("/api/rituals/items/{id}", patch(http::update_ritual))
        .route("/api/rituals/items/{id}", delete(http::delete_ritual))
        // Secret drawers
        .route("/api/secrets", get(http::get_secrets))
        .route("/api/secrets", post(http::save_secrets))
        .route("/api/secrets/items", post(http::create_secret))
        .route("/api/secrets/items/{id}", patch(http::update_secret))
        .route("/api/secrets/items/{id}", delete(http::delete_secret))
        // Bookmarks (category carried in the request body)
        .route("/api/bookmarks", get(http::get_bookmarks))
        .route("/api/bookmarks", post(http::save_bookmarks))
        .route("/api/bookmarks/items", post(http::create_bookmark))
        .route("/api/bookmarks/items/{id}", patch(http::update_bookmark))
        .route("/api/bookmarks/items/{id}", delete(http::delete_bookmark))
        // Preferences
        .route("/api/preferences", get(http::get_preferences))
        .route("/api/preferences", post(http::save_preferences))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Chiya Bari server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
