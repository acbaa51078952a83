//! Chiya Bari Server Binary
//!
//! Standalone server for the dashboard API.

use std::sync::Arc;

use chiya_core::DataStore;
use chiya_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let store = Arc::new(DataStore::at_default_location());
    tracing::info!("Data directory: {}", store.root().display());

    let state = Arc::new(AppState::new(store));
    let addr = std::env::var("CHIYABARI_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    serve(&addr, state).await
}
