//! chiya-core: collection records and the JSON document store for the
//! Chiya Bari dashboard.
//!
//! Every widget persists one flat collection as one pretty-printed JSON
//! document under the data directory (`notes.json`, `rituals.json`,
//! `secrets.json`, `bookmarks.json`, `preferences.json`). Operations are
//! whole-document read-modify-write cycles guarded by a per-collection
//! mutex, so collections are expected to stay small.

pub mod store;
pub mod id;
pub mod notes;
pub mod rituals;
pub mod secrets;
pub mod bookmarks;
pub mod prefs;

pub use store::{DataStore, StoreError};
pub use id::generate_id;
pub use notes::*;
pub use rituals::*;
pub use secrets::*;
pub use bookmarks::*;
pub use prefs::*;
