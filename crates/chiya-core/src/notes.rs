//! Notes: titled text records with a pin flag and an edit timestamp.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::store::{DataStore, StoreError};

const COLLECTION: &str = "notes";

/// A note on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub last_edited: DateTime<Utc>,
}

/// Partial update for a note. Absent fields are left as they are;
/// `lastEdited` is refreshed on every update regardless.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_pinned: Option<bool>,
}

/// Operations on the `notes` collection.
#[derive(Debug, Clone)]
pub struct Notes {
    store: Arc<DataStore>,
}

impl Notes {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// All notes, in insertion order.
    pub fn list(&self) -> Result<Vec<Note>, StoreError> {
        self.store.read(COLLECTION, Vec::new())
    }

    /// Create a note. New notes start unpinned.
    pub fn add(&self, title: &str, content: &str) -> Result<Note, StoreError> {
        let note = Note {
            id: generate_id(),
            title: title.to_string(),
            content: content.to_string(),
            is_pinned: false,
            last_edited: Utc::now(),
        };
        self.store.modify(COLLECTION, Vec::new(), |notes: &mut Vec<Note>| {
            notes.push(note.clone());
            Ok(())
        })?;
        Ok(note)
    }

    /// Merge a patch into the note with the given id and refresh its
    /// edit timestamp. An unknown id leaves the collection untouched.
    pub fn update(&self, id: &str, patch: NotePatch) -> Result<Note, StoreError> {
        self.store.modify(COLLECTION, Vec::new(), |notes: &mut Vec<Note>| {
            let note = notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("note {}", id)))?;
            if let Some(title) = patch.title {
                note.title = title;
            }
            if let Some(content) = patch.content {
                note.content = content;
            }
            if let Some(pinned) = patch.is_pinned {
                note.is_pinned = pinned;
            }
            note.last_edited = Utc::now();
            Ok(note.clone())
        })
    }

    /// Remove the note with the given id. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.modify(COLLECTION, Vec::new(), |notes: &mut Vec<Note>| {
            notes.retain(|n| n.id != id);
            Ok(())
        })
    }

    /// Replace the whole collection.
    pub fn replace(&self, notes: &[Note]) -> Result<(), StoreError> {
        self.store.write(COLLECTION, &notes)
    }
}
