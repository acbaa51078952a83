//! Bookmarks, grouped by category. The document is a map from category
//! name to an ordered list of bookmarks; four categories are seeded and
//! new ones appear when a bookmark is added under an unseen name.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::store::{DataStore, StoreError};

const COLLECTION: &str = "bookmarks";

/// Categories every fresh document starts with.
pub const SEED_CATEGORIES: [&str; 4] = ["youtube", "study", "fun", "projects"];

/// One bookmark: a link with a short glyph used as its icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub icon: String,
}

/// The whole bookmarks document.
pub type BookmarksByCategory = BTreeMap<String, Vec<Bookmark>>;

/// An empty document with the seed categories present.
pub fn seeded_categories() -> BookmarksByCategory {
    SEED_CATEGORIES
        .iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect()
}

/// Partial update for a bookmark.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}

/// Operations on the `bookmarks` collection. Update and delete are
/// keyed by the category the record currently lives in; there is no
/// cross-category search.
#[derive(Debug, Clone)]
pub struct Bookmarks {
    store: Arc<DataStore>,
}

impl Bookmarks {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// The whole document, seeded on first read.
    pub fn all(&self) -> Result<BookmarksByCategory, StoreError> {
        self.store.read(COLLECTION, seeded_categories())
    }

    /// Add a bookmark under a category, creating the category if it has
    /// never been seen.
    pub fn add(&self, title: &str, url: &str, icon: &str, category: &str) -> Result<Bookmark, StoreError> {
        let bookmark = Bookmark {
            id: generate_id(),
            title: title.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
        };
        self.store.modify(
            COLLECTION,
            seeded_categories(),
            |bookmarks: &mut BookmarksByCategory| {
                bookmarks
                    .entry(category.to_string())
                    .or_default()
                    .push(bookmark.clone());
                Ok(())
            },
        )?;
        Ok(bookmark)
    }

    /// Merge a patch into the bookmark with the given id inside the
    /// given category. An unknown category or id is `NotFound`.
    pub fn update(&self, id: &str, category: &str, patch: BookmarkPatch) -> Result<Bookmark, StoreError> {
        self.store.modify(
            COLLECTION,
            seeded_categories(),
            |bookmarks: &mut BookmarksByCategory| {
                let entries = bookmarks
                    .get_mut(category)
                    .ok_or_else(|| StoreError::NotFound(format!("bookmark category {}", category)))?;
                let bookmark = entries
                    .iter_mut()
                    .find(|b| b.id == id)
                    .ok_or_else(|| StoreError::NotFound(format!("bookmark {} in {}", id, category)))?;
                if let Some(title) = patch.title {
                    bookmark.title = title;
                }
                if let Some(url) = patch.url {
                    bookmark.url = url;
                }
                if let Some(icon) = patch.icon {
                    bookmark.icon = icon;
                }
                Ok(bookmark.clone())
            },
        )
    }

    /// Remove the bookmark with the given id from the given category.
    /// An unknown category is `NotFound`; an unknown id inside a known
    /// category is a no-op.
    pub fn delete(&self, id: &str, category: &str) -> Result<(), StoreError> {
        self.store.modify(
            COLLECTION,
            seeded_categories(),
            |bookmarks: &mut BookmarksByCategory| {
                let entries = bookmarks
                    .get_mut(category)
                    .ok_or_else(|| StoreError::NotFound(format!("bookmark category {}", category)))?;
                entries.retain(|b| b.id != id);
                Ok(())
            },
        )
    }

    /// Replace the whole document.
    pub fn replace(&self, bookmarks: &BookmarksByCategory) -> Result<(), StoreError> {
        self.store.write(COLLECTION, bookmarks)
    }
}
