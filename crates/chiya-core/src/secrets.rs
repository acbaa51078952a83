//! Secret drawers: lockable text records. The lock is a display gate
//! on the client, not encryption; content is stored in the clear.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::store::{DataStore, StoreError};

const COLLECTION: &str = "secrets";

/// One drawer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub id: String,
    pub title: String,
    pub content: String,
    pub is_locked: bool,
}

/// Partial update for a secret.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecretPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_locked: Option<bool>,
}

/// Operations on the `secrets` collection.
#[derive(Debug, Clone)]
pub struct Secrets {
    store: Arc<DataStore>,
}

impl Secrets {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Secret>, StoreError> {
        self.store.read(COLLECTION, Vec::new())
    }

    /// Create a drawer. New drawers start unlocked.
    pub fn add(&self, title: &str, content: &str) -> Result<Secret, StoreError> {
        let secret = Secret {
            id: generate_id(),
            title: title.to_string(),
            content: content.to_string(),
            is_locked: false,
        };
        self.store.modify(COLLECTION, Vec::new(), |secrets: &mut Vec<Secret>| {
            secrets.push(secret.clone());
            Ok(())
        })?;
        Ok(secret)
    }

    pub fn update(&self, id: &str, patch: SecretPatch) -> Result<Secret, StoreError> {
        self.store.modify(COLLECTION, Vec::new(), |secrets: &mut Vec<Secret>| {
            let secret = secrets
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("secret {}", id)))?;
            if let Some(title) = patch.title {
                secret.title = title;
            }
            if let Some(content) = patch.content {
                secret.content = content;
            }
            if let Some(locked) = patch.is_locked {
                secret.is_locked = locked;
            }
            Ok(secret.clone())
        })
    }

    /// Remove the drawer with the given id. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.modify(COLLECTION, Vec::new(), |secrets: &mut Vec<Secret>| {
            secrets.retain(|s| s.id != id);
            Ok(())
        })
    }

    /// Replace the whole collection.
    pub fn replace(&self, secrets: &[Secret]) -> Result<(), StoreError> {
        self.store.write(COLLECTION, &secrets)
    }
}
