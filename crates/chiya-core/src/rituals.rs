//! Daily rituals: the checklist widget. Insertion order is display order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::store::{DataStore, StoreError};

const COLLECTION: &str = "rituals";

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ritual {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Partial update for a ritual.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RitualPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// Operations on the `rituals` collection.
#[derive(Debug, Clone)]
pub struct Rituals {
    store: Arc<DataStore>,
}

impl Rituals {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Ritual>, StoreError> {
        self.store.read(COLLECTION, Vec::new())
    }

    /// Create a ritual. New rituals start uncompleted.
    pub fn add(&self, text: &str) -> Result<Ritual, StoreError> {
        let ritual = Ritual {
            id: generate_id(),
            text: text.to_string(),
            completed: false,
        };
        self.store.modify(COLLECTION, Vec::new(), |rituals: &mut Vec<Ritual>| {
            rituals.push(ritual.clone());
            Ok(())
        })?;
        Ok(ritual)
    }

    pub fn update(&self, id: &str, patch: RitualPatch) -> Result<Ritual, StoreError> {
        self.store.modify(COLLECTION, Vec::new(), |rituals: &mut Vec<Ritual>| {
            let ritual = rituals
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("ritual {}", id)))?;
            if let Some(text) = patch.text {
                ritual.text = text;
            }
            if let Some(completed) = patch.completed {
                ritual.completed = completed;
            }
            Ok(ritual.clone())
        })
    }

    /// Remove the ritual with the given id. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.modify(COLLECTION, Vec::new(), |rituals: &mut Vec<Ritual>| {
            rituals.retain(|r| r.id != id);
            Ok(())
        })
    }

    /// Replace the whole collection.
    pub fn replace(&self, rituals: &[Ritual]) -> Result<(), StoreError> {
        self.store.write(COLLECTION, &rituals)
    }
}
