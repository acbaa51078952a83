//! Dashboard preferences. Currently just the wallpaper choice, which
//! the web client previously kept in browser local storage.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::{DataStore, StoreError};

const COLLECTION: &str = "preferences";

/// Persisted dashboard preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub wallpaper: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            wallpaper: "tea-garden-1".to_string(),
        }
    }
}

/// Operations on the `preferences` document.
#[derive(Debug, Clone)]
pub struct Prefs {
    store: Arc<DataStore>,
}

impl Prefs {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<Preferences, StoreError> {
        self.store.read(COLLECTION, Preferences::default())
    }

    pub fn set(&self, preferences: &Preferences) -> Result<(), StoreError> {
        self.store.write(COLLECTION, preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_to_first_wallpaper_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let prefs = Prefs::new(Arc::new(DataStore::new(dir.path())));

        assert_eq!(prefs.get().unwrap().wallpaper, "tea-garden-1");

        prefs
            .set(&Preferences {
                wallpaper: "tea-garden-3".to_string(),
            })
            .unwrap();
        assert_eq!(prefs.get().unwrap().wallpaper, "tea-garden-3");
    }
}
