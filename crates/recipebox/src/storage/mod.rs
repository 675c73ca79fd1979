//! Storage layer for recipebox.
//!
//! Recipes live as one JSON blob under a single key of a string key-value
//! store, the same shape a browser's local storage gives a web page. Every
//! read loads the whole collection and every write replaces it.
//!
//! - [`KeyValueStore`] is the slot-level interface.
//! - [`SqliteStore`] persists slots in a local `SQLite` file.
//! - [`MemoryStore`] keeps slots in process memory.
//! - [`RecipeStore`] reads and writes the recipe collection blob.

mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

use tracing::{debug, warn};

use crate::error::Result;
use crate::recipe::Recipe;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StoreStats};

/// Default slot holding the recipe collection.
pub const DEFAULT_RECIPES_KEY: &str = "recipes";

/// A string key-value store.
///
/// Writes replace the whole value under a key. There is no locking: with
/// more than one writer, the last write wins.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` from the store. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Reads and writes the full recipe collection as one serialized blob.
#[derive(Debug)]
pub struct RecipeStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> RecipeStore<S> {
    /// Use the default `recipes` slot of `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_RECIPES_KEY)
    }

    /// Use a custom slot of `store`.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The slot this collection lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying key-value store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the collection.
    ///
    /// Never fails: a missing slot, an unreadable store, or a blob that does
    /// not parse all yield an empty collection.
    #[must_use]
    pub fn load(&self) -> Vec<Recipe> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No recipe collection stored yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read recipe collection, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Recipe>>(&raw) {
            Ok(recipes) => {
                debug!(key = %self.key, count = recipes.len(), "Loaded recipe collection");
                recipes
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored recipe collection is unparseable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace the stored collection with `recipes`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, recipes: &[Recipe]) -> Result<()> {
        let raw = serde_json::to_string(recipes)?;
        self.store.set_item(&self.key, &raw)?;
        debug!(key = %self.key, count = recipes.len(), bytes = raw.len(), "Saved recipe collection");
        Ok(())
    }

    /// Remove the stored collection entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn clear(&self) -> Result<()> {
        self.store.remove_item(&self.key)
    }
}
