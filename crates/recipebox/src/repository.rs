//! Recipe repository.
//!
//! List, add, look up and delete recipes on top of a [`RecipeStore`]. Every
//! operation loads the full collection; mutating operations save it back.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::recipe::{Recipe, RecipeDraft};
use crate::storage::{KeyValueStore, RecipeStore};

/// Source of the current time for id allocation.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Allocate an id for a new recipe.
///
/// Ids are time-derived but strictly greater than every id already in the
/// collection, so two recipes created within the same millisecond (or after
/// the clock stepped backwards) still get distinct ids.
///
/// # Errors
///
/// Returns [`Error::IdSpaceExhausted`] if the collection already holds
/// `i64::MAX`.
pub fn next_id(now_millis: i64, existing: &[Recipe]) -> Result<i64> {
    let Some(max_id) = existing.iter().map(|r| r.id).max() else {
        return Ok(now_millis);
    };
    let floor = max_id
        .checked_add(1)
        .ok_or(Error::IdSpaceExhausted { max_id })?;
    Ok(now_millis.max(floor))
}

/// CRUD over the recipe collection.
#[derive(Debug)]
pub struct RecipeRepository<S, C = SystemClock> {
    store: RecipeStore<S>,
    clock: C,
}

impl<S: KeyValueStore> RecipeRepository<S, SystemClock> {
    /// Create a repository using the wall clock for ids.
    #[must_use]
    pub fn new(store: RecipeStore<S>) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> RecipeRepository<S, C> {
    /// Create a repository with a custom clock.
    #[must_use]
    pub fn with_clock(store: RecipeStore<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// The underlying collection store.
    #[must_use]
    pub fn store(&self) -> &RecipeStore<S> {
        &self.store
    }

    /// All recipes, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Recipe> {
        self.store.load()
    }

    /// Persist a new recipe and return it with its assigned id.
    ///
    /// The draft is not re-validated.
    ///
    /// # Errors
    ///
    /// Returns an error if no unused id is left or the collection cannot be
    /// saved.
    pub fn add(&self, draft: RecipeDraft) -> Result<Recipe> {
        let mut recipes = self.store.load();
        let id = next_id(self.clock.now_millis(), &recipes)?;
        let recipe = Recipe::from_draft(id, draft);

        recipes.push(recipe.clone());
        self.store.save(&recipes)?;

        info!(id, name = %recipe.name, "Added recipe");
        Ok(recipe)
    }

    /// Look up a recipe by id.
    #[must_use]
    pub fn find_by_id(&self, id: i64) -> Option<Recipe> {
        self.store.load().into_iter().find(|r| r.id == id)
    }

    /// Delete the recipe with the given id.
    ///
    /// Returns whether a recipe was removed. An unknown id is not an error
    /// and leaves the stored blob untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn delete_by_id(&self, id: i64) -> Result<bool> {
        let mut recipes = self.store.load();
        let before = recipes.len();
        recipes.retain(|r| r.id != id);

        if recipes.len() == before {
            debug!(id, "Delete requested for unknown recipe, ignoring");
            return Ok(false);
        }

        self.store.save(&recipes)?;
        info!(id, "Deleted recipe");
        Ok(true)
    }
}
