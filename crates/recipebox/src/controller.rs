//! Catalog front-end logic.
//!
//! [`Catalog`] ties validation, persistence and rendering together the way a
//! user interface drives them: submit a form, show the listing, open a
//! recipe, confirm and perform a delete. The delete flow passes the target id
//! through an explicit [`DeleteConfirmation`] value instead of remembering it
//! between calls.

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::recipe::Recipe;
use crate::render::Renderer;
use crate::repository::{Clock, RecipeRepository, SystemClock};
use crate::storage::KeyValueStore;
use crate::validate::{RecipeForm, Validator};

/// Transient notification shown after a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A recipe was saved.
    RecipeAdded,
    /// A recipe was removed.
    RecipeDeleted,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipeAdded => f.write_str("Recipe added successfully!"),
            Self::RecipeDeleted => f.write_str("Recipe deleted successfully!"),
        }
    }
}

/// A pending delete, waiting for the user to confirm.
///
/// Only [`Catalog::request_delete`] creates one, and only for a recipe that
/// existed at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    id: i64,
    name: String,
}

impl DeleteConfirmation {
    /// Id of the recipe to delete.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Name of the recipe to delete, for the confirmation prompt.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The recipe catalog as seen by a user interface.
#[derive(Debug)]
pub struct Catalog<S, C = SystemClock> {
    repository: RecipeRepository<S, C>,
    validator: Validator,
    renderer: Renderer,
}

impl<S: KeyValueStore, C: Clock> Catalog<S, C> {
    /// Assemble a catalog from its parts.
    #[must_use]
    pub fn new(repository: RecipeRepository<S, C>, validator: Validator, renderer: Renderer) -> Self {
        Self {
            repository,
            validator,
            renderer,
        }
    }

    /// The underlying repository.
    #[must_use]
    pub fn repository(&self) -> &RecipeRepository<S, C> {
        &self.repository
    }

    /// The renderer used for markup.
    #[must_use]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Validate and save a submitted form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] with every failed field if the
    /// form is incomplete (nothing is saved), or a storage error if the
    /// collection cannot be written.
    pub fn submit(&self, form: &RecipeForm) -> Result<(Recipe, Notice)> {
        let draft = self.validator.validate(form)?;
        let recipe = self.repository.add(draft)?;
        Ok((recipe, Notice::RecipeAdded))
    }

    /// All recipes in insertion order.
    #[must_use]
    pub fn recipes(&self) -> Vec<Recipe> {
        self.repository.list()
    }

    /// Listing markup: one card per recipe, or the empty state.
    #[must_use]
    pub fn listing(&self) -> String {
        self.renderer.render_grid(&self.repository.list())
    }

    /// Detail markup for a recipe, or `None` if the id is unknown.
    #[must_use]
    pub fn view(&self, id: i64) -> Option<String> {
        let recipe = self.repository.find_by_id(id);
        if recipe.is_none() {
            debug!(id, "View requested for unknown recipe");
        }
        recipe.map(|r| self.renderer.render_detail(&r))
    }

    /// Start deleting a recipe.
    ///
    /// Returns `None` if the id is unknown; there is nothing to confirm.
    #[must_use]
    pub fn request_delete(&self, id: i64) -> Option<DeleteConfirmation> {
        self.repository
            .find_by_id(id)
            .map(|recipe| DeleteConfirmation {
                id: recipe.id,
                name: recipe.name,
            })
    }

    /// Carry out a confirmed delete.
    ///
    /// If the recipe disappeared in the meantime this is still a success.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be written.
    pub fn confirm_delete(&self, confirmation: DeleteConfirmation) -> Result<Notice> {
        self.repository.delete_by_id(confirmation.id)?;
        Ok(Notice::RecipeDeleted)
    }
}
