//! Recipe form validation.
//!
//! Every required field is checked independently so a single pass reports
//! all problems at once. Nothing reaches the repository until validation
//! succeeds; the repository does not re-check.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::recipe::RecipeDraft;

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeForm {
    /// Recipe name.
    pub name: String,
    /// Selected category.
    pub category: String,
    /// Optional description.
    pub description: String,
    /// Multi-line ingredient list.
    pub ingredients: String,
    /// Multi-line instructions.
    pub instructions: String,
    /// Optional image URL.
    pub image: String,
}

/// A required form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The recipe name.
    Name,
    /// The category.
    Category,
    /// The ingredient list.
    Ingredients,
    /// The instructions.
    Instructions,
}

impl Field {
    /// All required fields, in form order.
    pub const ALL: [Field; 4] = [
        Self::Name,
        Self::Category,
        Self::Ingredients,
        Self::Instructions,
    ];

    /// The form field name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Ingredients => "ingredients",
            Self::Instructions => "instructions",
        }
    }

    /// The message shown next to the field when it is missing.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Name => "Please enter a recipe name",
            Self::Category => "Please select a category",
            Self::Ingredients => "Please enter ingredients",
            Self::Instructions => "Please enter instructions",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// Record an error for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Check whether a field failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// The failed fields, in form order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// Iterate over `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks recipe forms before they are persisted.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    categories: Option<Vec<String>>,
}

impl Validator {
    /// A validator that only requires the mandatory fields to be non-empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also require the category to be one of `categories`.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Validate a submitted form.
    ///
    /// On success the returned draft carries trimmed values, with blank
    /// optional fields turned into `None`.
    ///
    /// # Errors
    ///
    /// Returns every failed required field with its message.
    pub fn validate(&self, form: &RecipeForm) -> Result<RecipeDraft, ValidationErrors> {
        let name = form.name.trim();
        let category = form.category.trim();
        let ingredients = form.ingredients.trim();
        let instructions = form.instructions.trim();

        let mut errors = ValidationErrors::default();
        for (field, value) in [
            (Field::Name, name),
            (Field::Category, category),
            (Field::Ingredients, ingredients),
            (Field::Instructions, instructions),
        ] {
            if value.is_empty() {
                errors.insert(field, field.message());
            }
        }

        if !category.is_empty() && !self.is_known_category(category) {
            errors.insert(Field::Category, Field::Category.message());
        }

        if !errors.is_empty() {
            debug!(fields = %errors, "Recipe form rejected");
            return Err(errors);
        }

        Ok(RecipeDraft {
            name: name.to_string(),
            category: category.to_string(),
            description: optional(&form.description),
            ingredients: ingredients.to_string(),
            instructions: instructions.to_string(),
            image: optional(&form.image),
        })
    }

    fn is_known_category(&self, category: &str) -> bool {
        self.categories
            .as_ref()
            .map_or(true, |known| known.iter().any(|c| c == category))
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
