//! Core recipe types for recipebox.
//!
//! This module defines the single persisted entity and the draft shape the
//! validator hands to the repository before an id is assigned.

use serde::{Deserialize, Serialize};

/// A recipe that has not been persisted yet.
///
/// Produced by [`crate::validate::Validator`]; required fields are already
/// trimmed and non-empty, optional fields are `None` when left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Display name of the dish.
    pub name: String,
    /// Category chosen from the configured set.
    pub category: String,
    /// Free-form summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// One ingredient per line.
    pub ingredients: String,
    /// One step per line.
    pub instructions: String,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A persisted recipe.
///
/// Field names and types match the JSON layout of the stored blob, so
/// collections written by earlier versions of the catalog load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier within the collection (assigned by the repository).
    pub id: i64,
    /// Display name of the dish.
    pub name: String,
    /// Category chosen from the configured set.
    pub category: String,
    /// Free-form summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// One ingredient per line.
    pub ingredients: String,
    /// One step per line.
    pub instructions: String,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Recipe {
    /// Attach an id to a draft.
    #[must_use]
    pub fn from_draft(id: i64, draft: RecipeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            description: draft.description,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            image: draft.image,
        }
    }

    /// The description, if one was given and is not blank.
    ///
    /// Older blobs store an empty string rather than omitting the field.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    /// The image URL, if one was given and is not blank.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        non_blank(self.image.as_deref())
    }

    /// Iterate over the non-blank ingredient lines.
    pub fn ingredient_lines(&self) -> impl Iterator<Item = &str> {
        non_blank_lines(&self.ingredients)
    }

    /// Iterate over the non-blank instruction lines.
    pub fn instruction_lines(&self) -> impl Iterator<Item = &str> {
        non_blank_lines(&self.instructions)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Split multi-line text into lines, dropping the ones that are blank.
///
/// `\r\n` line endings are tolerated; surrounding whitespace on a kept line
/// is preserved.
pub fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}
