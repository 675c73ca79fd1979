//! `recipebox` - A local recipe catalog
//!
//! This library keeps a collection of recipes as a single JSON blob in a
//! key-value store, validates new recipes before they are saved, and renders
//! the collection as escaped HTML.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod recipe;
pub mod render;
pub mod repository;
pub mod storage;
pub mod validate;

pub use config::Config;
pub use controller::{Catalog, DeleteConfirmation, Notice};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use recipe::{Recipe, RecipeDraft};
pub use render::Renderer;
pub use repository::{Clock, RecipeRepository, SystemClock};
pub use storage::{KeyValueStore, MemoryStore, RecipeStore, SqliteStore, StoreStats};
pub use validate::{Field, RecipeForm, ValidationErrors, Validator};
