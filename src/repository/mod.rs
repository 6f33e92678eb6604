//! Recipe storage behind an injectable interface.
//!
//! Search code takes a `&dyn RecipeRepository` (or any implementor) instead of
//! reaching for a process-wide recipe list. A hosted backend can implement the
//! trait on the app side; this crate ships an in-memory and a directory-backed
//! implementation.

use crate::model::{names_match, Recipe};
use camino::Utf8PathBuf;
use thiserror::Error;

mod directory;

pub use directory::DirectoryRepository;

/// Errors that can occur when loading recipes.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Failed to read directory: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Failed to create glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Failed to read recipe file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML recipe {path}: {source}")]
    YamlError {
        path: Utf8PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON recipe {path}: {source}")]
    JsonError {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },

    #[error("Unsupported recipe format: {0}")]
    UnsupportedFormat(Utf8PathBuf),

    #[error("Recipe not found: {0}")]
    NotFound(String),
}

/// A source of recipe documents.
pub trait RecipeRepository {
    /// Every recipe the repository holds.
    fn recipes(&self) -> Result<Vec<Recipe>, RepositoryError>;

    /// Looks up one recipe by case-insensitive name.
    fn get_recipe(&self, name: &str) -> Result<Recipe, RepositoryError> {
        self.recipes()?
            .into_iter()
            .find(|recipe| names_match(&recipe.name, name))
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }
}

/// A repository over recipes already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    recipes: Vec<Recipe>,
}

impl InMemoryRepository {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        InMemoryRepository { recipes }
    }

    pub fn insert(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }
}

impl RecipeRepository for InMemoryRepository {
    fn recipes(&self) -> Result<Vec<Recipe>, RepositoryError> {
        Ok(self.recipes.clone())
    }
}
