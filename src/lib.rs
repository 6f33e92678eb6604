uniffi::setup_scaffolding!();

pub mod catalog;
pub mod convert;
pub mod ffi;
pub mod model;
pub mod pantry;
pub mod query;
pub mod repository;
pub mod search;

pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use convert::{convert, format_quantity, ConversionError};
pub use model::*;
pub use pantry::{
    deduct_for_recipe, Deduction, DeductionOutcome, DeductionReport, LedgerError, PantryLedger,
};
pub use query::{parse, ConfigError, ParserConfig, QueryParser};
pub use repository::{DirectoryRepository, InMemoryRepository, RecipeRepository, RepositoryError};
pub use search::{search_recipes, search_recipes_by_text};
