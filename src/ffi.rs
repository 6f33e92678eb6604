//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Tags and units cross the boundary as strings; full documents are also
//! available as JSON for callers that need every field.

use crate::catalog::{Catalog, CatalogError};
use crate::convert::{convert, format_quantity as format_quantity_internal, ConversionError};
use crate::model::{
    FilterSpec, NumericRange, PantryCategory, PantryStockItem, Recipe, RecipeIngredientUsage,
    StorageLocation, Tag, Unit,
};
use crate::pantry::{DeductionOutcome, DeductionReport, LedgerError, PantryLedger};
use crate::query::parse;
use crate::repository::{DirectoryRepository, RepositoryError};
use crate::search::search_recipes as search_recipes_internal;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum PantryError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Conversion error: {message}")]
    ConversionError { message: String },

    #[error("Invalid quantity: {message}")]
    InvalidQuantity { message: String },
}

impl From<ConversionError> for PantryError {
    fn from(e: ConversionError) -> Self {
        PantryError::ConversionError {
            message: e.to_string(),
        }
    }
}

impl From<LedgerError> for PantryError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Conversion(e) => e.into(),
            LedgerError::UnknownItem(name) => PantryError::NotFound { message: name },
            e @ LedgerError::InvalidQuantity { .. } => PantryError::InvalidQuantity {
                message: e.to_string(),
            },
        }
    }
}

impl From<RepositoryError> for PantryError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(name) => PantryError::NotFound { message: name },
            RepositoryError::GlobError(_)
            | RepositoryError::PatternError(_)
            | RepositoryError::IoError(_) => PantryError::IoError {
                message: e.to_string(),
            },
            RepositoryError::YamlError { .. }
            | RepositoryError::JsonError { .. }
            | RepositoryError::UnsupportedFormat(_) => PantryError::ParseError {
                message: e.to_string(),
            },
        }
    }
}

impl From<CatalogError> for PantryError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::InvalidQuantity { .. } => PantryError::InvalidQuantity {
                message: e.to_string(),
            },
            _ => PantryError::ParseError {
                message: e.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for PantryError {
    fn from(e: serde_json::Error) -> Self {
        PantryError::ParseError {
            message: e.to_string(),
        }
    }
}

fn tag_names<T: Tag>(tags: &BTreeSet<T>) -> Vec<String> {
    tags.iter().map(|tag| tag.canonical_name().to_string()).collect()
}

/// A closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct FfiRange {
    pub min: f64,
    pub max: f64,
}

impl From<NumericRange> for FfiRange {
    fn from(r: NumericRange) -> Self {
        FfiRange {
            min: r.min,
            max: r.max,
        }
    }
}

/// FFI-safe representation of parsed search criteria.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFilterSpec {
    /// Total time in minutes
    pub time_range: FfiRange,
    pub min_rating: f64,
    /// Canonical names, e.g. `DINNER`
    pub meal_types: Vec<String>,
    pub cuisines: Vec<String>,
    pub diets: Vec<String>,
    /// Ingredient identifiers, e.g. `OLIVE_OIL`
    pub included_ingredients: Vec<String>,
    pub excluded_ingredients: Vec<String>,
    pub calorie_range: FfiRange,
    pub protein_range: FfiRange,
    pub fat_range: FfiRange,
    pub carbs_range: FfiRange,
    pub use_owned_equipment_only: bool,
    /// The whole filter as JSON, in the persisted format
    pub raw_json: String,
}

impl From<&FilterSpec> for FfiFilterSpec {
    fn from(f: &FilterSpec) -> Self {
        let raw_json = serde_json::to_string(f).unwrap_or_default();

        FfiFilterSpec {
            time_range: f.time_range.into(),
            min_rating: f.min_rating,
            meal_types: tag_names(&f.meal_types),
            cuisines: tag_names(&f.cuisines),
            diets: tag_names(&f.diets),
            included_ingredients: f
                .included_ingredients
                .iter()
                .map(ToString::to_string)
                .collect(),
            excluded_ingredients: f
                .excluded_ingredients
                .iter()
                .map(ToString::to_string)
                .collect(),
            calorie_range: f.calorie_range.into(),
            protein_range: f.protein_range.into(),
            fat_range: f.fat_range.into(),
            carbs_range: f.carbs_range.into(),
            use_owned_equipment_only: f.use_owned_equipment_only,
            raw_json,
        }
    }
}

/// FFI-safe representation of one pantry item.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiStockItem {
    pub name: String,
    pub quantity: f64,
    /// Unit symbol, e.g. `g` or `tbsp`
    pub unit: String,
    /// Canonical category name, e.g. `DAIRY`
    pub category: String,
    /// Canonical location name, e.g. `FRIDGE`
    pub location: String,
}

impl From<&PantryStockItem> for FfiStockItem {
    fn from(item: &PantryStockItem) -> Self {
        FfiStockItem {
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.symbol().to_string(),
            category: item.category.canonical_name().to_string(),
            location: item.location.canonical_name().to_string(),
        }
    }
}

impl From<FfiStockItem> for PantryStockItem {
    fn from(item: FfiStockItem) -> Self {
        PantryStockItem::new(
            item.name,
            item.quantity,
            Unit::parse(&item.unit),
            PantryCategory::from_name(&item.category),
        )
        .with_location(StorageLocation::from_name(&item.location))
    }
}

/// One ingredient line of a recipe being cooked.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIngredientUsage {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl From<FfiIngredientUsage> for RecipeIngredientUsage {
    fn from(usage: FfiIngredientUsage) -> Self {
        RecipeIngredientUsage::new(usage.name, usage.quantity, Unit::parse(&usage.unit))
    }
}

/// What happened to one ingredient during a deduction.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDeductionOutcome {
    pub ingredient: String,
    /// One of `deducted`, `notFound`, `conversionFailed`, `insufficient`,
    /// `invalidQuantity`
    pub status: String,
    pub success: bool,
    /// User-facing description
    pub message: String,
}

impl From<&DeductionOutcome> for FfiDeductionOutcome {
    fn from(o: &DeductionOutcome) -> Self {
        FfiDeductionOutcome {
            ingredient: o.ingredient().to_string(),
            status: o.status().to_string(),
            success: o.is_success(),
            message: o.message(),
        }
    }
}

/// FFI-safe representation of a deduction report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDeductionReport {
    pub outcomes: Vec<FfiDeductionOutcome>,
    pub has_insufficient: bool,
    pub all_deducted: bool,
}

impl From<&DeductionReport> for FfiDeductionReport {
    fn from(r: &DeductionReport) -> Self {
        FfiDeductionReport {
            outcomes: r.outcomes.iter().map(FfiDeductionOutcome::from).collect(),
            has_insufficient: r.has_insufficient,
            all_deducted: r.all_deducted(),
        }
    }
}

/// FFI-safe summary of a recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub name: String,
    pub total_time_minutes: u32,
    pub rating: f64,
    pub meal_types: Vec<String>,
    pub cuisines: Vec<String>,
    pub diets: Vec<String>,
    pub image_url: Option<String>,
    /// The whole recipe document as JSON
    pub raw_json: String,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        let raw_json = serde_json::to_string(r).unwrap_or_default();

        FfiRecipe {
            name: r.name.clone(),
            total_time_minutes: r.total_time_minutes,
            rating: r.rating,
            meal_types: tag_names(&r.meal_types),
            cuisines: tag_names(&r.cuisines),
            diets: tag_names(&r.diets),
            image_url: r.image_url.clone(),
            raw_json,
        }
    }
}

/// A pantry shared with the host app.
///
/// Bindings may call from any thread, so the ledger sits behind a mutex.
#[derive(uniffi::Object)]
pub struct FfiPantryLedger {
    inner: Mutex<PantryLedger>,
}

#[uniffi::export]
impl FfiPantryLedger {
    /// Creates a pantry stocked with the built-in ingredient catalog.
    #[uniffi::constructor]
    pub fn with_default_catalog() -> Arc<Self> {
        Arc::new(FfiPantryLedger::new(PantryLedger::from_catalog(
            &Catalog::builtin(),
        )))
    }

    /// Creates a pantry stocked from a YAML or JSON catalog document.
    #[uniffi::constructor]
    pub fn with_catalog(document: String) -> Result<Arc<Self>, PantryError> {
        let catalog = if document.trim_start().starts_with(['{', '[']) {
            Catalog::from_json_str(&document)?
        } else {
            Catalog::from_yaml_str(&document)?
        };
        Ok(Arc::new(FfiPantryLedger::new(PantryLedger::from_catalog(
            &catalog,
        ))))
    }

    /// Restores a pantry from a JSON snapshot produced by [`Self::to_json`].
    #[uniffi::constructor]
    pub fn from_json(json: String) -> Result<Arc<Self>, PantryError> {
        let ledger: PantryLedger = serde_json::from_str(&json)?;
        Ok(Arc::new(FfiPantryLedger::new(ledger)))
    }

    /// Returns every item currently tracked.
    pub fn items(&self) -> Vec<FfiStockItem> {
        self.lock().items().iter().map(FfiStockItem::from).collect()
    }

    /// Looks up an item by case-insensitive name.
    pub fn find(&self, name: String) -> Option<FfiStockItem> {
        self.lock().find(&name).map(FfiStockItem::from)
    }

    /// Adds an item, merging into an existing item of the same name.
    pub fn add_item(&self, item: FfiStockItem) -> Result<(), PantryError> {
        self.lock().add_item(item.into())?;
        Ok(())
    }

    /// Increases an item's stock and returns its new quantity.
    pub fn restock(&self, name: String, quantity: f64, unit: String) -> Result<f64, PantryError> {
        Ok(self.lock().restock(&name, quantity, &Unit::parse(&unit))?)
    }

    /// Subtracts a cooked recipe's ingredients from stock.
    pub fn deduct_for_recipe(&self, usages: Vec<FfiIngredientUsage>) -> FfiDeductionReport {
        let usages = into_usages(usages);
        FfiDeductionReport::from(&self.lock().deduct_for_recipe(&usages))
    }

    /// Reports what a deduction would do without changing stock.
    pub fn can_cook(&self, usages: Vec<FfiIngredientUsage>) -> FfiDeductionReport {
        let usages = into_usages(usages);
        FfiDeductionReport::from(&self.lock().can_cook(&usages))
    }

    /// Serializes the pantry to JSON for persistence.
    pub fn to_json(&self) -> Result<String, PantryError> {
        Ok(serde_json::to_string(&*self.lock())?)
    }
}

impl FfiPantryLedger {
    fn new(ledger: PantryLedger) -> Self {
        FfiPantryLedger {
            inner: Mutex::new(ledger),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PantryLedger> {
        // Every mutation leaves the ledger consistent, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn into_usages(usages: Vec<FfiIngredientUsage>) -> Vec<RecipeIngredientUsage> {
    usages.into_iter().map(RecipeIngredientUsage::from).collect()
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Parses a free-text search query into structured criteria.
///
/// Never fails: text that mentions nothing recognizable yields the default
/// filter.
#[uniffi::export]
pub fn parse_query(query: String) -> FfiFilterSpec {
    FfiFilterSpec::from(&parse(&query))
}

/// Converts a quantity between two units given by symbol or name.
///
/// # Arguments
/// * `quantity` - The amount to convert
/// * `from` - Source unit, e.g. `"kg"` or `"tablespoons"`
/// * `to` - Target unit
///
/// # Returns
/// The converted amount, or an error if the units measure different things.
#[uniffi::export]
pub fn convert_quantity(quantity: f64, from: String, to: String) -> Result<f64, PantryError> {
    Ok(convert(quantity, &Unit::parse(&from), &Unit::parse(&to))?)
}

/// Formats a quantity for display with at most one decimal place.
#[uniffi::export]
pub fn format_quantity(value: f64) -> String {
    format_quantity_internal(value)
}

/// Searches a directory of recipe documents with a free-text query.
///
/// # Arguments
/// * `base_dir` - Root directory holding `.yaml`, `.yml` and `.json` recipes
/// * `query` - Free-text query, e.g. `"vegan dinner under 30 minutes"`
/// * `owned_equipment` - Equipment the user has, matched case-insensitively
///
/// # Returns
/// Matching recipes, best rated first.
#[uniffi::export]
pub fn search_recipes(
    base_dir: String,
    query: String,
    owned_equipment: Vec<String>,
) -> Result<Vec<FfiRecipe>, PantryError> {
    let repository = DirectoryRepository::new(base_dir);
    let results = search_recipes_internal(&repository, &parse(&query), &owned_equipment)?;
    Ok(results.iter().map(FfiRecipe::from).collect())
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
