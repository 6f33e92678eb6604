//! Core data types shared by the parser, the converter and the pantry ledger.

mod filter;
mod ingredient;
mod recipe;
mod tags;
mod unit;

pub(crate) use filter::clamp;
pub use filter::{
    FilterSpec, NumericRange, CALORIE_BOUNDS, CARBS_BOUNDS, DEFAULT_CALORIE_RANGE,
    DEFAULT_CARBS_RANGE, DEFAULT_FAT_RANGE, DEFAULT_MIN_RATING, DEFAULT_PROTEIN_RANGE,
    DEFAULT_TIME_RANGE, FAT_BOUNDS, PROTEIN_BOUNDS, RATING_BOUNDS, TIME_BOUNDS,
};
pub use ingredient::{IngredientId, PantryStockItem, RecipeIngredientUsage};
pub use recipe::{Nutrition, Recipe};
pub use tags::{Cuisine, Diet, MealType, PantryCategory, StorageLocation, Tag};
pub use unit::{Dimension, Unit};

/// Normalizes a free-form name into an upper snake-case key.
///
/// Runs of anything that is not alphanumeric collapse into a single `_`, so
/// "Gluten-Free", "gluten free" and "GLUTEN_FREE" all map to `GLUTEN_FREE`.
pub(crate) fn normalize_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.extend(c.to_uppercase());
        } else {
            pending_separator = true;
        }
    }

    key
}

/// Case-insensitive comparison of two display names, ignoring surrounding whitespace.
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
