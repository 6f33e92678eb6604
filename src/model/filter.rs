use super::{Cuisine, Diet, IngredientId, MealType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A closed numeric interval `[min, max]`.
///
/// Decoding reorders swapped bounds, so a loaded range always has `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRange")]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl From<RawRange> for NumericRange {
    fn from(raw: RawRange) -> Self {
        NumericRange::new(raw.min, raw.max)
    }
}

impl NumericRange {
    /// Builds a range from two bounds given in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            NumericRange { min: a, max: b }
        } else {
            NumericRange { min: b, max: a }
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Pulls both bounds inside `bounds`. The result still has `min <= max`.
    pub fn clamped_to(&self, bounds: NumericRange) -> Self {
        NumericRange::new(clamp(self.min, bounds), clamp(self.max, bounds))
    }
}

pub(crate) fn clamp(value: f64, bounds: NumericRange) -> f64 {
    value.max(bounds.min).min(bounds.max)
}

pub const TIME_BOUNDS: NumericRange = NumericRange { min: 5.0, max: 180.0 };
pub const DEFAULT_TIME_RANGE: NumericRange = NumericRange { min: 15.0, max: 60.0 };

pub const RATING_BOUNDS: NumericRange = NumericRange { min: 0.0, max: 5.0 };
pub const DEFAULT_MIN_RATING: f64 = 3.0;

pub const CALORIE_BOUNDS: NumericRange = NumericRange { min: 50.0, max: 1500.0 };
pub const DEFAULT_CALORIE_RANGE: NumericRange = NumericRange { min: 200.0, max: 800.0 };

pub const PROTEIN_BOUNDS: NumericRange = NumericRange { min: 0.0, max: 200.0 };
pub const DEFAULT_PROTEIN_RANGE: NumericRange = NumericRange { min: 10.0, max: 60.0 };

pub const FAT_BOUNDS: NumericRange = NumericRange { min: 0.0, max: 150.0 };
pub const DEFAULT_FAT_RANGE: NumericRange = NumericRange { min: 5.0, max: 50.0 };

pub const CARBS_BOUNDS: NumericRange = NumericRange { min: 0.0, max: 300.0 };
pub const DEFAULT_CARBS_RANGE: NumericRange = NumericRange { min: 20.0, max: 120.0 };

/// Structured recipe search criteria derived from free text.
///
/// Field names are serialized in camelCase and are part of the persisted
/// format, so renaming a field is a breaking change for stored filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Total preparation time in minutes
    pub time_range: NumericRange,
    pub min_rating: f64,
    pub meal_types: BTreeSet<MealType>,
    pub cuisines: BTreeSet<Cuisine>,
    pub diets: BTreeSet<Diet>,
    pub included_ingredients: BTreeSet<IngredientId>,
    pub excluded_ingredients: BTreeSet<IngredientId>,
    /// Calories per serving
    pub calorie_range: NumericRange,
    /// Grams per serving
    pub protein_range: NumericRange,
    pub fat_range: NumericRange,
    pub carbs_range: NumericRange,
    pub use_owned_equipment_only: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            time_range: DEFAULT_TIME_RANGE,
            min_rating: DEFAULT_MIN_RATING,
            meal_types: BTreeSet::new(),
            cuisines: BTreeSet::new(),
            diets: BTreeSet::new(),
            included_ingredients: BTreeSet::new(),
            excluded_ingredients: BTreeSet::new(),
            calorie_range: DEFAULT_CALORIE_RANGE,
            protein_range: DEFAULT_PROTEIN_RANGE,
            fat_range: DEFAULT_FAT_RANGE,
            carbs_range: DEFAULT_CARBS_RANGE,
            use_owned_equipment_only: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_new_orders_bounds() {
        let range = NumericRange::new(60.0, 15.0);
        assert_eq!(range, NumericRange { min: 15.0, max: 60.0 });
    }

    #[test]
    fn test_range_contains_is_closed() {
        let range = NumericRange::new(15.0, 60.0);
        assert!(range.contains(15.0));
        assert!(range.contains(60.0));
        assert!(!range.contains(60.5));
    }

    #[test]
    fn test_clamped_to_keeps_order() {
        let range = NumericRange::new(500.0, 99999.0).clamped_to(TIME_BOUNDS);
        assert_eq!(range, NumericRange { min: 180.0, max: 180.0 });

        let range = NumericRange::new(1.0, 30.0).clamped_to(TIME_BOUNDS);
        assert_eq!(range, NumericRange { min: 5.0, max: 30.0 });
    }

    #[test]
    fn test_filter_spec_json_field_names() {
        let json = serde_json::to_value(FilterSpec::default()).unwrap();
        assert_eq!(json["timeRange"]["min"], 15.0);
        assert_eq!(json["timeRange"]["max"], 60.0);
        assert_eq!(json["minRating"], 3.0);
        assert_eq!(json["calorieRange"]["max"], 800.0);
        assert_eq!(json["useOwnedEquipmentOnly"], true);
        assert!(json["excludedIngredients"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_swapped_bounds_are_reordered_on_load() {
        let filter: FilterSpec =
            serde_json::from_str(r#"{"timeRange":{"min":60,"max":15}}"#).unwrap();
        assert_eq!(filter.time_range, NumericRange { min: 15.0, max: 60.0 });
        assert!(filter.time_range.min <= filter.time_range.max);
    }

    #[test]
    fn test_filter_spec_partial_json_uses_defaults() {
        let filter: FilterSpec =
            serde_json::from_str(r#"{"diets":["VEGAN"],"minRating":4.5}"#).unwrap();
        assert_eq!(filter.min_rating, 4.5);
        assert!(filter.diets.contains(&Diet::Vegan));
        assert_eq!(filter.time_range, DEFAULT_TIME_RANGE);
    }
}
