use crate::catalog::Catalog;
use crate::model::{
    IngredientId, NumericRange, CALORIE_BOUNDS, CARBS_BOUNDS, DEFAULT_CALORIE_RANGE,
    DEFAULT_CARBS_RANGE, DEFAULT_FAT_RANGE, DEFAULT_MIN_RATING, DEFAULT_PROTEIN_RANGE,
    DEFAULT_TIME_RANGE, FAT_BOUNDS, PROTEIN_BOUNDS, TIME_BOUNDS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse parser config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse parser config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The range a filter starts with and the global range parsed values are clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub default: NumericRange,
    pub bounds: NumericRange,
}

impl RangeConfig {
    pub const fn new(default: NumericRange, bounds: NumericRange) -> Self {
        RangeConfig { default, bounds }
    }
}

/// An ingredient the parser recognizes in queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientTerm {
    pub id: IngredientId,
    pub display_name: String,
}

/// Defaults, global bounds and vocabulary used by [`QueryParser`](super::QueryParser).
///
/// Every field is optional when loading from YAML or JSON; missing fields keep
/// their built-in values.
///
/// ```yaml
/// time:
///   default: { min: 10, max: 45 }
///   bounds: { min: 5, max: 240 }
/// defaultMinRating: 4.0
/// ingredients:
///   - { id: TEMPEH, displayName: Tempeh }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserConfig {
    pub time: RangeConfig,
    pub calories: RangeConfig,
    pub protein: RangeConfig,
    pub fat: RangeConfig,
    pub carbs: RangeConfig,
    pub default_min_rating: f64,
    pub use_owned_equipment_only: bool,
    pub ingredients: Vec<IngredientTerm>,
}

impl ParserConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replaces the ingredient vocabulary with the entries of `catalog`.
    pub fn with_catalog(mut self, catalog: &Catalog) -> Self {
        self.ingredients = vocabulary(catalog);
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            time: RangeConfig::new(DEFAULT_TIME_RANGE, TIME_BOUNDS),
            calories: RangeConfig::new(DEFAULT_CALORIE_RANGE, CALORIE_BOUNDS),
            protein: RangeConfig::new(DEFAULT_PROTEIN_RANGE, PROTEIN_BOUNDS),
            fat: RangeConfig::new(DEFAULT_FAT_RANGE, FAT_BOUNDS),
            carbs: RangeConfig::new(DEFAULT_CARBS_RANGE, CARBS_BOUNDS),
            default_min_rating: DEFAULT_MIN_RATING,
            use_owned_equipment_only: true,
            ingredients: vocabulary(&Catalog::builtin()),
        }
    }
}

fn vocabulary(catalog: &Catalog) -> Vec<IngredientTerm> {
    catalog
        .entries()
        .iter()
        .map(|entry| IngredientTerm {
            id: entry.id.clone(),
            display_name: entry.display_name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_default_vocabulary_comes_from_builtin_catalog() {
        let config = ParserConfig::default();
        assert_eq!(config.ingredients.len(), Catalog::builtin().entries().len());
        assert!(config
            .ingredients
            .iter()
            .any(|t| t.id.as_str() == "GARLIC" && t.display_name == "Garlic"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = indoc! {r#"
            time:
              default: { min: 10, max: 45 }
              bounds: { min: 5, max: 240 }
            defaultMinRating: 4.0
            ingredients:
              - { id: tempeh, displayName: Tempeh }
        "#};

        let config = ParserConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.time.default, NumericRange::new(10.0, 45.0));
        assert_eq!(config.time.bounds.max, 240.0);
        assert_eq!(config.default_min_rating, 4.0);
        assert_eq!(config.calories, ParserConfig::default().calories);
        assert!(config.use_owned_equipment_only);
        assert_eq!(config.ingredients.len(), 1);
        assert_eq!(config.ingredients[0].id.as_str(), "TEMPEH");
    }

    #[test]
    fn test_swapped_config_range_is_reordered() {
        let yaml = indoc! {r#"
            calories:
              default: { min: 800, max: 200 }
              bounds: { min: 50, max: 1500 }
        "#};
        let config = ParserConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.calories.default, NumericRange::new(200.0, 800.0));
        assert_eq!(config.calories.default.min, 200.0);
    }

    #[test]
    fn test_json_config() {
        let config = ParserConfig::from_json_str(r#"{"useOwnedEquipmentOnly": false}"#).unwrap();
        assert!(!config.use_owned_equipment_only);
        assert_eq!(config.ingredients, ParserConfig::default().ingredients);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ParserConfig::from_json_str(r#"{"defaultMinRating": "high"}"#),
            Err(ConfigError::Json(_))
        ));
    }
}
