use super::{names_match, normalize_key, PantryCategory, StorageLocation, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an ingredient, e.g. `GARLIC` or `OLIVE_OIL`.
///
/// Any display name maps to its identifier by upper-casing and joining words
/// with underscores, so "Olive Oil" and "olive_oil" identify the same ingredient.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct IngredientId(String);

impl IngredientId {
    pub fn new(name: &str) -> Self {
        IngredientId(normalize_key(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form with underscores as spaces, as it would appear in text.
    pub fn spoken(&self) -> String {
        self.0.to_lowercase().replace('_', " ")
    }
}

impl From<String> for IngredientId {
    fn from(name: String) -> Self {
        IngredientId::new(&name)
    }
}

impl From<&str> for IngredientId {
    fn from(name: &str) -> Self {
        IngredientId::new(name)
    }
}

impl From<IngredientId> for String {
    fn from(id: IngredientId) -> Self {
        id.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tracked consumable in the kitchen inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryStockItem {
    /// Display name, also the key deductions match against
    pub name: String,
    /// Never negative
    pub quantity: f64,
    /// Default unit the quantity is kept in
    pub unit: Unit,
    pub category: PantryCategory,
    #[serde(default)]
    pub location: StorageLocation,
}

impl PantryStockItem {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: Unit,
        category: PantryCategory,
    ) -> Self {
        PantryStockItem {
            name: name.into(),
            quantity,
            unit,
            category,
            location: StorageLocation::default(),
        }
    }

    pub fn with_location(mut self, location: StorageLocation) -> Self {
        self.location = location;
        self
    }

    pub fn id(&self) -> IngredientId {
        IngredientId::new(&self.name)
    }

    /// Case-insensitive name match.
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// One ingredient line of a recipe: how much of what it consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientUsage {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
}

impl RecipeIngredientUsage {
    pub fn new(name: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        RecipeIngredientUsage {
            name: name.into(),
            quantity,
            unit,
        }
    }

    pub fn id(&self) -> IngredientId {
        IngredientId::new(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_id_from_display_name() {
        assert_eq!(IngredientId::new("Olive Oil").as_str(), "OLIVE_OIL");
        assert_eq!(IngredientId::new("olive_oil"), IngredientId::new("Olive Oil"));
        assert_eq!(IngredientId::new("Olive Oil").spoken(), "olive oil");
    }

    #[test]
    fn test_stock_item_serializes_with_camel_case_fields() {
        let item = PantryStockItem::new("Butter", 250.0, Unit::Gram, PantryCategory::Dairy)
            .with_location(StorageLocation::Fridge);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["name"], "Butter");
        assert_eq!(json["quantity"], 250.0);
        assert_eq!(json["unit"], "g");
        assert_eq!(json["category"], "DAIRY");
        assert_eq!(json["location"], "FRIDGE");
    }

    #[test]
    fn test_stock_item_location_defaults_to_pantry() {
        let item: PantryStockItem = serde_json::from_str(
            r#"{"name":"Rice","quantity":2,"unit":"kg","category":"GRAINS"}"#,
        )
        .unwrap();
        assert_eq!(item.location, StorageLocation::Pantry);
        assert_eq!(item.unit, Unit::Kilogram);
    }

    #[test]
    fn test_is_named_ignores_case() {
        let item = PantryStockItem::new("Flour", 1.0, Unit::Kilogram, PantryCategory::Baking);
        assert!(item.is_named("FLOUR"));
        assert!(!item.is_named("flour tortilla"));
    }
}
