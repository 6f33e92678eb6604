//! The ingredient catalog a pantry is seeded from.
//!
//! The built-in catalog covers common staples. Apps can ship their own
//! catalog as YAML or JSON, either as a bare list of entries or wrapped in an
//! `ingredients:` key.

use crate::model::{
    IngredientId, PantryCategory, PantryStockItem, StorageLocation, Tag, Unit,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate catalog entry: {0}")]
    DuplicateEntry(IngredientId),

    #[error("Invalid starting quantity for {name}: {quantity}")]
    InvalidQuantity { name: String, quantity: f64 },
}

/// One known ingredient and the stock a fresh pantry starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: IngredientId,
    pub display_name: String,
    #[serde(default)]
    pub quantity: f64,
    pub unit: Unit,
    pub category: PantryCategory,
    #[serde(default)]
    pub location: StorageLocation,
}

impl CatalogEntry {
    pub fn to_stock_item(&self) -> PantryStockItem {
        PantryStockItem::new(
            self.display_name.clone(),
            self.quantity,
            self.unit.clone(),
            self.category.clone(),
        )
        .with_location(self.location.clone())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { ingredients: Vec<CatalogEntry> },
    List(Vec<CatalogEntry>),
}

impl From<CatalogFile> for Vec<CatalogEntry> {
    fn from(file: CatalogFile) -> Self {
        match file {
            CatalogFile::Wrapped { ingredients } => ingredients,
            CatalogFile::List(entries) => entries,
        }
    }
}

/// An ordered set of catalog entries with unique identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

// (display name, starting quantity, unit, category, location)
const DEFAULT_ENTRIES: &[(&str, f64, &str, &str, &str)] = &[
    ("Flour", 1000.0, "g", "BAKING", "PANTRY"),
    ("Sugar", 1000.0, "g", "BAKING", "PANTRY"),
    ("Baking Powder", 100.0, "g", "BAKING", "PANTRY"),
    ("Salt", 500.0, "g", "SPICES", "PANTRY"),
    ("Black Pepper", 50.0, "g", "SPICES", "PANTRY"),
    ("Basil", 1.0, "bunch", "SPICES", "FRIDGE"),
    ("Olive Oil", 750.0, "ml", "CONDIMENTS", "PANTRY"),
    ("Soy Sauce", 250.0, "ml", "CONDIMENTS", "PANTRY"),
    ("Butter", 250.0, "g", "DAIRY", "FRIDGE"),
    ("Milk", 1000.0, "ml", "DAIRY", "FRIDGE"),
    ("Cheese", 200.0, "g", "DAIRY", "FRIDGE"),
    ("Egg", 12.0, "pcs", "DAIRY", "FRIDGE"),
    ("Garlic", 10.0, "clove", "PRODUCE", "PANTRY"),
    ("Onion", 4.0, "pcs", "PRODUCE", "PANTRY"),
    ("Potato", 2.0, "kg", "PRODUCE", "PANTRY"),
    ("Tomato", 6.0, "pcs", "PRODUCE", "FRIDGE"),
    ("Carrot", 500.0, "g", "PRODUCE", "FRIDGE"),
    ("Mushroom", 250.0, "g", "PRODUCE", "FRIDGE"),
    ("Lemon", 3.0, "pcs", "PRODUCE", "FRIDGE"),
    ("Rice", 2.0, "kg", "GRAINS", "PANTRY"),
    ("Pasta", 1.0, "kg", "GRAINS", "PANTRY"),
    ("Chicken", 1.0, "kg", "MEAT", "FRIDGE"),
    ("Beef", 1.0, "kg", "MEAT", "FREEZER"),
    ("Pork", 500.0, "g", "MEAT", "FREEZER"),
    ("Salmon", 400.0, "g", "SEAFOOD", "FREEZER"),
    ("Chickpeas", 2.0, "can", "CANNED", "PANTRY"),
];

impl Catalog {
    /// Builds a catalog, rejecting duplicate identifiers and invalid starting stock.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateEntry(entry.id.clone()));
            }
            if !entry.quantity.is_finite() || entry.quantity < 0.0 {
                return Err(CatalogError::InvalidQuantity {
                    name: entry.display_name.clone(),
                    quantity: entry.quantity,
                });
            }
        }
        Ok(Catalog { entries })
    }

    /// The built-in catalog of kitchen staples.
    pub fn builtin() -> Self {
        let entries = DEFAULT_ENTRIES
            .iter()
            .map(
                |(name, quantity, unit, category, location)| CatalogEntry {
                    id: IngredientId::new(name),
                    display_name: name.to_string(),
                    quantity: *quantity,
                    unit: Unit::parse(unit),
                    category: PantryCategory::from_name(category),
                    location: StorageLocation::from_name(location),
                },
            )
            .collect();
        Catalog { entries }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Catalog::new(file.into())
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Catalog::new(file.into())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &IngredientId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Fresh pantry stock, one item per entry.
    pub fn stock_items(&self) -> Vec<PantryStockItem> {
        self.entries.iter().map(CatalogEntry::to_stock_item).collect()
    }

    /// Entries grouped by category display name, in catalog order within each group.
    pub fn by_category(&self) -> Vec<(String, Vec<&CatalogEntry>)> {
        let mut groups: Vec<(String, Vec<&CatalogEntry>)> = Vec::new();
        for entry in &self.entries {
            let name = entry.category.display_name();
            match groups.iter_mut().find(|(group, _)| group == name) {
                Some((_, members)) => members.push(entry),
                None => groups.push((name.to_string(), vec![entry])),
            }
        }
        groups
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.entries().to_vec()).unwrap();
        assert_eq!(rebuilt, builtin);
        assert!(builtin
            .entries()
            .iter()
            .all(|e| !matches!(e.category, PantryCategory::Other(_))));
        assert!(builtin
            .entries()
            .iter()
            .all(|e| !matches!(e.location, StorageLocation::Other(_))));
    }

    #[test]
    fn test_builtin_catalog_entries() {
        let catalog = Catalog::builtin();
        let oil = catalog.get(&IngredientId::new("OLIVE_OIL")).unwrap();
        assert_eq!(oil.display_name, "Olive Oil");
        assert_eq!(oil.unit, Unit::Milliliter);

        let garlic = catalog.get(&IngredientId::new("garlic")).unwrap();
        assert_eq!(garlic.unit, Unit::Clove);
        assert_eq!(garlic.category, PantryCategory::Produce);
    }

    #[test]
    fn test_stock_items() {
        let items = Catalog::builtin().stock_items();
        let beef = items.iter().find(|i| i.is_named("beef")).unwrap();
        assert_eq!(beef.quantity, 1.0);
        assert_eq!(beef.unit, Unit::Kilogram);
        assert_eq!(beef.location, StorageLocation::Freezer);
    }

    #[test]
    fn test_from_yaml_wrapped() {
        let yaml = indoc! {r#"
            ingredients:
              - id: oat_milk
                displayName: Oat Milk
                quantity: 1
                unit: l
                category: beverages
                location: fridge
              - id: TAHINI
                displayName: Tahini
                unit: g
                category: condiments
        "#};

        let catalog = Catalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.entries().len(), 2);

        let oat = &catalog.entries()[0];
        assert_eq!(oat.id.as_str(), "OAT_MILK");
        assert_eq!(oat.category, PantryCategory::Beverages);
        assert_eq!(oat.location, StorageLocation::Fridge);

        let tahini = &catalog.entries()[1];
        assert_eq!(tahini.quantity, 0.0);
        assert_eq!(tahini.location, StorageLocation::Pantry);
    }

    #[test]
    fn test_from_json_list() {
        let json = r#"[{"id":"SAFFRON","displayName":"Saffron","quantity":1,"unit":"g","category":"SPICES"}]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.entries()[0].display_name, "Saffron");
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let yaml = indoc! {r#"
            - { id: salt, displayName: Salt, unit: g, category: spices }
            - { id: SALT, displayName: Sea Salt, unit: g, category: spices }
        "#};
        let err = Catalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateEntry(id) if id.as_str() == "SALT"));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let json = r#"[{"id":"SALT","displayName":"Salt","quantity":-1,"unit":"g","category":"SPICES"}]"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(CatalogError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            Catalog::from_yaml_str("ingredients: [unclosed"),
            Err(CatalogError::Yaml(_))
        ));
    }

    #[test]
    fn test_by_category_groups_in_order() {
        let catalog = Catalog::builtin();
        let groups = catalog.by_category();
        assert_eq!(groups[0].0, "Baking");
        assert_eq!(groups[0].1.len(), 3);
        let produce = groups.iter().find(|(name, _)| name == "Produce").unwrap();
        assert_eq!(produce.1[0].display_name, "Garlic");
    }
}
