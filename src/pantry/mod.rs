//! Pantry stock tracking and recipe deductions.
//!
//! Deductions run one ingredient at a time with no rollback: an ingredient
//! that is missing, short or in an incompatible unit is reported and skipped,
//! and the remaining ingredients are still deducted. Stock never goes negative.

use crate::catalog::Catalog;
use crate::convert::{convert, ConversionError};
use crate::model::{PantryStockItem, RecipeIngredientUsage, Unit};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

mod model;

pub use model::{Deduction, DeductionOutcome, DeductionReport};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid quantity for {ingredient}: {quantity}")]
    InvalidQuantity { ingredient: String, quantity: f64 },

    #[error("Pantry item not found: {0}")]
    UnknownItem(String),

    #[error("Failed to convert units: {0}")]
    Conversion(#[from] ConversionError),
}

fn validate_quantity(ingredient: &str, quantity: f64) -> Result<(), LedgerError> {
    if quantity.is_finite() && quantity >= 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidQuantity {
            ingredient: ingredient.to_string(),
            quantity,
        })
    }
}

/// A pantry stock collection and the operations that mutate it.
///
/// The ledger itself is not synchronized; callers sharing one across threads
/// must serialize access.
///
/// # Examples
///
/// ```
/// use pantry_find::{PantryCategory, PantryLedger, PantryStockItem, RecipeIngredientUsage, Unit};
///
/// let mut ledger = PantryLedger::new(vec![PantryStockItem::new(
///     "Beef",
///     2.0,
///     Unit::Kilogram,
///     PantryCategory::Meat,
/// )]);
/// let report = ledger.deduct_for_recipe(&[RecipeIngredientUsage::new("beef", 500.0, Unit::Gram)]);
///
/// assert!(report.all_deducted());
/// assert_eq!(ledger.find("Beef").unwrap().quantity, 1.5);
/// ```
///
/// Snapshots serialize as a plain list of items. Loading one rejects negative
/// or non-finite stock.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<PantryStockItem>", into = "Vec<PantryStockItem>")]
pub struct PantryLedger {
    items: Vec<PantryStockItem>,
}

impl PantryLedger {
    pub fn new(items: Vec<PantryStockItem>) -> Self {
        PantryLedger { items }
    }

    /// Like [`new`](Self::new), but rejects items with negative or non-finite stock.
    pub fn try_new(items: Vec<PantryStockItem>) -> Result<Self, LedgerError> {
        for item in &items {
            validate_quantity(&item.name, item.quantity)?;
        }
        Ok(PantryLedger::new(items))
    }

    /// A fresh pantry stocked with every catalog entry.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        PantryLedger::new(catalog.stock_items())
    }

    pub fn items(&self) -> &[PantryStockItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<PantryStockItem> {
        self.items
    }

    /// Looks up an item by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&PantryStockItem> {
        self.items.iter().find(|item| item.is_named(name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut PantryStockItem> {
        self.items.iter_mut().find(|item| item.is_named(name))
    }

    /// Adds a user-defined item.
    ///
    /// If an item with the same name exists, the new quantity is converted
    /// into the existing item's unit and added to it.
    pub fn add_item(&mut self, item: PantryStockItem) -> Result<(), LedgerError> {
        validate_quantity(&item.name, item.quantity)?;

        match self.find_mut(&item.name) {
            Some(existing) => {
                let quantity = convert(item.quantity, &item.unit, &existing.unit)?;
                existing.quantity += quantity;
            }
            None => self.items.push(item),
        }
        Ok(())
    }

    /// Increases an existing item's stock and returns the new quantity.
    pub fn restock(&mut self, name: &str, quantity: f64, unit: &Unit) -> Result<f64, LedgerError> {
        validate_quantity(name, quantity)?;
        let item = self
            .find_mut(name)
            .ok_or_else(|| LedgerError::UnknownItem(name.to_string()))?;

        let quantity = convert(quantity, unit, &item.unit)?;
        item.quantity += quantity;
        Ok(item.quantity)
    }

    /// Overwrites an item's quantity, in the item's own unit.
    pub fn set_quantity(&mut self, name: &str, quantity: f64) -> Result<(), LedgerError> {
        validate_quantity(name, quantity)?;
        let item = self
            .find_mut(name)
            .ok_or_else(|| LedgerError::UnknownItem(name.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    /// Subtracts every usage of a cooked recipe from stock.
    pub fn deduct_for_recipe(&mut self, usages: &[RecipeIngredientUsage]) -> DeductionReport {
        let mut report = DeductionReport::default();
        for usage in usages {
            report.push(self.deduct_one(usage));
        }
        report
    }

    /// Reports what [`deduct_for_recipe`](Self::deduct_for_recipe) would do
    /// without touching stock.
    pub fn can_cook(&self, usages: &[RecipeIngredientUsage]) -> DeductionReport {
        self.clone().deduct_for_recipe(usages)
    }

    fn deduct_one(&mut self, usage: &RecipeIngredientUsage) -> DeductionOutcome {
        let ingredient = usage.name.clone();

        if !usage.quantity.is_finite() || usage.quantity < 0.0 {
            warn!(%ingredient, quantity = usage.quantity, "invalid usage quantity");
            return DeductionOutcome::InvalidQuantity {
                ingredient,
                quantity: usage.quantity,
            };
        }

        let Some(item) = self.find_mut(&usage.name) else {
            warn!(%ingredient, "ingredient not found in pantry");
            return DeductionOutcome::NotFound { ingredient };
        };

        if !item.quantity.is_finite() || item.quantity < 0.0 {
            warn!(%ingredient, quantity = item.quantity, "invalid pantry stock");
            return DeductionOutcome::InvalidQuantity {
                ingredient,
                quantity: item.quantity,
            };
        }

        let needed = match convert(usage.quantity, &usage.unit, &item.unit) {
            Ok(needed) => needed,
            Err(e) => {
                warn!(%ingredient, error = %e, "unit conversion failed during deduction");
                return DeductionOutcome::ConversionFailed {
                    ingredient,
                    from: usage.unit.clone(),
                    to: item.unit.clone(),
                };
            }
        };

        if item.quantity < needed {
            warn!(
                %ingredient,
                needed,
                available = item.quantity,
                "insufficient stock"
            );
            return DeductionOutcome::Insufficient {
                ingredient,
                needed,
                available: item.quantity,
                unit: item.unit.clone(),
            };
        }

        item.quantity = (item.quantity - needed).max(0.0);
        debug!(%ingredient, used = needed, remaining = item.quantity, "deducted from pantry");
        DeductionOutcome::Deducted {
            ingredient,
            used: needed,
            remaining: item.quantity,
            unit: item.unit.clone(),
        }
    }
}

impl TryFrom<Vec<PantryStockItem>> for PantryLedger {
    type Error = LedgerError;

    fn try_from(items: Vec<PantryStockItem>) -> Result<Self, Self::Error> {
        PantryLedger::try_new(items)
    }
}

impl From<PantryLedger> for Vec<PantryStockItem> {
    fn from(ledger: PantryLedger) -> Self {
        ledger.items
    }
}

/// Functional form of [`PantryLedger::deduct_for_recipe`]: consumes a stock
/// snapshot and returns the updated snapshot with its report.
pub fn deduct_for_recipe(
    usages: &[RecipeIngredientUsage],
    pantry: Vec<PantryStockItem>,
) -> Deduction {
    let mut ledger = PantryLedger::new(pantry);
    let report = ledger.deduct_for_recipe(usages);
    Deduction {
        pantry: ledger.into_items(),
        report,
    }
}
