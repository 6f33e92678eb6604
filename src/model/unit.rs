use serde::{Deserialize, Serialize};
use std::fmt;

/// The physical quantity a unit measures. Conversion is only defined inside one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Weight,
    Volume,
    Count,
    Other,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Weight => "weight",
            Dimension::Volume => "volume",
            Dimension::Count => "count",
            Dimension::Other => "other",
        };
        f.write_str(name)
    }
}

/// A measurement unit from the closed kitchen taxonomy.
///
/// Units are stored by their short symbol (`g`, `tbsp`, `pcs`). Strings that
/// match no known unit are kept verbatim in `Other` and only convert to an
/// identical `Other` unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Milligram,
    Gram,
    Kilogram,
    Ounce,
    Pound,
    Milliliter,
    Liter,
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Piece,
    Slice,
    Clove,
    Can,
    Package,
    Bunch,
    Pinch,
    ToTaste,
    Other(String),
}

/// Grams per unit
const GRAMS_PER_MG: f64 = 0.001;
const GRAMS_PER_KG: f64 = 1000.0;
const GRAMS_PER_OZ: f64 = 28.3495;
const GRAMS_PER_LB: f64 = 453.592;

/// Millilitres per unit
const ML_PER_L: f64 = 1000.0;
const ML_PER_TSP: f64 = 5.0;
const ML_PER_TBSP: f64 = 15.0;
const ML_PER_FL_OZ: f64 = 29.5735;
const ML_PER_CUP: f64 = 240.0;

impl Unit {
    /// Parses a unit symbol or common spelling, case-insensitively.
    ///
    /// Never fails: unrecognized input becomes `Unit::Other` with the trimmed
    /// original text.
    pub fn parse(s: &str) -> Unit {
        let key = s.trim().to_lowercase();
        let key = key.trim_end_matches('.');

        match key {
            "mg" | "milligram" | "milligrams" => Unit::Milligram,
            "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Unit::Gram,
            "kg" | "kilo" | "kilos" | "kilogram" | "kilograms" => Unit::Kilogram,
            "oz" | "ounce" | "ounces" => Unit::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => Unit::Pound,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Unit::Milliliter
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liter,
            "tsp" | "teaspoon" | "teaspoons" => Unit::Teaspoon,
            "tbsp" | "tbs" | "tablespoon" | "tablespoons" => Unit::Tablespoon,
            "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => Unit::FluidOunce,
            "cup" | "cups" => Unit::Cup,
            // unitless quantities count whole pieces
            "" | "pc" | "pcs" | "piece" | "pieces" | "whole" | "x" => Unit::Piece,
            "slice" | "slices" => Unit::Slice,
            "clove" | "cloves" => Unit::Clove,
            "can" | "cans" | "tin" | "tins" => Unit::Can,
            "pkg" | "pack" | "package" | "packages" => Unit::Package,
            "bunch" | "bunches" => Unit::Bunch,
            "pinch" | "pinches" => Unit::Pinch,
            "to taste" => Unit::ToTaste,
            _ => Unit::Other(s.trim().to_string()),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Unit::Milligram => "mg",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::FluidOunce => "fl oz",
            Unit::Cup => "cup",
            Unit::Piece => "pcs",
            Unit::Slice => "slice",
            Unit::Clove => "clove",
            Unit::Can => "can",
            Unit::Package => "pkg",
            Unit::Bunch => "bunch",
            Unit::Pinch => "pinch",
            Unit::ToTaste => "to taste",
            Unit::Other(name) => name,
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Milligram | Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => {
                Dimension::Weight
            }
            Unit::Milliliter
            | Unit::Liter
            | Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup => Dimension::Volume,
            Unit::Piece
            | Unit::Slice
            | Unit::Clove
            | Unit::Can
            | Unit::Package
            | Unit::Bunch => Dimension::Count,
            Unit::Pinch | Unit::ToTaste | Unit::Other(_) => Dimension::Other,
        }
    }

    /// Size of one unit in the dimension's base unit (grams or millilitres).
    ///
    /// Returns `None` for count and other units, which have no common base.
    pub fn base_factor(&self) -> Option<f64> {
        let factor = match self {
            Unit::Milligram => GRAMS_PER_MG,
            Unit::Gram | Unit::Milliliter => 1.0,
            Unit::Kilogram => GRAMS_PER_KG,
            Unit::Ounce => GRAMS_PER_OZ,
            Unit::Pound => GRAMS_PER_LB,
            Unit::Liter => ML_PER_L,
            Unit::Teaspoon => ML_PER_TSP,
            Unit::Tablespoon => ML_PER_TBSP,
            Unit::FluidOunce => ML_PER_FL_OZ,
            Unit::Cup => ML_PER_CUP,
            _ => return None,
        };
        Some(factor)
    }
}

impl From<String> for Unit {
    fn from(s: String) -> Self {
        Unit::parse(&s)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.symbol().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Unit::parse("Grams"), Unit::Gram);
        assert_eq!(Unit::parse(" KG "), Unit::Kilogram);
        assert_eq!(Unit::parse("Tbsp."), Unit::Tablespoon);
        assert_eq!(Unit::parse("cups"), Unit::Cup);
        assert_eq!(Unit::parse("fl oz"), Unit::FluidOunce);
        assert_eq!(Unit::parse(""), Unit::Piece);
    }

    #[test]
    fn test_parse_unknown_keeps_name() {
        assert_eq!(Unit::parse("handful"), Unit::Other("handful".to_string()));
        assert_eq!(Unit::parse("handful").dimension(), Dimension::Other);
    }

    #[test]
    fn test_symbol_round_trips_through_parse() {
        let units = [
            Unit::Milligram,
            Unit::Gram,
            Unit::Kilogram,
            Unit::Ounce,
            Unit::Pound,
            Unit::Milliliter,
            Unit::Liter,
            Unit::Teaspoon,
            Unit::Tablespoon,
            Unit::FluidOunce,
            Unit::Cup,
            Unit::Piece,
            Unit::Slice,
            Unit::Clove,
            Unit::Can,
            Unit::Package,
            Unit::Bunch,
            Unit::Pinch,
            Unit::ToTaste,
        ];
        for unit in units {
            assert_eq!(Unit::parse(unit.symbol()), unit);
        }
    }

    #[test]
    fn test_base_factor_only_for_weight_and_volume() {
        assert_eq!(Unit::Kilogram.base_factor(), Some(1000.0));
        assert_eq!(Unit::Cup.base_factor(), Some(240.0));
        assert_eq!(Unit::Clove.base_factor(), None);
        assert_eq!(Unit::Pinch.base_factor(), None);
    }

    #[test]
    fn test_serde_as_symbol() {
        let json = serde_json::to_string(&Unit::Tablespoon).unwrap();
        assert_eq!(json, r#""tbsp""#);
        let unit: Unit = serde_json::from_str(r#""kilograms""#).unwrap();
        assert_eq!(unit, Unit::Kilogram);
    }
}
