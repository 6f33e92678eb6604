//! Unit conversion and quantity formatting.
//!
//! Weight converts through grams and volume through millilitres. Count and
//! other units only convert to themselves.

use crate::model::{Dimension, Unit};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Cannot convert {from} ({from_dimension}) to {to} ({to_dimension})")]
    IncompatibleUnits {
        from: Unit,
        to: Unit,
        from_dimension: Dimension,
        to_dimension: Dimension,
    },
}

impl ConversionError {
    fn incompatible(from: &Unit, to: &Unit) -> Self {
        ConversionError::IncompatibleUnits {
            from: from.clone(),
            to: to.clone(),
            from_dimension: from.dimension(),
            to_dimension: to.dimension(),
        }
    }
}

/// Converts `quantity` from one unit to another of the same dimension.
///
/// No rounding is applied; use [`format_quantity`] for display.
///
/// # Errors
///
/// Returns `ConversionError::IncompatibleUnits` when the units measure
/// different dimensions, or when they are distinct count/other units.
///
/// # Examples
///
/// ```
/// use pantry_find::{convert, Unit};
///
/// let grams = convert(1.5, &Unit::Kilogram, &Unit::Gram)?;
/// assert_eq!(grams, 1500.0);
/// assert!(convert(1.0, &Unit::Gram, &Unit::Cup).is_err());
/// # Ok::<(), pantry_find::ConversionError>(())
/// ```
pub fn convert(quantity: f64, from: &Unit, to: &Unit) -> Result<f64, ConversionError> {
    if from.dimension() != to.dimension() {
        return Err(ConversionError::incompatible(from, to));
    }

    match (from.base_factor(), to.base_factor()) {
        (Some(from_factor), Some(to_factor)) => Ok(quantity * from_factor / to_factor),
        _ if from == to => Ok(quantity),
        _ => Err(ConversionError::incompatible(from, to)),
    }
}

/// Formats a quantity for display with at most one fractional digit.
///
/// - `0.0` -> `"0"`
/// - `2.0` -> `"2"`
/// - `2.25` -> `"2.3"` (rounds half away from zero)
/// - `2.04` -> `"2"` (a trailing `.0` is dropped after rounding)
pub fn format_quantity(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
