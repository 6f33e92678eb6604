use crate::convert::format_quantity;
use crate::model::{PantryStockItem, Unit};
use serde::{Deserialize, Serialize};

/// What happened to one recipe ingredient during a deduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DeductionOutcome {
    /// Stock was reduced. `used` and `remaining` are in the pantry item's unit.
    Deducted {
        ingredient: String,
        used: f64,
        remaining: f64,
        unit: Unit,
    },
    /// No pantry item carries this name.
    NotFound { ingredient: String },
    /// The recipe's unit cannot be expressed in the pantry item's unit.
    ConversionFailed {
        ingredient: String,
        from: Unit,
        to: Unit,
    },
    /// Stock is lower than what the recipe needs; nothing was deducted.
    Insufficient {
        ingredient: String,
        needed: f64,
        available: f64,
        unit: Unit,
    },
    /// The recipe asked for, or the pantry holds, a negative or non-finite amount.
    InvalidQuantity { ingredient: String, quantity: f64 },
}

impl DeductionOutcome {
    pub fn ingredient(&self) -> &str {
        match self {
            DeductionOutcome::Deducted { ingredient, .. }
            | DeductionOutcome::NotFound { ingredient }
            | DeductionOutcome::ConversionFailed { ingredient, .. }
            | DeductionOutcome::Insufficient { ingredient, .. }
            | DeductionOutcome::InvalidQuantity { ingredient, .. } => ingredient,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeductionOutcome::Deducted { .. })
    }

    /// Short status key, matching the serialized `status` tag.
    pub fn status(&self) -> &'static str {
        match self {
            DeductionOutcome::Deducted { .. } => "deducted",
            DeductionOutcome::NotFound { .. } => "notFound",
            DeductionOutcome::ConversionFailed { .. } => "conversionFailed",
            DeductionOutcome::Insufficient { .. } => "insufficient",
            DeductionOutcome::InvalidQuantity { .. } => "invalidQuantity",
        }
    }

    /// A one-line, user-facing description.
    pub fn message(&self) -> String {
        match self {
            DeductionOutcome::Deducted {
                ingredient,
                used,
                remaining,
                unit,
            } => format!(
                "Used {} {unit} of {ingredient}, {} {unit} left",
                format_quantity(*used),
                format_quantity(*remaining)
            ),
            DeductionOutcome::NotFound { ingredient } => {
                format!("{ingredient} is not in your pantry")
            }
            DeductionOutcome::ConversionFailed {
                ingredient,
                from,
                to,
            } => format!("Cannot convert {ingredient} from {from} to {to}"),
            DeductionOutcome::Insufficient {
                ingredient,
                needed,
                available,
                unit,
            } => format!(
                "Not enough {ingredient}: need {} {unit}, have {} {unit}",
                format_quantity(*needed),
                format_quantity(*available)
            ),
            DeductionOutcome::InvalidQuantity {
                ingredient,
                quantity,
            } => format!("Invalid amount of {ingredient}: {quantity}"),
        }
    }
}

/// Per-ingredient outcomes of one deduction pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionReport {
    pub outcomes: Vec<DeductionOutcome>,
    /// True if any ingredient was short
    pub has_insufficient: bool,
}

impl DeductionReport {
    pub(crate) fn push(&mut self, outcome: DeductionOutcome) {
        if matches!(outcome, DeductionOutcome::Insufficient { .. }) {
            self.has_insufficient = true;
        }
        self.outcomes.push(outcome);
    }

    /// Outcomes that did not deduct anything.
    pub fn warnings(&self) -> impl Iterator<Item = &DeductionOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn all_deducted(&self) -> bool {
        self.outcomes.iter().all(DeductionOutcome::is_success)
    }
}

/// The functional form of a deduction: the updated stock plus its report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deduction {
    pub pantry: Vec<PantryStockItem>,
    pub report: DeductionReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = DeductionOutcome::Insufficient {
            ingredient: "Flour".to_string(),
            needed: 300.0,
            available: 100.0,
            unit: Unit::Gram,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "insufficient");
        assert_eq!(json["status"], outcome.status());
        assert_eq!(json["unit"], "g");
        assert_eq!(json["needed"], 300.0);
    }

    #[test]
    fn test_messages() {
        let outcome = DeductionOutcome::Deducted {
            ingredient: "Milk".to_string(),
            used: 250.0,
            remaining: 737.5,
            unit: Unit::Milliliter,
        };
        assert_eq!(outcome.message(), "Used 250 ml of Milk, 737.5 ml left");

        let outcome = DeductionOutcome::Insufficient {
            ingredient: "Flour".to_string(),
            needed: 0.3333,
            available: 0.1,
            unit: Unit::Kilogram,
        };
        assert_eq!(outcome.message(), "Not enough Flour: need 0.3 kg, have 0.1 kg");
    }

    #[test]
    fn test_report_tracks_insufficient() {
        let mut report = DeductionReport::default();
        report.push(DeductionOutcome::NotFound {
            ingredient: "Saffron".to_string(),
        });
        assert!(!report.has_insufficient);
        assert!(!report.all_deducted());

        report.push(DeductionOutcome::Insufficient {
            ingredient: "Flour".to_string(),
            needed: 2.0,
            available: 1.0,
            unit: Unit::Kilogram,
        });
        assert!(report.has_insufficient);
        assert_eq!(report.warnings().count(), 2);
    }
}
