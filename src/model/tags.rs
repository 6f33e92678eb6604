use super::normalize_key;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An enumerated label with a fixed set of known values and an open `Other` escape.
///
/// Tags serialize as their canonical upper snake-case name. Names that match no
/// known value are preserved in the `Other` variant rather than rejected, so
/// values coming from a backend never get lost on a round trip.
pub trait Tag: Sized + Clone + Ord + 'static {
    /// All known (non-`Other`) values, in declaration order.
    fn known() -> &'static [Self];

    /// Upper snake-case name, e.g. `GLUTEN_FREE`.
    fn canonical_name(&self) -> &str;

    /// Human-readable name, e.g. `Gluten-Free`.
    fn display_name(&self) -> &str;
}

macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($canonical:literal, $display:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            const KNOWN: &'static [$name] = &[$($name::$variant),+];

            /// Resolves a stored or user-provided name, falling back to `Other`.
            pub fn from_name(name: &str) -> Self {
                let key = normalize_key(name);
                $(
                    if key == $canonical || key == normalize_key($display) {
                        return $name::$variant;
                    }
                )+
                $name::Other(name.trim().to_string())
            }
        }

        impl Tag for $name {
            fn known() -> &'static [Self] {
                Self::KNOWN
            }

            fn canonical_name(&self) -> &str {
                match self {
                    $($name::$variant => $canonical,)+
                    $name::Other(name) => name,
                }
            }

            fn display_name(&self) -> &str {
                match self {
                    $($name::$variant => $display,)+
                    $name::Other(name) => name,
                }
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::from_name(&name)
            }
        }

        impl From<$name> for String {
            fn from(tag: $name) -> Self {
                tag.canonical_name().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.display_name())
            }
        }
    };
}

tag_enum! {
    /// Dietary restriction or preference a recipe satisfies.
    Diet {
        Vegetarian => ("VEGETARIAN", "Vegetarian"),
        Vegan => ("VEGAN", "Vegan"),
        Pescatarian => ("PESCATARIAN", "Pescatarian"),
        GlutenFree => ("GLUTEN_FREE", "Gluten-Free"),
        DairyFree => ("DAIRY_FREE", "Dairy-Free"),
        NutFree => ("NUT_FREE", "Nut-Free"),
        Keto => ("KETO", "Keto"),
        Paleo => ("PALEO", "Paleo"),
        LowCarb => ("LOW_CARB", "Low-Carb"),
        HighProtein => ("HIGH_PROTEIN", "High-Protein"),
    }
}

tag_enum! {
    /// Culinary tradition of a recipe.
    Cuisine {
        American => ("AMERICAN", "American"),
        Chinese => ("CHINESE", "Chinese"),
        French => ("FRENCH", "French"),
        Greek => ("GREEK", "Greek"),
        Indian => ("INDIAN", "Indian"),
        Italian => ("ITALIAN", "Italian"),
        Japanese => ("JAPANESE", "Japanese"),
        Korean => ("KOREAN", "Korean"),
        Mediterranean => ("MEDITERRANEAN", "Mediterranean"),
        Mexican => ("MEXICAN", "Mexican"),
        MiddleEastern => ("MIDDLE_EASTERN", "Middle Eastern"),
        Thai => ("THAI", "Thai"),
        Vietnamese => ("VIETNAMESE", "Vietnamese"),
    }
}

tag_enum! {
    /// Course or occasion a recipe is meant for.
    MealType {
        Breakfast => ("BREAKFAST", "Breakfast"),
        Lunch => ("LUNCH", "Lunch"),
        Dinner => ("DINNER", "Dinner"),
        Snack => ("SNACK", "Snack"),
        Dessert => ("DESSERT", "Dessert"),
        Appetizer => ("APPETIZER", "Appetizer"),
        SideDish => ("SIDE_DISH", "Side Dish"),
    }
}

tag_enum! {
    /// Shelf grouping used to organize pantry stock.
    PantryCategory {
        Produce => ("PRODUCE", "Produce"),
        Dairy => ("DAIRY", "Dairy"),
        Meat => ("MEAT", "Meat"),
        Seafood => ("SEAFOOD", "Seafood"),
        Grains => ("GRAINS", "Grains & Pasta"),
        Baking => ("BAKING", "Baking"),
        Spices => ("SPICES", "Spices & Herbs"),
        Condiments => ("CONDIMENTS", "Oils & Condiments"),
        Canned => ("CANNED", "Canned Goods"),
        Beverages => ("BEVERAGES", "Beverages"),
    }
}

tag_enum! {
    /// Where a pantry item is physically kept.
    StorageLocation {
        Pantry => ("PANTRY", "Pantry"),
        Fridge => ("FRIDGE", "Fridge"),
        Freezer => ("FREEZER", "Freezer"),
    }
}

impl Default for StorageLocation {
    fn default() -> Self {
        StorageLocation::Pantry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_accepts_canonical_and_display_forms() {
        assert_eq!(Diet::from_name("GLUTEN_FREE"), Diet::GlutenFree);
        assert_eq!(Diet::from_name("gluten-free"), Diet::GlutenFree);
        assert_eq!(Diet::from_name("Gluten Free"), Diet::GlutenFree);
        assert_eq!(MealType::from_name("side dish"), MealType::SideDish);
        assert_eq!(Cuisine::from_name("Middle Eastern"), Cuisine::MiddleEastern);
    }

    #[test]
    fn test_unknown_name_falls_back_to_other() {
        assert_eq!(
            Cuisine::from_name(" Peruvian "),
            Cuisine::Other("Peruvian".to_string())
        );
        assert_eq!(
            Cuisine::Other("Peruvian".to_string()).canonical_name(),
            "Peruvian"
        );
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&vec![Diet::LowCarb, Diet::Vegan]).unwrap();
        assert_eq!(json, r#"["LOW_CARB","VEGAN"]"#);

        let parsed: Vec<Diet> = serde_json::from_str(r#"["VEGAN","FRUITARIAN"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![Diet::Vegan, Diet::Other("FRUITARIAN".to_string())]
        );
    }

    #[test]
    fn test_known_excludes_other() {
        assert_eq!(MealType::known().len(), 7);
        assert!(StorageLocation::known()
            .iter()
            .all(|l| !matches!(l, StorageLocation::Other(_))));
    }

    #[test]
    fn test_display_uses_display_name() {
        assert_eq!(PantryCategory::Grains.to_string(), "Grains & Pasta");
        assert_eq!(StorageLocation::default().to_string(), "Pantry");
    }
}
