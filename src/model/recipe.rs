use super::{Cuisine, Diet, IngredientId, MealType, RecipeIngredientUsage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Nutrition facts for one serving.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
    pub calories: f64,
    /// Grams
    pub protein: f64,
    /// Grams
    pub fat: f64,
    /// Grams
    pub carbs: f64,
}

/// A recipe document as stored by a repository.
///
/// # Examples
///
/// ```
/// use pantry_find::Recipe;
///
/// let recipe: Recipe = serde_json::from_str(r#"{
///     "name": "Garlic Butter Pasta",
///     "totalTimeMinutes": 20,
///     "rating": 4.4,
///     "mealTypes": ["DINNER"],
///     "ingredients": [{"name": "Pasta", "quantity": 200, "unit": "g"}]
/// }"#)?;
/// assert_eq!(recipe.ingredients.len(), 1);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub total_time_minutes: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default)]
    pub meal_types: BTreeSet<MealType>,
    #[serde(default)]
    pub cuisines: BTreeSet<Cuisine>,
    #[serde(default)]
    pub diets: BTreeSet<Diet>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientUsage>,
    #[serde(default)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Recipe {
    /// Identifiers of every ingredient the recipe uses.
    pub fn ingredient_ids(&self) -> BTreeSet<IngredientId> {
        self.ingredients.iter().map(|usage| usage.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Unit;
    use indoc::indoc;

    #[test]
    fn test_recipe_from_yaml() {
        let yaml = indoc! {r#"
            name: Beef Stew
            totalTimeMinutes: 150
            rating: 4.7
            servings: 4
            mealTypes: [dinner]
            cuisines: [French]
            ingredients:
              - { name: Beef, quantity: 1, unit: kg }
              - { name: Onion, quantity: 2, unit: pcs }
            nutrition: { calories: 620, protein: 48, fat: 30, carbs: 35 }
            equipment: [dutch oven]
        "#};

        let recipe: Recipe = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(recipe.total_time_minutes, 150);
        assert_eq!(recipe.servings, Some(4));
        assert!(recipe.meal_types.contains(&MealType::Dinner));
        assert!(recipe.cuisines.contains(&Cuisine::French));
        assert_eq!(recipe.ingredients[0].unit, Unit::Kilogram);
        assert_eq!(recipe.nutrition.protein, 48.0);
        assert_eq!(recipe.equipment, vec!["dutch oven"]);
    }

    #[test]
    fn test_ingredient_ids() {
        let recipe = Recipe {
            name: "Aglio e Olio".to_string(),
            total_time_minutes: 15,
            rating: 4.0,
            servings: None,
            meal_types: BTreeSet::new(),
            cuisines: BTreeSet::new(),
            diets: BTreeSet::new(),
            ingredients: vec![
                RecipeIngredientUsage::new("Olive Oil", 3.0, Unit::Tablespoon),
                RecipeIngredientUsage::new("garlic", 4.0, Unit::Clove),
            ],
            nutrition: Nutrition::default(),
            equipment: Vec::new(),
            image_url: None,
        };

        let ids = recipe.ingredient_ids();
        assert!(ids.contains(&IngredientId::new("OLIVE_OIL")));
        assert!(ids.contains(&IngredientId::new("GARLIC")));
    }
}
