use crate::model::{names_match, FilterSpec, Recipe};
use crate::query::QueryParser;
use crate::repository::{RecipeRepository, RepositoryError};
use std::cmp::Ordering;
use tracing::debug;

/// Returns the repository's recipes that satisfy every criterion of `filter`,
/// best rated first.
///
/// `owned_equipment` is only consulted when the filter restricts recipes to
/// owned equipment.
pub fn search_recipes<R: RecipeRepository + ?Sized>(
    repository: &R,
    filter: &FilterSpec,
    owned_equipment: &[String],
) -> Result<Vec<Recipe>, RepositoryError> {
    let mut results: Vec<Recipe> = repository
        .recipes()?
        .into_iter()
        .filter(|recipe| matches_filter(recipe, filter, owned_equipment))
        .collect();

    sort_results(&mut results);
    debug!(count = results.len(), "recipe search finished");
    Ok(results)
}

/// Parses `query` and searches with the resulting filter.
pub fn search_recipes_by_text<R: RecipeRepository + ?Sized>(
    repository: &R,
    parser: &QueryParser,
    query: &str,
    owned_equipment: &[String],
) -> Result<Vec<Recipe>, RepositoryError> {
    let filter = parser.parse(query);
    search_recipes(repository, &filter, owned_equipment)
}

/// Checks one recipe against a filter.
///
/// Meal types and cuisines match if the recipe has any requested value;
/// diets and included ingredients must all be present; excluded ingredients
/// must all be absent.
pub fn matches_filter(recipe: &Recipe, filter: &FilterSpec, owned_equipment: &[String]) -> bool {
    if !filter.time_range.contains(f64::from(recipe.total_time_minutes)) {
        return false;
    }
    if recipe.rating < filter.min_rating {
        return false;
    }

    if !filter.meal_types.is_empty() && filter.meal_types.is_disjoint(&recipe.meal_types) {
        return false;
    }
    if !filter.cuisines.is_empty() && filter.cuisines.is_disjoint(&recipe.cuisines) {
        return false;
    }
    if !filter.diets.is_subset(&recipe.diets) {
        return false;
    }

    let ingredients = recipe.ingredient_ids();
    if !filter.included_ingredients.is_subset(&ingredients) {
        return false;
    }
    if !filter.excluded_ingredients.is_disjoint(&ingredients) {
        return false;
    }

    let nutrition = &recipe.nutrition;
    if !(filter.calorie_range.contains(nutrition.calories)
        && filter.protein_range.contains(nutrition.protein)
        && filter.fat_range.contains(nutrition.fat)
        && filter.carbs_range.contains(nutrition.carbs))
    {
        return false;
    }

    if filter.use_owned_equipment_only {
        let all_owned = recipe
            .equipment
            .iter()
            .all(|needed| owned_equipment.iter().any(|owned| names_match(owned, needed)));
        if !all_owned {
            return false;
        }
    }

    true
}

/// Sort recipes by rating in descending order, then by name
fn sort_results(results: &mut [Recipe]) {
    results.sort_by(|a, b| {
        let rating_cmp = b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal);

        if rating_cmp != Ordering::Equal {
            return rating_cmp;
        }

        a.name.to_lowercase().cmp(&b.name.to_lowercase())
    });
}
