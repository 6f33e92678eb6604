//! Free-text search query parsing.
//!
//! Turns phrases like "vegan dinner under 30 minutes, no garlic" into a
//! [`FilterSpec`]. Parsing is a best-effort heuristic: anything the patterns
//! do not recognize keeps its default value, and parsing never fails.

use crate::model::{
    clamp, Cuisine, Diet, FilterSpec, IngredientId, MealType, NumericRange, Tag, RATING_BOUNDS,
};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;
use tracing::{debug, warn};

mod config;

pub use config::{ConfigError, IngredientTerm, ParserConfig, RangeConfig};

const NUMBER: &str = r"(\d+(?:\.\d+)?)";

/// The three tiers of a numeric range phrase for one unit keyword.
struct RangePatterns {
    between: Option<Regex>,
    under: Option<Regex>,
    over: Option<Regex>,
}

impl RangePatterns {
    fn new(unit: &str) -> Self {
        RangePatterns {
            between: Regex::new(&format!(
                r"\bbetween\s+{NUMBER}\s*[a-z]*\s+and\s+{NUMBER}\s*{unit}\b"
            ))
            .ok(),
            under: Regex::new(&format!(
                r"\b(?:under|less than|fewer than|below)\s+{NUMBER}\s*{unit}\b"
            ))
            .ok(),
            over: Regex::new(&format!(
                r"\b(?:over|more than|above|at least)\s+{NUMBER}\s*{unit}\b"
            ))
            .ok(),
        }
    }

    /// Applies the first tier that matches; falls back to the default range.
    fn resolve(&self, text: &str, range: &RangeConfig) -> NumericRange {
        let bounds = range.bounds;
        if let Some(caps) = self.between.as_ref().and_then(|re| re.captures(text)) {
            if let (Some(a), Some(b)) = (capture_number(&caps, 1), capture_number(&caps, 2)) {
                return NumericRange::new(a, b).clamped_to(bounds);
            }
        }
        if let Some(caps) = self.under.as_ref().and_then(|re| re.captures(text)) {
            if let Some(n) = capture_number(&caps, 1) {
                return NumericRange::new(bounds.min, n).clamped_to(bounds);
            }
        }
        if let Some(caps) = self.over.as_ref().and_then(|re| re.captures(text)) {
            if let Some(n) = capture_number(&caps, 1) {
                return NumericRange::new(n, bounds.max).clamped_to(bounds);
            }
        }
        range.default
    }
}

static TIME_PATTERNS: LazyLock<RangePatterns> =
    LazyLock::new(|| RangePatterns::new(r"min(?:ute)?s?"));
static CALORIE_PATTERNS: LazyLock<RangePatterns> =
    LazyLock::new(|| RangePatterns::new(r"(?:kcal|calories|cals?)"));
static PROTEIN_PATTERNS: LazyLock<RangePatterns> =
    LazyLock::new(|| RangePatterns::new(r"(?:g|grams?)?\s*(?:of\s+)?protein"));
static FAT_PATTERNS: LazyLock<RangePatterns> =
    LazyLock::new(|| RangePatterns::new(r"(?:g|grams?)?\s*(?:of\s+)?fat"));
static CARBS_PATTERNS: LazyLock<RangePatterns> =
    LazyLock::new(|| RangePatterns::new(r"(?:g|grams?)?\s*(?:of\s+)?carb(?:ohydrate)?s?"));

static RATING_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:(?:at least|minimum|min|over|more than)\s+)?{NUMBER}\s*\+?\s*stars?\b"
    ))
    .ok()
});

static WORD_SEPARATOR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\W+").ok());

static DEFAULT_PARSER: LazyLock<QueryParser> = LazyLock::new(QueryParser::default);

fn capture_number(caps: &regex::Captures<'_>, index: usize) -> Option<f64> {
    caps.get(index)?.as_str().parse().ok()
}

/// An ingredient the parser knows, with its precompiled negation pattern.
struct KnownIngredient {
    id: IngredientId,
    /// Lowercase identifier and display name, matched against whole tokens
    tokens: Vec<String>,
    negation: Option<Regex>,
}

impl KnownIngredient {
    fn new(term: &IngredientTerm) -> Self {
        let raw_id = term.id.as_str().to_lowercase();
        let display = term.display_name.trim().to_lowercase();

        // negation accepts every form inclusion does
        let mut names = vec![raw_id.clone(), term.id.spoken(), display.clone()];
        names.sort();
        names.dedup();
        let alternatives = names
            .iter()
            .filter(|name| !name.is_empty())
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        let negation = if alternatives.is_empty() {
            None
        } else {
            match Regex::new(&format!(r"\b(?:no|without|avoid)\s+(?:{alternatives})")) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(ingredient = %term.id, error = %e, "skipping negation pattern");
                    None
                }
            }
        };

        KnownIngredient {
            id: term.id.clone(),
            tokens: vec![raw_id, display],
            negation,
        }
    }
}

/// Parses free-text search queries into [`FilterSpec`]s.
///
/// A parser is cheap to share: it is immutable after construction and holds
/// only precompiled patterns and configuration.
///
/// # Examples
///
/// ```
/// use pantry_find::{MealType, NumericRange, QueryParser};
///
/// let parser = QueryParser::default();
/// let filter = parser.parse("dinner under 30 minutes");
/// assert_eq!(filter.time_range, NumericRange::new(5.0, 30.0));
/// assert!(filter.meal_types.contains(&MealType::Dinner));
/// ```
pub struct QueryParser {
    config: ParserConfig,
    ingredients: Vec<KnownIngredient>,
}

impl QueryParser {
    pub fn new(config: ParserConfig) -> Self {
        let ingredients = config.ingredients.iter().map(KnownIngredient::new).collect();
        QueryParser {
            config,
            ingredients,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extracts a filter from `query`. Never fails.
    pub fn parse(&self, query: &str) -> FilterSpec {
        let text = query.to_lowercase();
        let config = &self.config;

        let excluded = self.excluded_ingredients(&text);
        let mut included = self.included_ingredients(&text);
        // a negated mention wins over a plain one
        included.retain(|id| !excluded.contains(id));

        let filter = FilterSpec {
            time_range: TIME_PATTERNS.resolve(&text, &config.time),
            min_rating: self.min_rating(&text),
            meal_types: matching_tags::<MealType>(&text),
            cuisines: matching_tags::<Cuisine>(&text),
            diets: matching_tags::<Diet>(&text),
            included_ingredients: included,
            excluded_ingredients: excluded,
            calorie_range: CALORIE_PATTERNS.resolve(&text, &config.calories),
            protein_range: PROTEIN_PATTERNS.resolve(&text, &config.protein),
            fat_range: FAT_PATTERNS.resolve(&text, &config.fat),
            carbs_range: CARBS_PATTERNS.resolve(&text, &config.carbs),
            use_owned_equipment_only: config.use_owned_equipment_only,
        };

        debug!(query, ?filter, "parsed search query");
        filter
    }

    fn min_rating(&self, text: &str) -> f64 {
        RATING_PATTERN
            .as_ref()
            .and_then(|re| re.captures(text))
            .and_then(|caps| capture_number(&caps, 1))
            .map(|rating| clamp(rating, RATING_BOUNDS))
            .unwrap_or(self.config.default_min_rating)
    }

    fn included_ingredients(&self, text: &str) -> BTreeSet<IngredientId> {
        let tokens: HashSet<&str> = match WORD_SEPARATOR.as_ref() {
            Some(re) => re.split(text).filter(|t| !t.is_empty()).collect(),
            None => text.split_whitespace().collect(),
        };

        self.ingredients
            .iter()
            .filter(|known| known.tokens.iter().any(|t| tokens.contains(t.as_str())))
            .map(|known| known.id.clone())
            .collect()
    }

    fn excluded_ingredients(&self, text: &str) -> BTreeSet<IngredientId> {
        self.ingredients
            .iter()
            .filter(|known| known.negation.as_ref().is_some_and(|re| re.is_match(text)))
            .map(|known| known.id.clone())
            .collect()
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        QueryParser::new(ParserConfig::default())
    }
}

/// Every known tag whose spoken or display name occurs in `text`.
fn matching_tags<T: Tag>(text: &str) -> BTreeSet<T> {
    T::known()
        .iter()
        .filter(|tag| {
            let spoken = tag.canonical_name().to_lowercase().replace('_', " ");
            let display = tag.display_name().to_lowercase();
            text.contains(&spoken) || text.contains(&display)
        })
        .cloned()
        .collect()
}

/// Parses `query` with the built-in configuration.
///
/// ```
/// use pantry_find::{parse, IngredientId};
///
/// let filter = parse("no garlic");
/// assert!(filter.excluded_ingredients.contains(&IngredientId::new("GARLIC")));
/// ```
pub fn parse(query: &str) -> FilterSpec {
    DEFAULT_PARSER.parse(query)
}
