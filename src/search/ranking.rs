//! Deterministic keyword scoring over the local catalog.
//!
//! The weights and category markers are tuned heuristics; keep them stable so
//! result ordering stays compatible with the bundled catalog.

use crate::catalog::{RankedRecipe, Recipe};
use tracing::debug;

/// Maximum number of ranked results returned per query
pub const MAX_RESULTS: usize = 12;

pub const EXACT_NAME_WEIGHT: u32 = 25;
pub const NAME_WEIGHT: u32 = 15;
pub const CUISINE_WEIGHT: u32 = 10;
pub const FLAVOR_WEIGHT: u32 = 8;
pub const INGREDIENT_WEIGHT: u32 = 6;
pub const DIFFICULTY_WEIGHT: u32 = 5;
// Low so that words inside long descriptions don't drown out name hits
pub const DESCRIPTION_WEIGHT: u32 = 2;

/// Category markers and the minimum token length (in characters) at which
/// each is stripped: "类" ("kind of") and "菜" ("dish").
pub const CATEGORY_SUFFIXES: &[(char, usize)] = &[('类', 2), ('菜', 3)];

/// Split a raw query into lowercase keywords.
///
/// A token ending in a category marker is followed by its stripped root, so
/// "海鲜类" searches for both "海鲜类" and "海鲜".
pub fn keywords(query: &str) -> Vec<String> {
    let mut keywords = Vec::new();

    for token in query.to_lowercase().split_whitespace() {
        keywords.push(token.to_string());
        if let Some(root) = strip_category_suffix(token) {
            keywords.push(root.to_string());
        }
    }

    keywords
}

fn strip_category_suffix(token: &str) -> Option<&str> {
    let len = token.chars().count();

    CATEGORY_SUFFIXES
        .iter()
        .find(|(marker, min_len)| len >= *min_len && token.ends_with(*marker))
        .map(|(marker, _)| &token[..token.len() - marker.len_utf8()])
}

/// Lowercased copies of the searchable fields of one recipe
struct SearchFields {
    name: String,
    cuisine: String,
    flavor: String,
    ingredients: Vec<String>,
    description: String,
    difficulty: &'static str,
}

impl SearchFields {
    fn new(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.to_lowercase(),
            cuisine: recipe.cuisine.to_lowercase(),
            flavor: recipe.flavor.to_lowercase(),
            ingredients: recipe.ingredients.iter().map(|i| i.to_lowercase()).collect(),
            description: recipe.description.to_lowercase(),
            difficulty: recipe.difficulty.label(),
        }
    }

    fn score_keyword(&self, keyword: &str) -> u32 {
        let mut score = 0;

        // Single characters are too ambiguous for the broader fields
        if keyword.chars().count() == 1 {
            if self.name.contains(keyword) {
                score += NAME_WEIGHT;
            }
            if self.cuisine.contains(keyword) {
                score += CUISINE_WEIGHT;
            }
            return score;
        }

        if self.name == keyword {
            score += EXACT_NAME_WEIGHT;
        }
        if self.name.contains(keyword) {
            score += NAME_WEIGHT;
        }
        if self.cuisine.contains(keyword) {
            score += CUISINE_WEIGHT;
        }
        if self.flavor.contains(keyword) {
            score += FLAVOR_WEIGHT;
        }
        if self.ingredients.iter().any(|i| i.contains(keyword)) {
            score += INGREDIENT_WEIGHT;
        }
        if self.description.contains(keyword) {
            score += DESCRIPTION_WEIGHT;
        }
        if self.difficulty.contains(keyword) {
            score += DIFFICULTY_WEIGHT;
        }

        score
    }
}

/// Total score of a recipe against already-normalized keywords
pub fn score(recipe: &Recipe, keywords: &[String]) -> u32 {
    let fields = SearchFields::new(recipe);
    keywords.iter().map(|k| fields.score_keyword(k)).sum()
}

/// Rank catalog recipes against a free-text query.
///
/// Recipes scoring zero are dropped; the rest are ordered by score, then by
/// cooking time (faster first), and capped at [`MAX_RESULTS`].
pub fn rank(recipes: &[Recipe], query: &str) -> Vec<RankedRecipe> {
    let keywords = keywords(query);
    if keywords.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedRecipe> = recipes
        .iter()
        .filter_map(|recipe| {
            let match_score = score(recipe, &keywords);
            (match_score > 0).then(|| RankedRecipe {
                recipe: recipe.clone(),
                match_score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.match_score
            .cmp(&a.match_score)
            .then(a.recipe.cooking_time.cmp(&b.recipe.cooking_time))
    });

    debug!(
        "Local ranking for {:?}: {} keywords, {} matches",
        query,
        keywords.len(),
        ranked.len()
    );

    ranked.truncate(MAX_RESULTS);
    ranked
}
