//! # Recipe Scorer & Ranker
//!
//! Ranks catalog recipes against the ingredients a user has on hand.
//!
//! For every eligible recipe the ranker classifies its ingredients, drops the
//! recipe if nothing matched, and scores it:
//!
//! - **fuzzy score**: accepted (recipe ingredient, user token) pairs
//! - **rank**: fuzzy score minus the number of missing ingredients
//!
//! Recipes are ordered by rank, then fuzzy score, both descending. Remaining
//! ties keep catalog order.
//!
//! ## Usage
//!
//! ```rust
//! use cooking_assistant::catalog::Catalog;
//! use cooking_assistant::recipe_model::Recipe;
//! use cooking_assistant::recommender::rank;
//!
//! let catalog = Catalog::new(vec![
//!     Recipe::new("Idli").with_ingredients("rice,urad dal,salt,water,oil"),
//! ])?;
//!
//! let results = rank(&catalog, "rice,salt,water,pepper", 10);
//! assert_eq!(results[0].rank, 1);
//! assert_eq!(results[0].missing, "urad dal, oil");
//! # Ok::<(), cooking_assistant::errors::AssistantError>(())
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::catalog::Catalog;
use crate::config::{DEFAULT_MATCH_THRESHOLD, MIN_RECIPE_INGREDIENTS};
use crate::fuzzy_matcher::FuzzyMatcher;
use crate::ingredient_classifier::{classify_with, split_ingredients, unique_ingredients};
use crate::recipe_model::Recipe;

/// Match details for one (user ingredients, recipe) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// Accepted (recipe ingredient, user token) pairs
    pub fuzzy_score: usize,
    /// Fuzzy score minus missing ingredient count
    pub rank: i64,
}

/// One row of a recommendation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecipe {
    /// Catalog key of the recipe
    pub recipe_name: String,
    /// Display (translated) name
    pub name: String,
    /// Missing ingredients, comma separated
    pub missing: String,
    /// Matching ingredients, comma separated
    pub matching: String,
    pub image_url: String,
    pub total_time_minutes: u32,
    pub fuzzy_score: usize,
    pub rank: i64,
}

/// Recipe ranker with its matching threshold and eligibility rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommender {
    matcher: FuzzyMatcher,
    min_recipe_ingredients: usize,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD, MIN_RECIPE_INGREDIENTS)
    }
}

impl Recommender {
    /// Create a ranker accepting matches above `match_threshold` and
    /// considering recipes with more than `min_recipe_ingredients` ingredients
    pub fn new(match_threshold: u8, min_recipe_ingredients: usize) -> Self {
        Self {
            matcher: FuzzyMatcher::new(match_threshold),
            min_recipe_ingredients,
        }
    }

    /// Score one recipe against the user's ingredient tokens
    pub fn evaluate(&self, recipe: &Recipe, user_tokens: &[&str]) -> MatchResult {
        let recipe_tokens = unique_ingredients(&recipe.ingredients);
        let classification = classify_with(&self.matcher, &recipe_tokens, user_tokens);

        let fuzzy_score = classification.accepted_pairs;
        let rank = fuzzy_score as i64 - classification.missing.len() as i64;

        MatchResult {
            matched: classification.matched,
            missing: classification.missing,
            fuzzy_score,
            rank,
        }
    }

    /// Rank eligible catalog recipes against a comma-separated ingredient list
    ///
    /// Recipes without a single matching ingredient are left out. At most
    /// `top_n` rows are returned; fewer if fewer recipes match.
    pub fn rank(
        &self,
        catalog: &Catalog,
        user_ingredients: &str,
        top_n: usize,
    ) -> Vec<RankedRecipe> {
        let user_tokens = split_ingredients(user_ingredients);
        info!(
            "Ranking {} recipes against {} user ingredients",
            catalog.len(),
            user_tokens.len()
        );

        let mut scored: Vec<(&Recipe, MatchResult)> = catalog
            .eligible_for_recommendation(self.min_recipe_ingredients)
            .filter_map(|recipe| {
                let result = self.evaluate(recipe, &user_tokens);
                if result.matched.is_empty() {
                    return None;
                }
                debug!(
                    "Recipe '{}': score={}, missing={}, rank={}",
                    recipe.name,
                    result.fuzzy_score,
                    result.missing.len(),
                    result.rank
                );
                Some((recipe, result))
            })
            .collect();

        // Stable sort keeps catalog order for full ties
        scored.sort_by_key(|(_, result)| (Reverse(result.rank), Reverse(result.fuzzy_score)));

        let ranked: Vec<RankedRecipe> = scored
            .into_iter()
            .take(top_n)
            .map(|(recipe, result)| RankedRecipe {
                recipe_name: recipe.name.clone(),
                name: recipe.display_name().to_string(),
                missing: result.missing.join(", "),
                matching: result.matched.join(", "),
                image_url: recipe.image_url.clone(),
                total_time_minutes: recipe.total_time_minutes,
                fuzzy_score: result.fuzzy_score,
                rank: result.rank,
            })
            .collect();

        info!("Returning {} recommendations", ranked.len());
        ranked
    }
}

/// Rank catalog recipes with the default threshold and eligibility rule
pub fn rank(catalog: &Catalog, user_ingredients: &str, top_n: usize) -> Vec<RankedRecipe> {
    Recommender::default().rank(catalog, user_ingredients, top_n)
}
