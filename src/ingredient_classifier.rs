//! # Ingredient Classifier
//!
//! Splits free-text ingredient lists into tokens and partitions a recipe's
//! ingredients into the ones the user has ("matched") and the ones they are
//! missing, using the fuzzy matcher for every (recipe, user) token pair.

use log::debug;
use std::collections::HashSet;

use crate::fuzzy_matcher::FuzzyMatcher;

/// Outcome of comparing one recipe's ingredients with the user's ingredients
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Recipe ingredients accepted against at least one user token, in recipe order
    pub matched: Vec<String>,
    /// Recipe ingredients no user token was accepted against, in recipe order
    pub missing: Vec<String>,
    /// Number of accepted (recipe ingredient, user token) pairs
    pub accepted_pairs: usize,
}

impl Classification {
    pub fn has_matches(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Split a comma-separated ingredient list into trimmed, non-empty tokens
///
/// Duplicates are kept: a user listing "salt" twice gets two tokens.
pub fn split_ingredients(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Split a comma-separated ingredient list and drop repeated ingredients
///
/// Repeats are detected case-insensitively; the first spelling seen is kept
/// and first-seen order is preserved.
pub fn unique_ingredients(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    split_ingredients(text)
        .into_iter()
        .filter(|token| seen.insert(token.to_lowercase()))
        .collect()
}

/// Classify recipe ingredients against user tokens with the default matcher
pub fn classify(recipe_ingredients: &[&str], user_ingredients: &[&str]) -> Classification {
    classify_with(&FuzzyMatcher::default(), recipe_ingredients, user_ingredients)
}

/// Classify recipe ingredients against user tokens
///
/// `recipe_ingredients` is expected to be deduplicated already (see
/// [`unique_ingredients`]); `user_ingredients` is used as given, so a user
/// token listed twice counts twice towards `accepted_pairs`.
pub fn classify_with(
    matcher: &FuzzyMatcher,
    recipe_ingredients: &[&str],
    user_ingredients: &[&str],
) -> Classification {
    let mut classification = Classification::default();

    for &ingredient in recipe_ingredients {
        let hits = user_ingredients
            .iter()
            .filter(|user| matcher.matches(ingredient, user))
            .count();

        if hits > 0 {
            classification.matched.push(ingredient.to_string());
            classification.accepted_pairs += hits;
        } else {
            classification.missing.push(ingredient.to_string());
        }
    }

    debug!(
        "Classified {} ingredients: {} matched, {} missing, {} accepted pairs",
        recipe_ingredients.len(),
        classification.matched.len(),
        classification.missing.len(),
        classification.accepted_pairs
    );

    classification
}
