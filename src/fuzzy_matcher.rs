//! # Fuzzy Token Matcher
//!
//! Decides whether two free-text ingredient names denote the same ingredient.
//!
//! ## Features
//!
//! - Token-set similarity on a 0-100 scale: word order and repeated words don't matter
//! - Punctuation and case are ignored ("Green-Chillies" vs "green chillies")
//! - A fixed acceptance threshold that must be strictly exceeded (80 by default)
//!
//! ## Usage
//!
//! ```rust
//! use cooking_assistant::fuzzy_matcher::{matches, token_set_ratio};
//!
//! assert_eq!(token_set_ratio("red chilli powder", "chilli powder red"), 100);
//! assert!(matches("Urad Dal", "urad dal (split)"));
//! assert!(!matches("rice", "pepper"));
//! ```

use log::trace;
use rapidfuzz::distance::indel;
use std::collections::BTreeSet;

use crate::config::DEFAULT_MATCH_THRESHOLD;

/// Ingredient matcher with a configurable acceptance threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatcher {
    threshold: u8,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl FuzzyMatcher {
    /// Create a matcher accepting pairs whose score is strictly greater than `threshold`
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Similarity of `a` and `b` on a 0-100 scale
    pub fn score(&self, a: &str, b: &str) -> u8 {
        token_set_ratio(a, b)
    }

    /// Check whether `a` and `b` name the same ingredient
    pub fn matches(&self, a: &str, b: &str) -> bool {
        let score = token_set_ratio(a, b);
        let accepted = score > self.threshold;
        trace!("Fuzzy compare '{}' ~ '{}' -> {} ({})", a, b, score, accepted);
        accepted
    }
}

/// Check whether `a` and `b` name the same ingredient using the default threshold
pub fn matches(a: &str, b: &str) -> bool {
    FuzzyMatcher::default().matches(a, b)
}

/// Compute the token-set similarity of two strings (0-100)
///
/// Both strings are normalized, split into word sets, and compared three
/// ways: the shared words against each side's full word list, and the two
/// full word lists against each other. The best of the three wins, so a
/// string whose words are a subset of the other's scores 100.
///
/// Empty input (after normalization) on either side scores 0.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let sect = join(tokens_a.intersection(&tokens_b));
    let only_a = join(tokens_a.difference(&tokens_b));
    let only_b = join(tokens_b.difference(&tokens_a));

    let combined_a = format!("{} {}", sect, only_a).trim().to_string();
    let combined_b = format!("{} {}", sect, only_b).trim().to_string();

    [
        ratio(&sect, &combined_a),
        ratio(&sect, &combined_b),
        ratio(&combined_a, &combined_b),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

/// Lowercase, drop non-ASCII characters, and turn everything except letters,
/// digits and underscores into whitespace
fn normalize(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn join<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

/// Indel similarity of two strings, scaled to 0-100 and rounded half to even
fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let total = a.chars().count() + b.chars().count();
    let distance = indel::distance(a.chars(), b.chars());
    let similarity = (total - distance) as f64 / total as f64;
    (similarity * 100.0).round_ties_even() as u8
}
