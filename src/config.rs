//! # Configuration Module
//!
//! This module defines configuration structures for recommendation, scaling
//! and weekly menu assembly, and loads them from the environment.

use log::{debug, info};
use std::env;
use std::str::FromStr;

use crate::errors::{AssistantError, Result};

// Constants for default configuration
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;
pub const MIN_RECIPE_INGREDIENTS: usize = 4; // recipes need strictly more raw tokens than this

/// How side dishes are treated by the weekly menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideDishPolicy {
    /// Side dishes join the lunch/dinner pool
    MergeWithMains,
    /// Side dishes get their own pool and their own daily slot
    #[default]
    Separate,
}

impl FromStr for SideDishPolicy {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "merge" | "merged" | "merge_with_mains" => Ok(SideDishPolicy::MergeWithMains),
            "separate" => Ok(SideDishPolicy::Separate),
            other => Err(AssistantError::validation(format!(
                "unknown side dish policy '{other}', expected 'merge' or 'separate'"
            ))),
        }
    }
}

/// Weekly menu configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Whether side dishes are merged into lunch/dinner or tracked separately
    pub side_dishes: SideDishPolicy,
    /// Whether each day gets a snack/dessert slot
    pub include_snacks: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            side_dishes: SideDishPolicy::Separate,
            include_snacks: true,
        }
    }
}

/// Configuration structure for the cooking assistant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    /// Path to a JSON recipe catalog, used by the binary
    pub catalog_path: Option<String>,
    /// Number of recommendations returned when the caller does not ask for a count
    pub default_top_n: usize,
    /// Token-set similarity (0-100) that must be strictly exceeded for a match
    pub match_threshold: u8,
    /// Recipes need more raw ingredient tokens than this to be recommended
    pub min_recipe_ingredients: usize,
    /// Weekly menu settings
    pub menu: MenuConfig,
    /// Fixed seed for the weekly menu shuffle, random when absent
    pub menu_seed: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_top_n: DEFAULT_TOP_N,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            min_recipe_ingredients: MIN_RECIPE_INGREDIENTS,
            menu: MenuConfig::default(),
            menu_seed: None,
        }
    }
}

impl AssistantConfig {
    /// Load configuration from the process environment (and a `.env` file if present)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, falling back to defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.catalog_path = lookup("RECIPE_CATALOG_PATH").filter(|p| !p.trim().is_empty());

        if let Some(top_n) = parse_var::<usize>(&lookup, "DEFAULT_TOP_N")? {
            if top_n == 0 {
                return Err(AssistantError::validation("DEFAULT_TOP_N must be at least 1"));
            }
            config.default_top_n = top_n;
        }

        if let Some(threshold) = parse_var::<u8>(&lookup, "MATCH_THRESHOLD")? {
            if threshold > 100 {
                return Err(AssistantError::validation(
                    "MATCH_THRESHOLD must be between 0 and 100",
                ));
            }
            config.match_threshold = threshold;
        }

        if let Some(min) = parse_var::<usize>(&lookup, "MIN_RECIPE_INGREDIENTS")? {
            config.min_recipe_ingredients = min;
        }

        if let Some(policy) = parse_var::<SideDishPolicy>(&lookup, "MENU_SIDE_DISHES")? {
            config.menu.side_dishes = policy;
        }

        if let Some(include) = parse_var::<bool>(&lookup, "MENU_INCLUDE_SNACKS")? {
            config.menu.include_snacks = include;
        }

        config.menu_seed = parse_var::<u64>(&lookup, "MENU_SEED")?;

        info!(
            "Loaded configuration: top_n={}, threshold={}, min_ingredients={}, side_dishes={:?}, snacks={}",
            config.default_top_n,
            config.match_threshold,
            config.min_recipe_ingredients,
            config.menu.side_dishes,
            config.menu.include_snacks
        );

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => {
            debug!("Parsing config value {}={}", key, raw);
            raw.trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| AssistantError::validation(format!("invalid {key} '{raw}': {e}")))
        }
    }
}
