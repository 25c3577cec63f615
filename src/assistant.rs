//! # Cooking Assistant Service
//!
//! Entry point for a request-handling layer. Ties the catalog provider and
//! configuration to the recommendation, scaling and weekly menu operations,
//! and validates caller input before it reaches them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::catalog::CatalogProvider;
use crate::config::AssistantConfig;
use crate::errors::{AssistantError, Result};
use crate::menu_planner::{CourseTable, MenuPlanner, WeeklyMenuEntry};
use crate::quantity_scaler;
use crate::recipe_model::{IngredientQuantity, Recipe, ScaledIngredient, ScaledRecipe};
use crate::recommender::{RankedRecipe, Recommender};

/// Recommendation, scaling and menu operations over an injected catalog
pub struct CookingAssistant<P: CatalogProvider> {
    provider: P,
    config: AssistantConfig,
    recommender: Recommender,
    planner: MenuPlanner,
}

impl<P: CatalogProvider> CookingAssistant<P> {
    pub fn new(provider: P, config: AssistantConfig) -> Self {
        let recommender = Recommender::new(config.match_threshold, config.min_recipe_ingredients);
        let planner = MenuPlanner::new(config.menu.clone());
        Self {
            provider,
            config,
            recommender,
            planner,
        }
    }

    /// Use explicit course label assignments for the weekly menu
    pub fn with_course_table(mut self, course_table: CourseTable) -> Self {
        self.planner = self.planner.with_course_table(course_table);
        self
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Recommend recipes for a comma-separated list of ingredients on hand
    ///
    /// `top_n` defaults to the configured count; an explicit zero is rejected.
    pub fn recommend(
        &self,
        user_ingredients: &str,
        top_n: Option<usize>,
    ) -> Result<Vec<RankedRecipe>> {
        let top_n = match top_n {
            Some(0) => return Err(AssistantError::validation("top_n must be at least 1")),
            Some(n) => n,
            None => self.config.default_top_n,
        };

        info!(ingredients = user_ingredients, top_n, "Recommendation requested");
        let catalog = self.provider.catalog()?;
        let results = self.recommender.rank(&catalog, user_ingredients, top_n);

        if results.is_empty() {
            debug!("No recipe matched the supplied ingredients");
        }
        Ok(results)
    }

    /// Look up a recipe by name
    pub fn recipe(&self, name: &str) -> Result<Recipe> {
        let catalog = self.provider.catalog()?;
        catalog.lookup(name).cloned()
    }

    /// Rescale a named recipe, taking the serving count as the caller sent it
    pub fn scale_recipe(&self, recipe_name: &str, desired_servings: &str) -> Result<ScaledRecipe> {
        let desired = parse_servings(desired_servings)?;
        info!(recipe = recipe_name, desired, "Quantity estimation requested");

        let catalog = self.provider.catalog()?;
        let recipe = catalog.lookup(recipe_name).map_err(|e| {
            warn!(recipe = recipe_name, "Recipe not found");
            e
        })?;

        quantity_scaler::scale_recipe(recipe, desired)
    }

    /// Rescale ingredient quantities directly
    pub fn scale(
        &self,
        ingredients: &[IngredientQuantity],
        default_servings: u32,
        desired_servings: u32,
    ) -> Result<Vec<ScaledIngredient>> {
        quantity_scaler::scale(ingredients, default_servings, desired_servings)
    }

    /// Build a weekly menu with the supplied random source
    pub fn weekly_menu_with_rng<S, R>(
        &self,
        preferred_diets: &[S],
        rng: &mut R,
    ) -> Result<Vec<WeeklyMenuEntry>>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        info!(diets = preferred_diets.len(), "Weekly menu requested");
        let catalog = self.provider.catalog()?;
        Ok(self.planner.build_week(&catalog, preferred_diets, rng))
    }

    /// Build a weekly menu, seeded from the configuration when a seed is set
    pub fn weekly_menu<S: AsRef<str>>(
        &self,
        preferred_diets: &[S],
    ) -> Result<Vec<WeeklyMenuEntry>> {
        let mut rng = match self.config.menu_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.weekly_menu_with_rng(preferred_diets, &mut rng)
    }
}

/// Parse a caller-supplied serving count, which must be a positive integer
pub fn parse_servings(raw: &str) -> Result<u32> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        AssistantError::validation(format!(
            "Invalid desired_servings value '{raw}', must be an integer"
        ))
    })?;

    if value <= 0 {
        return Err(AssistantError::validation(format!(
            "desired_servings must be positive, got {value}"
        )));
    }

    u32::try_from(value)
        .map_err(|_| AssistantError::validation(format!("desired_servings {value} is too large")))
}
