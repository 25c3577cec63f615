//! # Quantity Scaler
//!
//! This module rescales a recipe's ingredient quantities for a different
//! number of servings.
//!
//! ## Features
//!
//! - Parse quantity text as a simple fraction ("1/2") or a plain decimal ("2", "0.75")
//! - Pass "as required" through untouched
//! - Leave anything else (ranges, "a pinch", "2-3") exactly as written instead of failing
//! - Round scaled amounts to 2 decimal places, halves rounded away from zero
//!
//! ## Usage
//!
//! ```rust
//! use cooking_assistant::quantity_scaler::scale;
//! use cooking_assistant::recipe_model::{IngredientQuantity, QuantityValue};
//!
//! let ingredients = vec![
//!     IngredientQuantity::new("1/2", "cup", "sugar"),
//!     IngredientQuantity::new("as required", "", "salt"),
//! ];
//! let scaled = scale(&ingredients, 4, 8)?;
//!
//! assert_eq!(scaled[0].quantity, QuantityValue::Numeric(1.0));
//! assert_eq!(scaled[1].quantity, QuantityValue::Opaque("as required".to_string()));
//! # Ok::<(), cooking_assistant::errors::AssistantError>(())
//! ```

use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;

use crate::errors::{AssistantError, Result};
use crate::recipe_model::{
    IngredientQuantity, QuantityValue, Recipe, ScaledIngredient, ScaledRecipe, AS_REQUIRED,
};

lazy_static! {
    /// Matches simple fractions: "1/2", "3/4", "-1/3"
    static ref FRACTION: Regex =
        Regex::new(r"^([+-]?\d+)/(\d+)$").expect("Fraction pattern should be valid");
    /// Matches plain decimals: "2", "0.75", ".5", "1e2"
    static ref DECIMAL: Regex = Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$")
        .expect("Decimal pattern should be valid");
}

/// Interpret quantity text
///
/// Returns `Numeric` for a simple fraction or a plain decimal and `Opaque`
/// (holding the text exactly as given) for "as required" and for anything
/// that does not parse. A fraction with a zero denominator is opaque.
pub fn parse_quantity(text: &str) -> QuantityValue {
    let trimmed = text.trim();

    let parsed = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(AS_REQUIRED) {
        None
    } else if trimmed.contains('/') {
        parse_fraction(trimmed)
    } else {
        parse_decimal(trimmed)
    };

    match parsed {
        Some(value) => QuantityValue::Numeric(value),
        None => {
            trace!("Quantity '{}' kept as text", text);
            QuantityValue::Opaque(text.to_string())
        }
    }
}

fn parse_fraction(text: &str) -> Option<f64> {
    let captures = FRACTION.captures(text)?;
    let numerator: f64 = captures[1].parse().ok()?;
    let denominator: f64 = captures[2].parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn parse_decimal(text: &str) -> Option<f64> {
    if !DECIMAL.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Round to 2 decimal places, halves away from zero
///
/// The halfway test runs on `value * 100.0`, not on the exact binary value of
/// `value`. A product such as `1.115 * 100.0` lands exactly on `111.5` and
/// rounds up to 1.12, even though the stored `1.115` is slightly below the
/// halfway point.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scale one ingredient line by `factor`
pub fn scale_ingredient(ingredient: &IngredientQuantity, factor: f64) -> ScaledIngredient {
    let quantity = match parse_quantity(&ingredient.quantity) {
        QuantityValue::Numeric(value) => {
            QuantityValue::Numeric(round_to_hundredths(value * factor))
        }
        opaque => opaque,
    };

    ScaledIngredient {
        name: ingredient.name.clone(),
        unit: ingredient.unit.clone(),
        quantity,
    }
}

/// Rescale ingredient quantities from `default_servings` to `desired_servings`
///
/// Both serving counts must be positive.
pub fn scale(
    ingredients: &[IngredientQuantity],
    default_servings: u32,
    desired_servings: u32,
) -> Result<Vec<ScaledIngredient>> {
    if default_servings == 0 {
        return Err(AssistantError::validation("default servings must be positive"));
    }
    if desired_servings == 0 {
        return Err(AssistantError::validation("desired servings must be positive"));
    }

    let factor = f64::from(desired_servings) / f64::from(default_servings);
    debug!(
        "Scaling {} ingredients from {} to {} servings (factor {:.3})",
        ingredients.len(),
        default_servings,
        desired_servings,
        factor
    );

    Ok(ingredients
        .iter()
        .map(|ingredient| scale_ingredient(ingredient, factor))
        .collect())
}

/// Rescale a catalog recipe to `desired_servings`
pub fn scale_recipe(recipe: &Recipe, desired_servings: u32) -> Result<ScaledRecipe> {
    let ingredients = scale(&recipe.quantities, recipe.default_servings, desired_servings)
        .map_err(|e| match e {
            AssistantError::Validation(msg) => {
                AssistantError::Validation(format!("{} (recipe '{}')", msg, recipe.name))
            }
            other => other,
        })?;

    info!(
        "Scaled '{}' from {} to {} servings",
        recipe.name, recipe.default_servings, desired_servings
    );

    Ok(ScaledRecipe {
        recipe_name: recipe.name.clone(),
        desired_servings,
        default_servings: recipe.default_servings,
        ingredients,
        image_url: recipe.image_url.clone(),
        course: recipe.course.clone(),
        diet: recipe.diet.clone(),
    })
}
