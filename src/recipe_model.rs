//! # Recipe and Quantity Data Model
//!
//! This module defines the records the cooking assistant works on: catalog
//! recipes, their structured ingredient quantities, and the scaled quantities
//! derived from them.
//!
//! ## Core Concepts
//!
//! - **Recipe**: A catalog entry keyed by its (case-sensitive) name
//! - **IngredientQuantity**: A quantity expression, unit and ingredient name as stored in the catalog
//! - **QuantityValue**: Either a numeric amount or opaque text that is never scaled
//!
//! ## Usage
//!
//! ```rust
//! use cooking_assistant::recipe_model::{IngredientQuantity, Recipe};
//!
//! let idli = Recipe::new("Idli")
//!     .with_ingredients("rice,urad dal,salt,water,oil")
//!     .with_course("South Indian Breakfast")
//!     .with_diet("Vegetarian")
//!     .with_default_servings(4)
//!     .with_quantity(IngredientQuantity::new("2", "cup", "rice"));
//!
//! assert_eq!(idli.raw_ingredient_count(), 5);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel quantity text that is never scaled
pub const AS_REQUIRED: &str = "as required";

/// A recipe as loaded into the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique, case-sensitive catalog key
    pub name: String,

    /// Translated display name, falls back to `name` when absent
    #[serde(default, alias = "TranslatedRecipeName")]
    pub translated_name: Option<String>,

    /// Raw comma-separated ingredient names used for matching
    #[serde(default, alias = "P-Ingredients")]
    pub ingredients: String,

    /// Free-text course label (e.g. "South Indian Breakfast")
    #[serde(default)]
    pub course: String,

    /// Free-text diet label (e.g. "Vegetarian")
    #[serde(default)]
    pub diet: String,

    /// Number of servings the structured quantities are written for, required in catalog data
    #[serde(alias = "DefaultServings")]
    pub default_servings: u32,

    /// Structured per-ingredient quantities
    #[serde(default, alias = "Ingredients")]
    pub quantities: Vec<IngredientQuantity>,

    #[serde(default, alias = "image-url")]
    pub image_url: String,

    #[serde(default, alias = "TotalTimeInMins")]
    pub total_time_minutes: u32,
}

/// A single structured ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    /// Quantity expression: a decimal, a simple fraction "a/b", "as required", or free text
    #[serde(alias = "Quantity")]
    pub quantity: String,

    /// Unit of measurement, possibly empty
    #[serde(default, alias = "Unit")]
    pub unit: String,

    /// Ingredient name
    #[serde(default, alias = "Name")]
    pub name: String,
}

/// A quantity after interpretation: numeric amounts scale, opaque text never does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityValue {
    /// A parsed amount (from a decimal or a fraction)
    Numeric(f64),
    /// Text kept verbatim ("as required", ranges, descriptive amounts)
    Opaque(String),
}

/// An ingredient line with its scaled quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredient {
    pub name: String,
    pub unit: String,
    pub quantity: QuantityValue,
}

/// A recipe rescaled to a requested number of servings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledRecipe {
    pub recipe_name: String,
    pub desired_servings: u32,
    pub default_servings: u32,
    pub ingredients: Vec<ScaledIngredient>,
    pub image_url: String,
    pub course: String,
    pub diet: String,
}

impl Recipe {
    /// Create a new recipe with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            translated_name: None,
            ingredients: String::new(),
            course: String::new(),
            diet: String::new(),
            default_servings: 1,
            quantities: Vec::new(),
            image_url: String::new(),
            total_time_minutes: 0,
        }
    }

    /// Set the raw comma-separated ingredient list
    pub fn with_ingredients(mut self, ingredients: &str) -> Self {
        self.ingredients = ingredients.to_string();
        self
    }

    /// Set the course label
    pub fn with_course(mut self, course: &str) -> Self {
        self.course = course.to_string();
        self
    }

    /// Set the diet label
    pub fn with_diet(mut self, diet: &str) -> Self {
        self.diet = diet.to_string();
        self
    }

    /// Set the default serving count
    pub fn with_default_servings(mut self, servings: u32) -> Self {
        self.default_servings = servings;
        self
    }

    /// Append a structured ingredient quantity
    pub fn with_quantity(mut self, quantity: IngredientQuantity) -> Self {
        self.quantities.push(quantity);
        self
    }

    /// Set the translated display name
    pub fn with_translated_name(mut self, translated_name: &str) -> Self {
        self.translated_name = Some(translated_name.to_string());
        self
    }

    /// Set the image reference
    pub fn with_image_url(mut self, image_url: &str) -> Self {
        self.image_url = image_url.to_string();
        self
    }

    /// Set the total preparation time
    pub fn with_total_time(mut self, minutes: u32) -> Self {
        self.total_time_minutes = minutes;
        self
    }

    /// Name shown to users
    pub fn display_name(&self) -> &str {
        match &self.translated_name {
            Some(translated) if !translated.trim().is_empty() => translated,
            _ => &self.name,
        }
    }

    /// Number of comma-separated tokens in the raw ingredient list, duplicates included
    pub fn raw_ingredient_count(&self) -> usize {
        self.ingredients.split(',').count()
    }
}

impl IngredientQuantity {
    pub fn new(quantity: &str, unit: &str, name: &str) -> Self {
        Self {
            quantity: quantity.to_string(),
            unit: unit.to_string(),
            name: name.to_string(),
        }
    }

    /// Check if this line uses the "as required" sentinel
    pub fn is_as_required(&self) -> bool {
        self.quantity.trim().eq_ignore_ascii_case(AS_REQUIRED)
    }
}

impl QuantityValue {
    /// Numeric amount, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            QuantityValue::Numeric(value) => Some(*value),
            QuantityValue::Opaque(_) => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, QuantityValue::Opaque(_))
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityValue::Numeric(amount) => {
                if amount.fract() == 0.0 {
                    write!(f, "{}", *amount as i64)
                } else {
                    write!(f, "{}", amount)
                }
            }
            QuantityValue::Opaque(text) => write!(f, "{}", text),
        }
    }
}

impl fmt::Display for ScaledIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{} {}", self.quantity, self.name)
        } else {
            write!(f, "{} {} {}", self.quantity, self.unit, self.name)
        }
    }
}
