//! # Cooking Assistant
//!
//! Recipe recommendation from the ingredients a user has on hand, quantity
//! scaling for a different number of servings, and weekly menu assembly
//! over a read-only recipe catalog.

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod fuzzy_matcher;
pub mod ingredient_classifier;
pub mod menu_planner;
pub mod quantity_scaler;
pub mod recipe_model;
pub mod recommender;

pub use assistant::CookingAssistant;
pub use errors::{AssistantError, Result};
