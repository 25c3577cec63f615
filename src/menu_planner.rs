//! # Weekly Menu Assembler
//!
//! Sorts catalog recipes into meal-time buckets from their course labels and
//! draws a seven-day menu from them without repeating a recipe.
//!
//! ## Meal types
//!
//! | Course label contains                       | Meal type      |
//! |---------------------------------------------|----------------|
//! | breakfast, brunch                           | Breakfast      |
//! | main, lunch, dinner, one pot (side: merged) | Lunch/Dinner   |
//! | snack, appetizer, dessert                   | Snack/Dessert  |
//! | side                                        | Side Dish      |
//! | anything else                               | Other (unused) |
//!
//! The first matching row wins. A [`CourseTable`] can pin specific course
//! labels to a meal type before these rules apply.
//!
//! ## Usage
//!
//! ```rust
//! use cooking_assistant::catalog::Catalog;
//! use cooking_assistant::config::MenuConfig;
//! use cooking_assistant::menu_planner::MenuPlanner;
//! use cooking_assistant::recipe_model::Recipe;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let catalog = Catalog::new(vec![
//!     Recipe::new("Poha").with_course("Breakfast"),
//!     Recipe::new("Rajma").with_course("Lunch"),
//! ])?;
//!
//! let planner = MenuPlanner::new(MenuConfig::default());
//! let any_diet: &[&str] = &[];
//! let week = planner.build_week(&catalog, any_diet, &mut StdRng::seed_from_u64(7));
//!
//! assert_eq!(week.len(), 7);
//! assert_eq!(week[0].breakfast.as_deref(), Some("Poha"));
//! assert_eq!(week[1].breakfast, None);
//! # Ok::<(), cooking_assistant::errors::AssistantError>(())
//! ```

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::catalog::Catalog;
use crate::config::{MenuConfig, SideDishPolicy};

/// Number of days in a generated menu
pub const DAYS_PER_WEEK: u8 = 7;

const BREAKFAST_TERMS: &[&str] = &["breakfast", "brunch"];
const MAIN_TERMS: &[&str] = &["main", "lunch", "dinner", "one pot"];
const SNACK_TERMS: &[&str] = &["snack", "appetizer", "dessert"];
const SIDE_TERM: &str = "side";

/// Meal-time bucket derived from a course label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    LunchDinner,
    SnackDessert,
    SideDish,
    Other,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::LunchDinner => "Lunch/Dinner",
            MealType::SnackDessert => "Snack/Dessert",
            MealType::SideDish => "Side Dish",
            MealType::Other => "Other",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a course label with the substring rules
pub fn meal_type(course: &str, side_dishes: SideDishPolicy) -> MealType {
    let course = course.to_lowercase();
    let contains_any = |terms: &[&str]| terms.iter().any(|term| course.contains(term));

    if course.trim().is_empty() {
        MealType::Other
    } else if contains_any(BREAKFAST_TERMS) {
        MealType::Breakfast
    } else if contains_any(MAIN_TERMS)
        || (side_dishes == SideDishPolicy::MergeWithMains && course.contains(SIDE_TERM))
    {
        MealType::LunchDinner
    } else if contains_any(SNACK_TERMS) {
        MealType::SnackDessert
    } else if course.contains(SIDE_TERM) {
        MealType::SideDish
    } else {
        MealType::Other
    }
}

/// Explicit course label to meal type assignments, consulted before the substring rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseTable {
    entries: HashMap<String, MealType>,
}

impl CourseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a course label (matched trimmed and case-insensitively) to a meal type
    pub fn insert(&mut self, course: &str, meal: MealType) {
        self.entries.insert(normalize_course(course), meal);
    }

    pub fn get(&self, course: &str) -> Option<MealType> {
        self.entries.get(&normalize_course(course)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, MealType)> for CourseTable {
    fn from_iter<I: IntoIterator<Item = (String, MealType)>>(iter: I) -> Self {
        let mut table = CourseTable::new();
        for (course, meal) in iter {
            table.insert(&course, meal);
        }
        table
    }
}

fn normalize_course(course: &str) -> String {
    course.trim().to_lowercase()
}

/// One day of the weekly menu; `None` means the pool for that slot ran out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMenuEntry {
    /// Day number, 1 to 7
    pub day: u8,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_dish: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snack_dessert: Option<String>,
}

impl WeeklyMenuEntry {
    /// Human label, e.g. "Day 3"
    pub fn label(&self) -> String {
        format!("Day {}", self.day)
    }
}

/// Recipe names per meal type, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPools {
    pub breakfast: Vec<String>,
    pub lunch_dinner: Vec<String>,
    pub side_dish: Vec<String>,
    pub snack_dessert: Vec<String>,
}

/// Weekly menu generator
#[derive(Debug, Clone, Default)]
pub struct MenuPlanner {
    config: MenuConfig,
    course_table: CourseTable,
}

impl MenuPlanner {
    pub fn new(config: MenuConfig) -> Self {
        Self {
            config,
            course_table: CourseTable::default(),
        }
    }

    /// Use explicit course assignments ahead of the substring rules
    pub fn with_course_table(mut self, course_table: CourseTable) -> Self {
        self.course_table = course_table;
        self
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Meal type of a course label under this planner's configuration
    pub fn classify(&self, course: &str) -> MealType {
        match self.course_table.get(course) {
            Some(MealType::SideDish)
                if self.config.side_dishes == SideDishPolicy::MergeWithMains =>
            {
                MealType::LunchDinner
            }
            Some(meal) => meal,
            None => meal_type(course, self.config.side_dishes),
        }
    }

    /// Sort catalog recipes into meal pools
    ///
    /// When `preferred_diets` is non-empty, only recipes whose trimmed diet
    /// label is exactly one of them are kept.
    pub fn categorize<S: AsRef<str>>(&self, catalog: &Catalog, preferred_diets: &[S]) -> MealPools {
        let diets: HashSet<&str> = preferred_diets.iter().map(|diet| diet.as_ref()).collect();
        let mut pools = MealPools::default();

        for recipe in catalog.iter() {
            if !diets.is_empty() && !diets.contains(recipe.diet.trim()) {
                continue;
            }

            let pool = match self.classify(&recipe.course) {
                MealType::Breakfast => &mut pools.breakfast,
                MealType::LunchDinner => &mut pools.lunch_dinner,
                MealType::SideDish => &mut pools.side_dish,
                MealType::SnackDessert => &mut pools.snack_dessert,
                MealType::Other => continue,
            };
            pool.push(recipe.name.clone());
        }

        debug!(
            "Meal pools: breakfast={}, lunch/dinner={}, side={}, snack/dessert={}",
            pools.breakfast.len(),
            pools.lunch_dinner.len(),
            pools.side_dish.len(),
            pools.snack_dessert.len()
        );

        pools
    }

    /// Build a seven-day menu
    ///
    /// Each pool is shuffled once with `rng` and then drawn from without
    /// replacement, so no recipe appears twice. Lunch and dinner share one
    /// pool. Slots whose pool is empty stay `None` for the rest of the week.
    pub fn build_week<S, R>(
        &self,
        catalog: &Catalog,
        preferred_diets: &[S],
        rng: &mut R,
    ) -> Vec<WeeklyMenuEntry>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let MealPools {
            mut breakfast,
            mut lunch_dinner,
            mut side_dish,
            mut snack_dessert,
        } = self.categorize(catalog, preferred_diets);

        let with_sides = self.config.side_dishes == SideDishPolicy::Separate;
        let with_snacks = self.config.include_snacks;

        breakfast.shuffle(rng);
        lunch_dinner.shuffle(rng);
        if with_sides {
            side_dish.shuffle(rng);
        } else {
            side_dish.clear();
        }
        if with_snacks {
            snack_dessert.shuffle(rng);
        } else {
            snack_dessert.clear();
        }

        let week: Vec<WeeklyMenuEntry> = (1..=DAYS_PER_WEEK)
            .map(|day| WeeklyMenuEntry {
                day,
                breakfast: breakfast.pop(),
                lunch: lunch_dinner.pop(),
                dinner: lunch_dinner.pop(),
                side_dish: side_dish.pop(),
                snack_dessert: snack_dessert.pop(),
            })
            .collect();

        info!(
            "Built weekly menu: {} of {} days have breakfast, {} have dinner",
            week.iter().filter(|d| d.breakfast.is_some()).count(),
            DAYS_PER_WEEK,
            week.iter().filter(|d| d.dinner.is_some()).count()
        );

        week
    }
}
