//! Weekly menu assembly over a mixed catalog

use std::collections::HashSet;

use cooking_assistant::catalog::{Catalog, InMemoryCatalogProvider};
use cooking_assistant::config::{AssistantConfig, MenuConfig, SideDishPolicy};
use cooking_assistant::menu_planner::{CourseTable, MealType, MenuPlanner, WeeklyMenuEntry};
use cooking_assistant::recipe_model::Recipe;
use cooking_assistant::CookingAssistant;
use rand::rngs::StdRng;
use rand::SeedableRng;

const NO_DIET: &[&str] = &[];

fn mixed_catalog() -> Catalog {
    let mut recipes = Vec::new();
    for i in 0..5 {
        let name = format!("Breakfast {i}");
        recipes.push(Recipe::new(&name).with_course("Breakfast").with_diet("Vegetarian"));
    }
    for i in 0..20 {
        let diet = if i % 2 == 0 { "Vegetarian" } else { "Non Vegeterian" };
        recipes.push(Recipe::new(&format!("Main {i}")).with_course("Main Course").with_diet(diet));
    }
    for i in 0..3 {
        let name = format!("Side {i}");
        recipes.push(Recipe::new(&name).with_course("Side Dish").with_diet("Vegetarian"));
    }
    for i in 0..10 {
        let name = format!("Dessert {i}");
        recipes.push(Recipe::new(&name).with_course("Dessert").with_diet("Eggetarian"));
    }
    recipes.push(Recipe::new("Masala Chai").with_course("Beverage").with_diet("Vegetarian"));
    Catalog::new(recipes).unwrap()
}

fn all_names(week: &[WeeklyMenuEntry]) -> Vec<&str> {
    week.iter()
        .flat_map(|entry| {
            [
                &entry.breakfast,
                &entry.lunch,
                &entry.dinner,
                &entry.side_dish,
                &entry.snack_dessert,
            ]
        })
        .filter_map(|slot| slot.as_deref())
        .collect()
}

#[test]
fn test_week_has_seven_days_and_no_repeats() {
    let planner = MenuPlanner::new(MenuConfig::default());
    let catalog = mixed_catalog();

    for seed in 0..20 {
        let week = planner.build_week(&catalog, NO_DIET, &mut StdRng::seed_from_u64(seed));

        assert_eq!(week.len(), 7);
        let days: Vec<u8> = week.iter().map(|entry| entry.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 7]);

        let names = all_names(&week);
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len(), "seed {seed} repeated a recipe");
        assert!(!unique.contains("Masala Chai"));
    }
}

#[test]
fn test_exhausted_pools_leave_empty_slots() {
    let planner = MenuPlanner::new(MenuConfig::default());
    let week = planner.build_week(&mixed_catalog(), NO_DIET, &mut StdRng::seed_from_u64(3));

    // 5 breakfasts and 3 side dishes for 7 days
    assert!(week[..5].iter().all(|entry| entry.breakfast.is_some()));
    assert!(week[5..].iter().all(|entry| entry.breakfast.is_none()));
    assert!(week[..3].iter().all(|entry| entry.side_dish.is_some()));
    assert!(week[3..].iter().all(|entry| entry.side_dish.is_none()));
    // 20 mains cover lunch and dinner every day
    assert!(week.iter().all(|entry| entry.lunch.is_some() && entry.dinner.is_some()));
    assert!(week.iter().all(|entry| entry.snack_dessert.is_some()));
}

#[test]
fn test_same_seed_same_menu() {
    let planner = MenuPlanner::new(MenuConfig::default());
    let catalog = mixed_catalog();

    let first = planner.build_week(&catalog, NO_DIET, &mut StdRng::seed_from_u64(42));
    let second = planner.build_week(&catalog, NO_DIET, &mut StdRng::seed_from_u64(42));
    assert_eq!(first, second);
}

#[test]
fn test_diet_filter() {
    let planner = MenuPlanner::new(MenuConfig::default());
    let catalog = mixed_catalog();
    let week = planner.build_week(&catalog, &["Vegetarian"], &mut StdRng::seed_from_u64(1));

    for name in all_names(&week) {
        assert_eq!(catalog.lookup(name).unwrap().diet, "Vegetarian", "{name}");
    }
    // No vegetarian desserts in the catalog
    assert!(week.iter().all(|entry| entry.snack_dessert.is_none()));
}

#[test]
fn test_merged_side_dishes_without_snacks() {
    let planner = MenuPlanner::new(MenuConfig {
        side_dishes: SideDishPolicy::MergeWithMains,
        include_snacks: false,
    });
    let catalog = mixed_catalog();

    let pools = planner.categorize(&catalog, NO_DIET);
    assert_eq!(pools.lunch_dinner.len(), 23);
    assert!(pools.side_dish.is_empty());

    let week = planner.build_week(&catalog, NO_DIET, &mut StdRng::seed_from_u64(5));
    assert!(week
        .iter()
        .all(|entry| entry.side_dish.is_none() && entry.snack_dessert.is_none()));

    let json = serde_json::to_value(&week[0]).unwrap();
    assert!(json.get("sideDish").is_none());
    assert!(json.get("snackDessert").is_none());
}

#[test]
fn test_course_table_through_assistant() {
    let config = AssistantConfig {
        menu_seed: Some(11),
        ..Default::default()
    };
    let provider = InMemoryCatalogProvider::new(mixed_catalog());
    let table: CourseTable = vec![("Beverage".to_string(), MealType::SnackDessert)]
        .into_iter()
        .collect();
    let assistant = CookingAssistant::new(provider, config).with_course_table(table);

    let mut seen_chai = false;
    for seed in 0..30 {
        let week = assistant
            .weekly_menu_with_rng(NO_DIET, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        seen_chai |= all_names(&week).contains(&"Masala Chai");
    }
    assert!(seen_chai);

    assert_eq!(
        assistant.weekly_menu(NO_DIET).unwrap(),
        assistant.weekly_menu(NO_DIET).unwrap()
    );
}
