//! Catalog loading from JSON files

use std::io::Write;
use std::sync::Arc;

use cooking_assistant::catalog::{CatalogProvider, JsonFileCatalogProvider};
use cooking_assistant::config::AssistantConfig;
use cooking_assistant::recipe_model::QuantityValue;
use cooking_assistant::{AssistantError, CookingAssistant};
use tempfile::NamedTempFile;

const CATALOG_JSON: &str = r#"[
    {
        "name": "Masala Dosa",
        "TranslatedRecipeName": "Masala Dosa Recipe",
        "P-Ingredients": "rice,urad dal,potato,onion,mustard seeds,salt,oil",
        "course": "South Indian Breakfast",
        "diet": "Vegetarian",
        "DefaultServings": 4,
        "Ingredients": [
            {"Quantity": "3", "Unit": "cups", "Name": "rice"},
            {"Quantity": "1/2", "Unit": "cup", "Name": "urad dal"},
            {"Quantity": "as required", "Unit": "", "Name": "salt"}
        ],
        "image-url": "https://example.com/dosa.jpg",
        "TotalTimeInMins": 60
    },
    {
        "name": "Rajma",
        "ingredients": "kidney beans,onion,tomato,ginger,garlic,salt",
        "course": "Lunch",
        "diet": "Vegetarian",
        "default_servings": 3,
        "quantities": [
            {"quantity": "1", "unit": "cup", "name": "kidney beans"}
        ]
    }
]"#;

fn write_catalog(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_catalog_file() {
    let file = write_catalog(CATALOG_JSON);
    let provider = JsonFileCatalogProvider::open(file.path()).unwrap();
    let catalog = provider.catalog().unwrap();

    assert_eq!(catalog.len(), 2);
    let names: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Masala Dosa", "Rajma"]);

    let dosa = catalog.lookup("Masala Dosa").unwrap();
    assert_eq!(dosa.display_name(), "Masala Dosa Recipe");
    assert_eq!(dosa.default_servings, 4);
    assert_eq!(dosa.quantities.len(), 3);
    assert_eq!(dosa.image_url, "https://example.com/dosa.jpg");
    assert_eq!(dosa.total_time_minutes, 60);

    let rajma = catalog.lookup("Rajma").unwrap();
    assert_eq!(rajma.display_name(), "Rajma");
    assert_eq!(rajma.default_servings, 3);
}

#[test]
fn test_assistant_over_file_catalog() {
    let file = write_catalog(CATALOG_JSON);
    let provider = JsonFileCatalogProvider::open(file.path()).unwrap();
    let assistant = CookingAssistant::new(provider, AssistantConfig::default());

    let results = assistant.recommend("potato, onion, rice", None).unwrap();
    assert_eq!(results[0].recipe_name, "Masala Dosa");
    assert_eq!(results[0].image_url, "https://example.com/dosa.jpg");

    let scaled = assistant.scale_recipe("Masala Dosa", "2").unwrap();
    assert_eq!(scaled.ingredients[0].quantity, QuantityValue::Numeric(1.5));
    assert_eq!(scaled.ingredients[1].quantity, QuantityValue::Numeric(0.25));
}

#[test]
fn test_reload_swaps_catalog_and_keeps_snapshots() {
    let file = write_catalog(CATALOG_JSON);
    let provider = JsonFileCatalogProvider::open(file.path()).unwrap();
    let before = provider.catalog().unwrap();

    std::fs::write(
        file.path(),
        r#"[{"name": "Poha", "ingredients": "poha,onion,peanuts,turmeric,salt",
            "course": "Breakfast", "DefaultServings": 2}]"#,
    )
    .unwrap();
    provider.reload().unwrap();

    let after = provider.catalog().unwrap();
    assert_eq!(after.len(), 1);
    assert!(after.get("Poha").is_some());
    assert_eq!(before.len(), 2);
    assert!(!Arc::ptr_eq(&before, &after));
}

#[test]
fn test_failed_reload_keeps_previous_catalog() {
    let file = write_catalog(CATALOG_JSON);
    let provider = JsonFileCatalogProvider::open(file.path()).unwrap();

    std::fs::write(file.path(), "{ not json").unwrap();
    let err = provider.reload().unwrap_err();

    assert!(matches!(err, AssistantError::Catalog(_)));
    assert!(!err.is_client_error());
    assert_eq!(provider.catalog().unwrap().len(), 2);
}

#[test]
fn test_open_errors() {
    let missing = JsonFileCatalogProvider::open("/nonexistent/recipes.json").unwrap_err();
    assert!(matches!(missing, AssistantError::Catalog(_)));
    assert!(missing.to_string().contains("/nonexistent/recipes.json"));

    let duplicate = write_catalog(
        r#"[{"name": "Poha", "DefaultServings": 2}, {"name": "Poha", "DefaultServings": 3}]"#,
    );
    let err = JsonFileCatalogProvider::open(duplicate.path()).unwrap_err();
    assert!(err.to_string().contains("duplicate recipe name 'Poha'"));
}

const KEYED_CATALOG_JSON: &str = r#"{
    "Vegetable Upma": {
        "TranslatedRecipeName": "Vegetable Upma",
        "P-Ingredients": "rava,onion,carrot,mustard seeds,salt,oil",
        "course": "South Indian Breakfast",
        "diet": "Vegetarian",
        "DefaultServings": 3,
        "Ingredients": [{"Quantity": "1", "Unit": "cup", "Name": "rava"}]
    },
    "Aloo Paratha": {
        "TranslatedRecipeName": "Aloo Paratha",
        "P-Ingredients": "wheat flour,potato,onion,green chillies,salt,ghee",
        "course": "North Indian Breakfast",
        "diet": "Vegetarian",
        "DefaultServings": 4,
        "Ingredients": [{"Quantity": "2", "Unit": "cups", "Name": "wheat flour"}]
    }
}"#;

#[test]
fn test_load_keyed_catalog_file() {
    let file = write_catalog(KEYED_CATALOG_JSON);
    let provider = JsonFileCatalogProvider::open(file.path()).unwrap();
    let catalog = provider.catalog().unwrap();

    // Keys become names and file order is kept
    let names: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Vegetable Upma", "Aloo Paratha"]);
    assert_eq!(catalog.lookup("Aloo Paratha").unwrap().default_servings, 4);

    // Equal rank and score: file order breaks the tie
    let assistant = CookingAssistant::new(provider, AssistantConfig::default());
    let results = assistant.recommend("onion", None).unwrap();
    let ranked: Vec<&str> = results.iter().map(|r| r.recipe_name.as_str()).collect();
    assert_eq!(ranked, vec!["Vegetable Upma", "Aloo Paratha"]);
}

#[test]
fn test_record_without_servings_is_rejected() {
    let file = write_catalog(
        r#"{"Idli": {"P-Ingredients": "rice,urad dal,salt,water,oil",
            "Ingredients": [{"Quantity": "2", "Unit": "cup", "Name": "rice"}]}}"#,
    );

    let err = JsonFileCatalogProvider::open(file.path()).unwrap_err();
    assert!(matches!(err, AssistantError::Catalog(_)));
    assert!(err.to_string().contains("default_servings"), "{err}");
}
