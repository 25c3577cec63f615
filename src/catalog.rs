//! # Recipe Catalog Module
//!
//! This module holds the read-only recipe catalog and the providers that hand
//! it to the rest of the crate.
//!
//! The catalog keeps recipes in load order (ranking ties are broken by this
//! order) and indexes them by their case-sensitive name.
//!
//! ## Providers
//!
//! - [`InMemoryCatalogProvider`]: a fixed catalog, mostly for tests and embedding
//! - [`SharedCatalog`]: a catalog that can be swapped atomically while readers keep their snapshot
//! - [`JsonFileCatalogProvider`]: loads a JSON catalog (an array of recipes, or an object keyed
//!   by recipe name) from disk and reloads on demand

use anyhow::{bail, Context};
use serde_json::Value;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::errors::{AssistantError, Result};
use crate::recipe_model::Recipe;

/// An ordered, name-indexed collection of recipes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate recipe names
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        let mut index = HashMap::with_capacity(recipes.len());
        for (position, recipe) in recipes.iter().enumerate() {
            if index.insert(recipe.name.clone(), position).is_some() {
                return Err(AssistantError::Catalog(format!(
                    "duplicate recipe name '{}'",
                    recipe.name
                )));
            }
        }
        debug!("Built catalog with {} recipes", recipes.len());
        Ok(Self { recipes, index })
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Iterate recipes in load order
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.index.get(name).map(|&position| &self.recipes[position])
    }

    /// Look up a recipe by name, failing with `NotFound`
    pub fn lookup(&self, name: &str) -> Result<&Recipe> {
        self.get(name)
            .ok_or_else(|| AssistantError::NotFound(name.to_string()))
    }

    /// Recipes with more than `min_ingredients` raw ingredient tokens, in load order
    pub fn eligible_for_recommendation(
        &self,
        min_ingredients: usize,
    ) -> impl Iterator<Item = &Recipe> {
        self.recipes
            .iter()
            .filter(move |recipe| recipe.raw_ingredient_count() > min_ingredients)
    }
}

/// Source of the catalog the core computes on
pub trait CatalogProvider: Send + Sync {
    /// Current catalog snapshot
    fn catalog(&self) -> Result<Arc<Catalog>>;
}

/// Provider serving one fixed catalog
#[derive(Debug, Clone)]
pub struct InMemoryCatalogProvider {
    catalog: Arc<Catalog>,
}

impl InMemoryCatalogProvider {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Build the catalog from recipes directly
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self> {
        Ok(Self::new(Catalog::new(recipes)?))
    }
}

impl CatalogProvider for InMemoryCatalogProvider {
    fn catalog(&self) -> Result<Arc<Catalog>> {
        Ok(Arc::clone(&self.catalog))
    }
}

/// Catalog that can be replaced while readers hold snapshots
///
/// Readers get an `Arc` to the catalog current at the time of the call; a
/// replacement swaps the `Arc` and never mutates a catalog in place.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new catalog, returning the previous one
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        info!("Replacing catalog: {} -> {} recipes", guard.len(), catalog.len());
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }
}

impl CatalogProvider for SharedCatalog {
    fn catalog(&self) -> Result<Arc<Catalog>> {
        Ok(self.snapshot())
    }
}

/// Provider backed by a JSON catalog file, either an array of records or an object keyed by name
#[derive(Debug)]
pub struct JsonFileCatalogProvider {
    path: PathBuf,
    shared: SharedCatalog,
}

impl JsonFileCatalogProvider {
    /// Load the catalog file once and serve it until [`reload`](Self::reload) is called
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let catalog = load_catalog_file(&path)?;
        Ok(Self {
            path,
            shared: SharedCatalog::new(catalog),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file and swap the catalog in; on failure the old catalog stays active
    pub fn reload(&self) -> Result<()> {
        match load_catalog_file(&self.path) {
            Ok(catalog) => {
                self.shared.replace(catalog);
                Ok(())
            }
            Err(e) => {
                warn!("Catalog reload from {} failed: {}", self.path.display(), e);
                Err(e)
            }
        }
    }
}

impl CatalogProvider for JsonFileCatalogProvider {
    fn catalog(&self) -> Result<Arc<Catalog>> {
        Ok(self.shared.snapshot())
    }
}

fn load_catalog_file(path: &Path) -> Result<Catalog> {
    info!("Loading recipe catalog from {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let recipes = parse_recipes(&content)
        .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;

    let catalog = Catalog::new(recipes)?;
    info!("Loaded {} recipes", catalog.len());
    Ok(catalog)
}

/// Read either an array of recipe records or an object keyed by recipe name
///
/// In the keyed form the key is the recipe name; entries keep file order.
fn parse_recipes(content: &str) -> anyhow::Result<Vec<Recipe>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Array(records) => records
            .into_iter()
            .enumerate()
            .map(|(position, record)| {
                serde_json::from_value(record)
                    .with_context(|| format!("Invalid recipe record at index {position}"))
            })
            .collect(),
        Value::Object(entries) => entries
            .into_iter()
            .map(|(name, mut record)| {
                if let Value::Object(fields) = &mut record {
                    fields.insert("name".to_string(), Value::String(name.clone()));
                }
                serde_json::from_value(record)
                    .with_context(|| format!("Invalid record for recipe '{name}'"))
            })
            .collect(),
        _ => bail!("expected an array of recipes or an object keyed by recipe name"),
    }
}
