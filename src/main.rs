use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::env;
use tracing_subscriber::EnvFilter;

use cooking_assistant::catalog::JsonFileCatalogProvider;
use cooking_assistant::config::AssistantConfig;
use cooking_assistant::CookingAssistant;

#[derive(Debug, Parser)]
#[command(
    name = "cooking-assistant",
    version,
    about = "Recipe recommendations, scaling and weekly menus"
)]
struct Cli {
    /// JSON recipe catalog, overrides RECIPE_CATALOG_PATH
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend recipes for a comma-separated ingredient list
    Recommend {
        ingredients: String,
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Rescale a recipe's quantities to a number of servings
    Scale { recipe: String, servings: String },
    /// Build a seven-day menu
    Menu {
        /// Diet to include, may be repeated
        #[arg(long = "diet")]
        diets: Vec<String>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_logging() {
    // LOG_FORMAT=json switches to structured output for log shippers
    if env::var("LOG_FORMAT").map(|f| f.eq_ignore_ascii_case("json")).unwrap_or(false) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    } else {
        env_logger::init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{output}");
    Ok(())
}

fn main() -> Result<()> {
    // Load environment variables from .env file before logging reads them
    dotenv::dotenv().ok();
    init_logging();

    info!("Starting cooking assistant");

    let cli = Cli::parse();
    let mut config = AssistantConfig::from_env()?;
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog.clone();
    }

    let catalog_path = config
        .catalog_path
        .clone()
        .context("No recipe catalog given, set RECIPE_CATALOG_PATH or pass --catalog")?;
    let provider = JsonFileCatalogProvider::open(&catalog_path)
        .with_context(|| format!("Failed to open recipe catalog {catalog_path}"))?;

    let assistant = CookingAssistant::new(provider, config);

    match cli.command {
        Command::Recommend { ingredients, top_n } => {
            print_json(&assistant.recommend(&ingredients, top_n)?)?;
        }
        Command::Scale { recipe, servings } => {
            print_json(&assistant.scale_recipe(&recipe, &servings)?)?;
        }
        Command::Menu { diets, seed } => {
            let menu = match seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    assistant.weekly_menu_with_rng(diets.as_slice(), &mut rng)?
                }
                None => assistant.weekly_menu(diets.as_slice())?,
            };
            print_json(&menu)?;
        }
    }

    Ok(())
}
