//! Command-line interface parsing for Recipe Finder
//!
//! This module handles parsing of CLI arguments using clap. Everything that
//! is not part of the search itself (API key, cache location, timeouts) can
//! also be supplied through the environment so secrets stay out of scripts.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::cache::default_database_path;
use crate::data::spoonacular::{DEFAULT_TIMEOUT, SPOONACULAR_BASE_URL};
use crate::data::{normalize, NormalizedQuery};

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// No usable ingredient names after trimming
    #[error("no ingredients given; usage: recipe-finder --ingredients <a,b,...> --number-of-recipes <N>")]
    EmptyIngredients,
}

/// Recipe Finder - find recipes for the ingredients you have
#[derive(Parser, Debug)]
#[command(name = "recipe-finder")]
#[command(about = "Find recipes using the ingredients you have")]
#[command(version)]
pub struct Cli {
    /// Comma-separated list of ingredients
    ///
    /// Examples:
    ///   recipe-finder --ingredients tomato,cheese -n 3
    ///   recipe-finder --ingredients "apples, flour, sugar" -n 5
    #[arg(long, short = 'i', visible_alias = "ingredient", value_delimiter = ',', required = true)]
    pub ingredients: Vec<String>,

    /// Number of recipes to show (at least 1)
    #[arg(
        long,
        short = 'n',
        visible_alias = "numberOfRecipes",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub number_of_recipes: u32,

    /// Spoonacular API key
    #[arg(long, env = "SPOONACULAR_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Path of the recipe cache database [default: XDG cache dir]
    #[arg(long, env = "RECIPE_FINDER_DATABASE", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Skip the recipe cache and always query the API
    #[arg(long, env = "RECIPE_FINDER_NO_CACHE")]
    pub no_cache: bool,

    /// Recipe search endpoint
    #[arg(long, env = "RECIPE_FINDER_API_URL", default_value = SPOONACULAR_BASE_URL, hide = true)]
    pub api_url: String,

    /// HTTP request timeout in seconds (at least 1)
    #[arg(
        long,
        env = "RECIPE_FINDER_TIMEOUT",
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

/// Configuration derived from CLI arguments for a single search
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Normalized ingredient query
    pub query: NormalizedQuery,
    /// How many recipes the user asked for
    pub desired: u32,
    /// Spoonacular API key
    pub api_key: String,
    /// Recipe search endpoint
    pub api_url: String,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Cache database path; `None` runs without a cache
    pub database: Option<PathBuf>,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the normalized query and resolved cache path
    /// * `Err(CliError)` if no usable ingredient was given
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let query = normalize(&cli.ingredients);
        if query.is_empty() {
            return Err(CliError::EmptyIngredients);
        }

        let database = if cli.no_cache {
            None
        } else {
            cli.database.clone().or_else(default_database_path)
        };

        Ok(StartupConfig {
            query,
            desired: cli.number_of_recipes,
            api_key: cli.api_key.clone(),
            api_url: cli.api_url.clone(),
            timeout: Duration::from_secs(cli.timeout),
            database,
        })
    }
}
