//! One search run, from configuration to printed report
//!
//! Opens the cache, resolves the query, releases the cache on every path and
//! only then writes the report. Nothing is written when the search fails.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{info, warn};

use crate::cache::SqliteStore;
use crate::cli::StartupConfig;
use crate::data::{FetchError, SpoonacularClient};
use crate::finder::RecipeFinder;
use crate::present::present;

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum AppError {
    /// Recipes could not be obtained
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The report could not be written
    #[error("failed to write recipes: {0}")]
    Output(#[from] io::Error),
}

/// Opens the cache database if one is configured.
///
/// An unusable cache is not an error: the run continues without one.
async fn open_store(config: &StartupConfig) -> Option<SqliteStore> {
    let path = config.database.as_ref()?;
    match SqliteStore::connect(path).await {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "recipe cache unavailable, continuing without it");
            None
        }
    }
}

/// Runs one search and writes the report to `out`
///
/// # Returns
/// * `Ok(usize)` - Number of recipes written
/// * `Err(AppError)` - If fetching or writing failed
pub async fn run<W: Write>(config: &StartupConfig, out: &mut W) -> Result<usize, AppError> {
    let client = SpoonacularClient::new(&config.api_key, config.timeout)?.with_base_url(&config.api_url);
    let store = open_store(config).await;
    let finder = RecipeFinder::new(client, store);

    let resolved = finder.resolve(&config.query, config.desired).await;
    if let Some(store) = finder.store() {
        store.close().await;
    }
    let recipes = resolved?;

    let written = present(out, &recipes, config.desired as usize)?;
    info!(written, available = recipes.len(), desired = config.desired, "search complete");
    Ok(written)
}
