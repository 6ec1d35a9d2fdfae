//! Cache module for storing fetched recipes in SQLite
//!
//! The cache is a pure memoization layer keyed by the normalized ingredient
//! query. Rows are written once and never refreshed or evicted. Every store
//! failure is recoverable: callers degrade to fetching from the API.

mod store;

pub use store::{default_database_path, SqliteStore};

use async_trait::async_trait;
use thiserror::Error;

use crate::data::{NormalizedQuery, RecipeRecord, RecipeSet};

/// Errors raised by a recipe store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be opened
    #[error("failed to open recipe cache: {0}")]
    Connect(#[source] sqlx::Error),

    /// Creating the cache directory failed
    #[error("failed to create cache directory: {0}")]
    Directory(#[from] std::io::Error),

    /// Schema migrations failed
    #[error("failed to migrate recipe cache: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Reading cached recipes failed
    #[error("failed to read recipe cache: {0}")]
    Query(#[source] sqlx::Error),

    /// Writing a recipe failed
    #[error("failed to cache recipe {id}: {source}")]
    Write {
        id: i64,
        #[source]
        source: sqlx::Error,
    },
}

/// Persistence operations the recipe finder depends on
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes cached for `query`, in the order they were stored
    async fn lookup(&self, query: &NormalizedQuery) -> Result<RecipeSet, StoreError>;

    /// Store one recipe under `query`; storing the same recipe twice is a no-op
    async fn persist(&self, query: &NormalizedQuery, recipe: &RecipeRecord) -> Result<(), StoreError>;
}
