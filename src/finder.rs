//! Read-through recipe lookup
//!
//! [`RecipeFinder`] decides whether cached recipes satisfy a request and, if
//! they don't, fetches fresh ones, caches them and hands them back. The cache
//! is an optimization only: when it is missing or failing the finder still
//! answers from the API.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::RecipeStore;
use crate::data::{FetchError, NormalizedQuery, RecipeSet};

/// Source of fresh recipes (the upstream API)
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch up to `count` recipes matching `query`, in relevance order
    async fn fetch(&self, query: &NormalizedQuery, count: u32) -> Result<RecipeSet, FetchError>;
}

/// Combines a recipe source with an optional cache store
pub struct RecipeFinder<F, S> {
    source: F,
    store: Option<S>,
}

impl<F: RecipeSource, S: RecipeStore> RecipeFinder<F, S> {
    /// Creates a finder; `store` is `None` when running without a cache
    pub fn new(source: F, store: Option<S>) -> Self {
        Self { source, store }
    }

    /// The cache store, if one is attached
    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    /// Resolves `query` to at least `desired` recipes when possible
    ///
    /// # Behavior
    /// - Cached recipes are returned untouched (all of them, not just
    ///   `desired`) when there are at least `desired` of them
    /// - Otherwise `desired` recipes are fetched, each one is cached, and the
    ///   fresh set is returned
    /// - Cache read and write failures are logged and otherwise ignored
    /// - Fetch failures are returned; nothing is cached in that case
    ///
    /// The result may hold more or fewer than `desired` recipes. Bounding the
    /// output is left to [`crate::present::present`].
    pub async fn resolve(&self, query: &NormalizedQuery, desired: u32) -> Result<RecipeSet, FetchError> {
        let cached = self.lookup_cached(query).await;
        if cached.len() >= desired as usize {
            debug!(query = %query, cached = cached.len(), desired, "cache hit");
            return Ok(cached);
        }
        debug!(query = %query, cached = cached.len(), desired, "cache miss");

        let fresh = self.source.fetch(query, desired).await?;
        self.persist_all(query, &fresh).await;
        Ok(fresh)
    }

    async fn lookup_cached(&self, query: &NormalizedQuery) -> RecipeSet {
        let Some(store) = &self.store else {
            return RecipeSet::new();
        };
        match store.lookup(query).await {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!(error = %e, "recipe cache unavailable, fetching from API");
                RecipeSet::new()
            }
        }
    }

    async fn persist_all(&self, query: &NormalizedQuery, recipes: &RecipeSet) {
        let Some(store) = &self.store else {
            return;
        };
        let mut stored = 0;
        for recipe in recipes {
            match store.persist(query, recipe).await {
                Ok(()) => stored += 1,
                Err(e) => warn!(error = %e, "failed to cache recipe"),
            }
        }
        debug!(query = %query, stored, total = recipes.len(), "cached fetched recipes");
    }
}
