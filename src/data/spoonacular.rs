//! Spoonacular recipe search API client
//!
//! This module fetches recipes from the Spoonacular `complexSearch` endpoint
//! and shapes the loosely-typed payload into our [`RecipeRecord`] structures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::{Nutrient, NormalizedQuery, RecipeRecord, RecipeSet, ALLOWED_NUTRIENTS};
use crate::finder::RecipeSource;

/// Base URL for the Spoonacular recipe search
pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com/recipes/complexSearch";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fragment Spoonacular embeds in the body when it rejects an API key.
/// The response can arrive with a non-error transport status.
const UNAUTHORIZED_SIGNATURE: &str = "\"You are not authorized";

/// Errors that can occur when fetching recipes
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure reaching the API
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with an unexpected HTTP status
    #[error("recipe API returned HTTP {0}")]
    Status(StatusCode),

    /// The API rejected the configured key
    #[error("not authorized by the recipe API, check SPOONACULAR_API_KEY")]
    Unauthorized,

    /// The API answered with its own failure envelope
    #[error("recipe API failure {code}: {message}")]
    Upstream { code: u16, message: String },

    /// The payload did not have the expected structure
    #[error("Failed to parse API response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Client for searching recipes on the Spoonacular API
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularClient {
    /// Create a new client with the given API key and request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_key))
    }

    /// Create a new client with a custom HTTP client
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: SPOONACULAR_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint (used for tests and API proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search for up to `count` recipes using the query's ingredients
    ///
    /// # Returns
    /// * `Ok(RecipeSet)` - Recipes in the API's ranking (fewest missing ingredients first)
    /// * `Err(FetchError)` - If the request fails, is rejected, or cannot be parsed
    pub async fn search(&self, query: &NormalizedQuery, count: u32) -> Result<RecipeSet, FetchError> {
        info!(query = %query, count, "fetching recipes from API");

        let number = count.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("includeIngredients", query.key()),
                ("number", number.as_str()),
                ("fillIngredients", "true"),
                ("sort", "min-missing-ingredients"),
                ("addRecipeNutrition", "true"),
                ("ignorePantry", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(%status, bytes = text.len(), "received API response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }
        if !status.is_success() {
            // Quota and key errors arrive with a real error status and a
            // failure envelope; let shape report those with their message
            if text.contains(UNAUTHORIZED_SIGNATURE) || is_failure_envelope(&text) {
                return shape(&text);
            }
            return Err(FetchError::Status(status));
        }

        shape(&text)
    }
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    async fn fetch(&self, query: &NormalizedQuery, count: u32) -> Result<RecipeSet, FetchError> {
        self.search(query, count).await
    }
}

/// Shape a raw search payload into a [`RecipeSet`]
///
/// Ingredients are reduced to their names and nutrients are filtered to
/// [`ALLOWED_NUTRIENTS`], both in source order. Recipe order is never changed.
pub fn shape(payload: &str) -> Result<RecipeSet, FetchError> {
    if payload.contains(UNAUTHORIZED_SIGNATURE) {
        return Err(FetchError::Unauthorized);
    }

    let response: SearchResponse = match serde_json::from_str(payload) {
        Ok(response) => response,
        Err(parse_error) => {
            return Err(match serde_json::from_str::<FailureResponse>(payload) {
                Ok(failure) if failure.status == "failure" => {
                    if failure.code == 401 {
                        FetchError::Unauthorized
                    } else {
                        FetchError::Upstream {
                            code: failure.code,
                            message: failure.message,
                        }
                    }
                }
                _ => FetchError::Malformed(parse_error),
            });
        }
    };

    Ok(response.results.into_iter().map(shape_result).collect())
}

fn is_failure_envelope(payload: &str) -> bool {
    serde_json::from_str::<FailureResponse>(payload).is_ok_and(|failure| failure.status == "failure")
}

/// Convert a single search result into a RecipeRecord
fn shape_result(result: SearchResult) -> RecipeRecord {
    let nutrients = result
        .nutrition
        .map(|nutrition| nutrition.nutrients)
        .unwrap_or_default()
        .into_iter()
        .filter(|n| ALLOWED_NUTRIENTS.contains(&n.name.as_str()))
        .map(|n| Nutrient {
            name: n.name,
            amount: n.amount,
            unit: n.unit,
        })
        .collect();

    RecipeRecord {
        id: result.id,
        title: result.title,
        used_ingredients: ingredient_names(result.used_ingredients),
        missed_ingredients: ingredient_names(result.missed_ingredients),
        nutrients,
    }
}

fn ingredient_names(ingredients: Vec<ApiIngredient>) -> Vec<String> {
    ingredients.into_iter().map(|i| i.name).collect()
}

/// Spoonacular complexSearch response structure
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

/// A single recipe from the search results
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    id: i64,
    title: String,
    #[serde(default)]
    used_ingredients: Vec<ApiIngredient>,
    #[serde(default)]
    missed_ingredients: Vec<ApiIngredient>,
    #[serde(default)]
    nutrition: Option<Nutrition>,
}

/// Ingredient entry; id, amount and unit are not kept
#[derive(Debug, Deserialize)]
struct ApiIngredient {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Nutrition {
    #[serde(default)]
    nutrients: Vec<ApiNutrient>,
}

#[derive(Debug, Deserialize)]
struct ApiNutrient {
    name: String,
    amount: f64,
    unit: String,
}

/// Error envelope Spoonacular returns instead of results
#[derive(Debug, Deserialize)]
struct FailureResponse {
    status: String,
    code: u16,
    #[serde(default)]
    message: String,
}
