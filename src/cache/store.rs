//! SQLite-backed recipe store
//!
//! Recipes live in a single `recipes` table keyed by `(id, sorted_query)`.
//! Ingredient lists are stored joined with `", "` and the three allowed
//! nutrients get one nullable column each.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, instrument};

use super::{RecipeStore, StoreError};
use crate::data::{NormalizedQuery, Nutrient, RecipeRecord, RecipeSet};

/// Embedded migrations that are run automatically on connect.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// File name of the cache database inside the cache directory
const DATABASE_FILE: &str = "recipes.db";

/// Separator for multi-valued columns
/// Joins ingredient names in one column. A name that itself contains this
/// separator comes back from the cache split in two.
const LIST_SEPARATOR: &str = ", ";

/// Nutrient columns with the unit reported on read
const CALORIES: (&str, &str) = ("Calories", "kcal");
const CARBOHYDRATES: (&str, &str) = ("Carbohydrates", "g");
const PROTEIN: (&str, &str) = ("Protein", "g");

/// Returns the XDG-compliant default database path
///
/// Uses `~/.cache/recipe-finder/recipes.db` on Linux, or the equivalent on
/// other platforms. Returns `None` if no home directory can be determined.
pub fn default_database_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "recipe-finder")?;
    Some(project_dirs.cache_dir().join(DATABASE_FILE))
}

/// A cached row, as selected by [`SqliteStore::lookup`]
#[derive(Debug, FromRow)]
struct RecipeRow {
    id: i64,
    name: String,
    used_ingredients: String,
    missing_ingredients: String,
    calories: Option<f64>,
    carbohydrates: Option<f64>,
    protein: Option<f64>,
}

impl From<RecipeRow> for RecipeRecord {
    fn from(row: RecipeRow) -> Self {
        let nutrients = [
            (CALORIES, row.calories),
            (CARBOHYDRATES, row.carbohydrates),
            (PROTEIN, row.protein),
        ]
        .into_iter()
        .filter_map(|((name, unit), amount)| amount.map(|amount| Nutrient::new(name, amount, unit)))
        .collect();

        RecipeRecord {
            id: row.id,
            title: row.name,
            used_ingredients: split_list(&row.used_ingredients),
            missed_ingredients: split_list(&row.missing_ingredients),
            nutrients,
        }
    }
}

fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_SEPARATOR).map(str::to_string).collect()
}

fn nutrient_amount(recipe: &RecipeRecord, (name, _): (&str, &str)) -> Option<f64> {
    recipe.nutrient(name).map(|n| n.amount)
}

/// Recipe store backed by a single-connection SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    async fn new(options: SqliteConnectOptions) -> Result<Self, StoreError> {
        // The finder is strictly sequential; one connection is all it needs.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(StoreError::Connect)?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Open the cache database at the given path.
    ///
    /// Creates the parent directory and the database file if they don't exist
    /// and runs migrations.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let options = SqliteConnectOptions::new().filename(path).create_if_missing(true);
        Self::new(options).await
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// The database is destroyed when the store is closed.
    pub async fn connect_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new().filename(":memory:");
        Self::new(options).await
    }

    #[instrument("running cache migrations", skip(self))]
    async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Close the connection pool.
    ///
    /// Waits for the connection to be returned and closes it. The store must
    /// not be used afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RecipeStore for SqliteStore {
    async fn lookup(&self, query: &NormalizedQuery) -> Result<RecipeSet, StoreError> {
        let rows: Vec<RecipeRow> = sqlx::query_as(
            r#"
                SELECT id, name, used_ingredients, missing_ingredients, calories, carbohydrates, protein
                FROM recipes
                WHERE sorted_query = ?
                ORDER BY rowid
            "#,
        )
        .bind(query.key())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        debug!(query = %query, rows = rows.len(), "looked up cached recipes");
        Ok(rows.into_iter().map(RecipeRecord::from).collect())
    }

    async fn persist(&self, query: &NormalizedQuery, recipe: &RecipeRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
                INSERT OR IGNORE INTO recipes
                    (id, sorted_query, name, used_ingredients, missing_ingredients, calories, carbohydrates, protein)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(recipe.id)
        .bind(query.key())
        .bind(&recipe.title)
        .bind(recipe.used_ingredients.join(LIST_SEPARATOR))
        .bind(recipe.missed_ingredients.join(LIST_SEPARATOR))
        .bind(nutrient_amount(recipe, CALORIES))
        .bind(nutrient_amount(recipe, CARBOHYDRATES))
        .bind(nutrient_amount(recipe, PROTEIN))
        .execute(&self.pool)
        .await
        .map_err(|source| StoreError::Write { id: recipe.id, source })?;
        Ok(())
    }
}
