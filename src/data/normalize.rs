//! Ingredient query normalization
//!
//! Turns a raw ingredient list into the canonical key used both for cache
//! lookups and for the upstream `includeIngredients` filter.

use std::fmt;

/// Separator between ingredient names in a cache key
const KEY_SEPARATOR: &str = ",";

/// Canonical, order- and duplicate-insensitive ingredient query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedQuery {
    ingredients: Vec<String>,
    key: String,
}

impl NormalizedQuery {
    /// The sorted, deduplicated ingredient names
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// The cache key (ingredient names joined with a comma)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether no usable ingredient names were supplied
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl fmt::Display for NormalizedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Normalizes a raw ingredient list.
///
/// Each name is trimmed and lowercased, empty names are dropped, and the
/// remainder is sorted by byte order and deduplicated. Two lists containing
/// the same names in any order or multiplicity produce equal queries.
///
/// An empty result is the caller's problem: the CLI rejects it before any
/// network or store access.
pub fn normalize<I, S>(raw: I) -> NormalizedQuery
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ingredients: Vec<String> = raw
        .into_iter()
        .map(|name| name.as_ref().trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();
    ingredients.sort();
    ingredients.dedup();

    let key = ingredients.join(KEY_SEPARATOR);
    NormalizedQuery { ingredients, key }
}
