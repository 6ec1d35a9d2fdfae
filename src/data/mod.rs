//! Core data models for Recipe Finder
//!
//! This module contains the uniform recipe types shared by the API client,
//! the cache store and the presenter, plus the ingredient query normalizer.

pub mod normalize;
pub mod spoonacular;

pub use normalize::{normalize, NormalizedQuery};
pub use spoonacular::{shape, FetchError, SpoonacularClient};

use serde::{Deserialize, Serialize};

/// Nutrient names kept when shaping an API payload
pub const ALLOWED_NUTRIENTS: [&str; 3] = ["Calories", "Carbohydrates", "Protein"];

/// A single nutrient value for one serving of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    /// Nutrient name, one of [`ALLOWED_NUTRIENTS`]
    pub name: String,
    /// Amount per serving
    pub amount: f64,
    /// Unit of `amount` (e.g. "kcal", "g")
    pub unit: String,
}

impl Nutrient {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

/// One recipe in the uniform internal shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// Upstream recipe identifier
    pub id: i64,
    /// Recipe title
    pub title: String,
    /// Names of the query ingredients the recipe uses
    pub used_ingredients: Vec<String>,
    /// Names of ingredients the recipe needs that were not in the query
    pub missed_ingredients: Vec<String>,
    /// Allowed nutrients, in source order
    pub nutrients: Vec<Nutrient>,
}

impl RecipeRecord {
    /// Returns the nutrient with the given name, if present
    pub fn nutrient(&self, name: &str) -> Option<&Nutrient> {
        self.nutrients.iter().find(|n| n.name == name)
    }
}

/// All recipes satisfying one query, in API or storage order
pub type RecipeSet = Vec<RecipeRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> RecipeRecord {
        RecipeRecord {
            id: 715538,
            title: "Bruschetta".to_string(),
            used_ingredients: vec!["tomato".to_string()],
            missed_ingredients: vec!["bread".to_string(), "basil".to_string()],
            nutrients: vec![
                Nutrient::new("Calories", 145.3, "kcal"),
                Nutrient::new("Protein", 4.2, "g"),
            ],
        }
    }

    #[test]
    fn test_nutrient_lookup_by_name() {
        let recipe = sample_recipe();

        let calories = recipe.nutrient("Calories").expect("Calories should be present");
        assert!((calories.amount - 145.3).abs() < 0.001);
        assert_eq!(calories.unit, "kcal");

        assert!(recipe.nutrient("Carbohydrates").is_none());
    }

    #[test]
    fn test_recipe_serialization_roundtrip() {
        let recipe = sample_recipe();

        let json = serde_json::to_string(&recipe).expect("Failed to serialize RecipeRecord");
        let deserialized: RecipeRecord =
            serde_json::from_str(&json).expect("Failed to deserialize RecipeRecord");

        assert_eq!(deserialized, recipe);
    }

    #[test]
    fn test_allowed_nutrients_are_distinct() {
        for (i, a) in ALLOWED_NUTRIENTS.iter().enumerate() {
            for (j, b) in ALLOWED_NUTRIENTS.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }
}
