//! Plain-text recipe report

use std::io::{self, Write};

use crate::data::{RecipeRecord, RecipeSet};

/// Writes at most `limit` recipes to `out`, in set order.
///
/// This is the only place the user's requested count is enforced. A set
/// shorter than `limit` is written in full without complaint.
///
/// Returns the number of recipes written.
pub fn present<W: Write>(out: &mut W, recipes: &RecipeSet, limit: usize) -> io::Result<usize> {
    let mut written = 0;
    for recipe in recipes.iter().take(limit) {
        write_recipe(out, recipe)?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

fn write_recipe<W: Write>(out: &mut W, recipe: &RecipeRecord) -> io::Result<()> {
    write!(out, "\n\nRecipe: {}\n", recipe.title)?;
    writeln!(out, "Used Ingredients: {}", recipe.used_ingredients.join(", "))?;
    writeln!(out, "Missed Ingredients: {}", recipe.missed_ingredients.join(", "))?;
    writeln!(out, "Nutrients:")?;
    for nutrient in &recipe.nutrients {
        writeln!(out, "{}: {:.2} {}", nutrient.name, nutrient.amount, nutrient.unit)?;
    }
    Ok(())
}
