//! Recipe Finder Library
//!
//! Finds recipes for a list of ingredients through the Spoonacular API,
//! caching results in a local SQLite database.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod finder;
pub mod present;
