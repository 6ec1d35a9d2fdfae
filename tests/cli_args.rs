//! Integration tests for CLI argument handling
//!
//! Tests usage errors and exit codes from the command line. None of these
//! reach the network: they all fail or exit before a search starts.

use std::net::TcpListener;
use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_recipe-finder"))
        .args(args)
        .env_remove("SPOONACULAR_API_KEY")
        .env_remove("RECIPE_FINDER_DATABASE")
        .env("RECIPE_FINDER_NO_CACHE", "true")
        .output()
        .expect("Failed to execute recipe-finder")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("recipe-finder"), "Help should mention recipe-finder");
    assert!(stdout.contains("--ingredients"), "Help should mention --ingredients");
    assert!(stdout.contains("--number-of-recipes"), "Help should mention --number-of-recipes");
}

#[test]
fn test_help_hides_api_key_value() {
    let output = Command::new(env!("CARGO_BIN_EXE_recipe-finder"))
        .arg("--help")
        .env("SPOONACULAR_API_KEY", "super-secret-value")
        .output()
        .expect("Failed to execute recipe-finder");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("super-secret-value"));
}

#[test]
fn test_missing_arguments_is_usage_error() {
    let output = run_cli(&[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty(), "No report should be printed");
}

#[test]
fn test_zero_recipes_is_usage_error() {
    let output = run_cli(&["--api-key", "k", "--ingredients", "egg", "--number-of-recipes", "0"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("number-of-recipes") || stderr.contains("0"));
}

#[test]
fn test_missing_api_key_is_usage_error() {
    let output = run_cli(&["--ingredients", "egg", "--number-of-recipes", "2"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("api-key") || stderr.contains("SPOONACULAR_API_KEY"));
}

#[test]
fn test_blank_ingredients_is_usage_error() {
    let output = run_cli(&["--api-key", "k", "--ingredients", " , ", "-n", "2"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no ingredients"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

/// Endpoint URL on a local port nothing listens on
fn dead_api_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a local port");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}/recipes/complexSearch", addr)
}

#[test]
fn test_unreachable_api_exits_with_failure() {
    let api_url = dead_api_url();
    let output = run_cli(&[
        "--api-key",
        "k",
        "--ingredients",
        "egg",
        "-n",
        "1",
        "--api-url",
        &api_url,
        "--timeout",
        "2",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "No partial report should be printed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"), "stderr: {}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use recipe_finder::cli::{Cli, CliError, StartupConfig};

    #[test]
    fn test_cli_parse_full_invocation() {
        let cli = Cli::parse_from([
            "recipe-finder",
            "--api-key",
            "k",
            "--ingredients",
            "apples,flour,sugar",
            "--number-of-recipes",
            "5",
        ]);
        assert_eq!(cli.ingredients, ["apples", "flour", "sugar"]);
        assert_eq!(cli.number_of_recipes, 5);
    }

    #[test]
    fn test_startup_config_is_order_insensitive() {
        let a = Cli::parse_from(["recipe-finder", "--api-key", "k", "-i", "b,a,b", "-n", "1", "--no-cache"]);
        let b = Cli::parse_from(["recipe-finder", "--api-key", "k", "-i", "a,b", "-n", "1", "--no-cache"]);

        let a = StartupConfig::from_cli(&a).unwrap();
        let b = StartupConfig::from_cli(&b).unwrap();
        assert_eq!(a.query, b.query);
        assert!(a.database.is_none());
    }

    #[test]
    fn test_startup_config_empty_ingredient() {
        let cli = Cli::parse_from(["recipe-finder", "--api-key", "k", "-i", "", "-n", "1"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(matches!(result, Err(CliError::EmptyIngredients)));
    }
}
