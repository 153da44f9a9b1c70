//! Command-line front end for the ranked repository search.
//!
//! Runs one search through the same client, retry policy and scoring as the
//! HTTP service and prints the ranked page.
//!
//! # Usage
//!
//! ```bash
//! # Top Rust repositories created this year
//! cargo run --bin popularity -- --language Rust --created-after 2024-01-01
//!
//! # Free-text search, second page, JSON output
//! cargo run --bin popularity -- --query "web framework" --page 2 --json
//! ```
//!
//! # Environment Variables
//!
//! Reads the same `GITHUB_*` and `CIRCUIT_*` variables as the server
//! (see `repo_popularity::config`).

use repo_popularity::api::dto::popularity::{DEFAULT_PAGE, DEFAULT_PER_PAGE, PopularityResponse};
use repo_popularity::config;
use repo_popularity::prelude::*;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use colored::*;
use std::sync::Arc;

/// Search GitHub repositories ranked by popularity score.
#[derive(Parser)]
#[command(name = "popularity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Free-text search term
    #[arg(short, long)]
    query: Option<String>,

    /// Repository language (e.g., "Rust", "Go")
    #[arg(short, long)]
    language: Option<String>,

    /// Only repositories created on or after this date (YYYY-MM-DD)
    #[arg(short = 'c', long)]
    created_after: Option<NaiveDate>,

    /// Results per page (1-100)
    #[arg(long, default_value_t = DEFAULT_PER_PAGE, value_parser = clap::value_parser!(u32).range(1..=100))]
    per_page: u32,

    /// Page number (1-based)
    #[arg(short, long, default_value_t = DEFAULT_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    let breaker = Arc::new(CircuitBreaker::new(config.circuit_breaker_config()));
    let client = GithubClient::new(config.github_client_config(), breaker)
        .context("Failed to build GitHub client")?;
    let service = PopularityService::new(Arc::new(client));

    let filter = SearchFilter::new(cli.language, cli.created_after, cli.query);

    let result = match service
        .handle(&filter, cli.per_page, cli.page, Utc::now())
        .await
    {
        Ok(result) => result,
        Err(err) => {
            let (status, message) = AppError::from(err.clone()).status_and_message();
            eprintln!("{} {}", "Error:".red().bold(), message);
            eprintln!("  {}", err.to_string().bright_black());
            anyhow::bail!("search failed with status {}", status.as_u16());
        }
    };

    if cli.json {
        let response = PopularityResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_table(&result, cli.page);
    }

    Ok(())
}

/// Renders one ranked page as a colored table.
fn print_table(result: &PopularityResult, page: u32) {
    println!("{}", "Popular repositories".bright_blue().bold());
    println!();

    if result.items.is_empty() {
        println!("{}", "  No repositories found".yellow());
        println!();
        return;
    }

    println!(
        "  {:<4} {:>9} {:<45} {:<12} {:>8} {:>7} {:<10}",
        "#".bright_white().bold(),
        "Score".bright_white().bold(),
        "Repository".bright_white().bold(),
        "Language".bright_white().bold(),
        "Stars".bright_white().bold(),
        "Forks".bright_white().bold(),
        "Updated".bright_white().bold()
    );
    println!("  {}", "─".repeat(100).bright_black());

    for (rank, repo) in result.items.iter().enumerate() {
        println!(
            "  {:<4} {:>9} {:<45} {:<12} {:>8} {:>7} {}",
            (rank + 1).to_string().bright_black(),
            format!("{:.2}", repo.score).green().bold(),
            repo.name.cyan(),
            repo.language.as_deref().unwrap_or("-"),
            repo.stars,
            repo.forks,
            repo.updated_at
                .format("%Y-%m-%d")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Page {}: {} of {} total matches",
        page.to_string().bright_white().bold(),
        result.count().to_string().bright_white().bold(),
        result.total_count.to_string().bright_white()
    );
    println!();
}
