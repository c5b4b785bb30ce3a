//! Command-line entry point.
//!
//! # Usage
//!
//! ```bash
//! # Poll every configured shop page forever (default)
//! cargo run
//! cargo run -- watch
//!
//! # Serve GET /api/check
//! API_KEY=... cargo run -- serve
//!
//! # One pass, printed as a table
//! cargo run -- check
//! ```
//!
//! Everything else is configured through environment variables; see
//! [`listing_monitor::config`].

use listing_monitor::application::services::PassReport;
use listing_monitor::config::{self, Config};
use listing_monitor::server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

/// Watches shop listing counts and pushes a notification when they grow.
#[derive(Parser)]
#[command(name = "listing-monitor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Default)]
enum Commands {
    /// Check every target on a fixed interval until stopped
    #[default]
    Watch,

    /// Serve the on-demand check endpoint
    Serve,

    /// Check every target once and print the counts
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    init_tracing(&config);
    config.print_summary();

    match cli.command.unwrap_or_default() {
        Commands::Watch => server::run_watch(config).await?,
        Commands::Serve => server::run_server(config).await?,
        Commands::Check => {
            let report = server::run_check(config).await?;
            print_report(&report);
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Prints one pass as a table.
///
/// # Output Format
///
/// ```text
///   Count    Search term                          URL
///   ──────────────────────────────────────────────────────────────────────────
///   1234     Jackets (Size M, Black)              https://www.grailed.com/shop/...
///   FAILED   timed out after 30s                  https://www.grailed.com/shop/...
/// ```
fn print_report(report: &PassReport) {
    println!();
    println!("{}", "Listing counts".bright_blue().bold());
    println!();

    println!(
        "  {:<8} {:<36} {}",
        "Count".bright_white().bold(),
        "Search term".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for update in &report.updates {
        let search_term = if update.search_term.is_empty() {
            "-".to_string()
        } else {
            update.search_term.clone()
        };

        println!(
            "  {:<8} {:<36} {}",
            update.current_count.to_string().bright_green().bold(),
            search_term.cyan(),
            update.url.bright_black()
        );
    }

    for failure in &report.failures {
        println!(
            "  {:<8} {:<36} {}",
            "FAILED".red().bold(),
            failure.reason.yellow(),
            failure.url.bright_black()
        );
    }

    println!();
    println!(
        "  Checked: {}  Failed: {}",
        report.updates.len().to_string().bright_white().bold(),
        report.failures.len().to_string().bright_white().bold()
    );
    println!();
}
