//! Pagesight main entry point
//!
//! This is the command-line interface for the Pagesight accessibility scanner.

use anyhow::Context;
use clap::Parser;
use pagesight::config::{load_config_with_hash, Config};
use pagesight::report::{ScanResult, Violation};
use pagesight::scan_website;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagesight: a website accessibility scanner
///
/// Pagesight renders a page, runs a battery of WCAG-derived checks
/// against it, and reports a 0-100 compliance score. With --multi-page
/// it crawls same-origin links from the target and aggregates the
/// findings into a site-level report.
#[derive(Parser, Debug)]
#[command(name = "pagesight")]
#[command(version)]
#[command(about = "A website accessibility scanner", long_about = None)]
struct Cli {
    /// URL of the page to scan (http or https)
    #[arg(value_name = "URL")]
    url: String,

    /// Crawl same-origin links and aggregate results
    #[arg(long)]
    multi_page: bool,

    /// Maximum pages to scan in multi-page mode
    #[arg(long, value_name = "N", requires = "multi_page")]
    max_pages: Option<u32>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit the report as JSON instead of a text summary
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or fall back to built-in defaults
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let max_pages = cli.max_pages.unwrap_or(config.scan.default_max_pages);
    let result = scan_website(&cli.url, cli.multi_page, max_pages, &config).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&cli.url, &result);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagesight=info,warn"),
            1 => EnvFilter::new("pagesight=debug,info"),
            2 => EnvFilter::new("pagesight=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints a human-readable scan report to stdout.
fn print_report(url: &str, result: &ScanResult) {
    println!("=== Pagesight Accessibility Report ===\n");
    println!("Target: {}", url);
    if result.degraded {
        println!("Mode: degraded (rendering unavailable, results are estimates)");
    }
    println!("Score: {}/100", result.score);
    println!("Checks passed: {}", result.passed_checks);
    println!("Issues found: {}", result.issue_count);

    if result.is_multi_page {
        println!("\nPages scanned ({}):", result.pages_scanned.len());
        for page in &result.pages_scanned {
            println!("  - {}", page);
        }
    }

    if result.violations.is_empty() {
        println!("\n✓ No accessibility violations detected");
        return;
    }

    println!("\nViolations ({}):", result.violations.len());
    for violation in &result.violations {
        print_violation(violation);
    }

    if let Some(pages) = &result.page_results {
        println!("\nPer-page scores:");
        for page in pages {
            println!(
                "  {} - score {}, {} issues",
                page.url, page.score, page.issue_count
            );
        }
    }
}

fn print_violation(violation: &Violation) {
    println!(
        "  [{:?}] {} (x{})",
        violation.impact, violation.id, violation.count
    );
    println!("      {}", violation.description);
    println!(
        "      WCAG {} / {:?}",
        violation.wcag_level, violation.principle
    );
    if let Some(recommendation) = &violation.recommendation {
        println!("      Fix: {}", recommendation);
    }
}
