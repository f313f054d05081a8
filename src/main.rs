//! Paexkey main entry point
//!
//! This is the command-line interface for the Paexkey URL harvester.

use anyhow::Context;
use clap::Parser;
use paexkey::config::{load_file_config_with_hash, resolve_settings, Overrides, Settings};
use paexkey::crawler::crawl;
use paexkey::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Paexkey: a depth-bounded URL harvester
///
/// Paexkey crawls outward from a seed URL, collects every link and resource URL
/// it can find, and appends them to `<output>/<domain>/<domain>.txt`. An
/// optional keyword list narrows the results into `<domain>_filtered.txt`.
#[derive(Parser, Debug)]
#[command(name = "paexkey")]
#[command(version)]
#[command(about = "Harvest URLs from a site, then filter them by keyword", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// File with one keyword per line; matching URLs go to <domain>_filtered.txt
    #[arg(short, long, value_name = "FILE")]
    keywords: Option<PathBuf>,

    /// Delete <domain>.txt after filtering (requires --keywords)
    #[arg(short = 'i', long)]
    delete_input: bool,

    /// Number of concurrent fetches
    #[arg(short, long, value_name = "N")]
    threads: Option<usize>,

    /// Report network errors and per-URL progress
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Maximum link depth from the seed
    #[arg(short, long, value_name = "N")]
    depth: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed_url: self.url.clone(),
            max_depth: self.depth,
            threads: self.threads,
            timeout_secs: self.timeout,
            verbose: self.verbose,
            output_dir: self.output.clone(),
            keywords: self.keywords.clone(),
            delete_input: self.delete_input,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (file_config, hash) = load_file_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Some(file_config)
        }
        None => None,
    };

    let settings = resolve_settings(cli.overrides(), file_config).context("Invalid settings")?;

    if cli.dry_run {
        handle_dry_run(&settings);
        return Ok(());
    }

    let stats = crawl(settings).await.context("Crawl failed")?;

    if !cli.quiet {
        println!();
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("paexkey=debug,info")
    } else {
        EnvFilter::new("paexkey=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved settings
fn handle_dry_run(settings: &Settings) {
    let crawler = &settings.crawler;
    let output = &settings.output;

    println!("=== Paexkey Dry Run ===\n");

    println!("Crawler:");
    println!("  Seed: {}", crawler.seed_url);
    println!("  Max depth: {}", crawler.max_depth);
    println!("  Workers: {}", crawler.workers);
    println!("  Request timeout: {:?}", crawler.request_timeout);
    println!("  User agent: {}", crawler.user_agent);

    println!("\nOutput:");
    println!("  Directory: {}", output.directory.display());
    match &output.keywords {
        Some(path) => println!("  Keywords: {}", path.display()),
        None => println!("  Keywords: none"),
    }
    println!("  Delete input: {}", output.delete_input);

    println!("\n✓ Settings are valid");
}
