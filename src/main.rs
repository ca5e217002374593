// src/main.rs
// =============================================================================
// This is the entry point of the spider.
//
// What happens here:
// 1. Set up logging (tracing, written to stderr)
// 2. Parse command-line arguments using clap
// 3. Get the listing page HTML (from the network or from a file)
// 4. Extract the question records and write them out
// 5. Exit with proper code (0 = success, 1 = extraction aborted, 2 = error)
// =============================================================================

mod cli;
mod config;
mod extract;
mod fetch;
mod output;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use scraper::Html;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, ExtractArgs};
use config::{SpiderConfig, DEFAULT_ALLOWED_DOMAINS};
use extract::{Extractor, ListingRule, MissingFieldPolicy};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stack_spider=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Returns:
//   Ok(0) = records extracted (possibly zero)
//   Ok(1) = --strict and a malformed question stopped extraction
//   Err = fetch, parse or write failure
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            url,
            allowed_domains,
            extract,
        } => handle_crawl(&url, allowed_domains, &extract).await,
        Commands::Parse { file, extract } => handle_parse(&file, &extract),
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(url: &str, allowed_domains: Vec<String>, args: &ExtractArgs) -> Result<i32> {
    let allowed_domains = if allowed_domains.is_empty() {
        DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect()
    } else {
        allowed_domains
    };

    let config = SpiderConfig::new(url, allowed_domains)?
        .with_rule(listing_rule(args)?)
        .with_policy(policy(args));

    eprintln!("🕷️  Spider '{}' crawling: {}", config.name, config.start_url);

    let page = fetch::fetch_listing(&config).await?;

    eprintln!("📄 Fetched {} ({} bytes)", page.url, page.body.len());

    scrape(&page.body, &config.extractor(), args)
}

// Handles the 'parse' subcommand
fn handle_parse(file: &Path, args: &ExtractArgs) -> Result<i32> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    eprintln!("📄 Parsing {} ({} bytes)", file.display(), html.len());

    let extractor = Extractor::new(listing_rule(args)?, policy(args));
    scrape(&html, &extractor, args)
}

// Extracts records from one page and writes them out
//
// Under --strict, the records before the malformed question are still
// written; then the error is reported and the exit code is 1.
fn scrape(html: &str, extractor: &Extractor, args: &ExtractArgs) -> Result<i32> {
    let document = Html::parse_document(html);
    let extraction = extractor.extract(&document);

    info!(
        records = extraction.records.len(),
        skipped = extraction.skipped,
        "Extraction finished"
    );

    if extraction.records.is_empty() && extraction.error.is_none() {
        warn!("No questions matched the listing selectors");
    }

    output::emit_records(&extraction.records, args.format, args.output.as_deref())?;

    if extraction.skipped > 0 {
        eprintln!("⚠️  Skipped {} malformed question(s)", extraction.skipped);
    }

    match extraction.error {
        Some(e) => {
            eprintln!("❌ Extraction aborted: {}", e);
            Ok(1)
        }
        None => Ok(0),
    }
}

fn listing_rule(args: &ExtractArgs) -> Result<ListingRule> {
    let rule = ListingRule::new(&args.entry_selector, &args.link_selector)?;
    Ok(rule)
}

fn policy(args: &ExtractArgs) -> MissingFieldPolicy {
    if args.strict {
        MissingFieldPolicy::Abort
    } else {
        MissingFieldPolicy::Skip
    }
}
