// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: download the listing page and scrape it
// - parse: scrape a listing page saved to disk (no network)
//
// Options shared by both live in `ExtractArgs` and are flattened into each
// subcommand.
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_START_URL;
use crate::extract::{DEFAULT_ENTRY_SELECTOR, DEFAULT_LINK_SELECTOR};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "stack-spider",
    version,
    about = "Scrape question titles and links from the Stack Overflow newest-questions page",
    long_about = "stack-spider fetches one listing page of newest Stack Overflow questions \
                  and prints the title and URL of every question on it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the listing page and scrape it
    ///
    /// Example: stack-spider crawl --format json
    Crawl {
        /// Page to fetch
        #[arg(long, env = "STACK_SPIDER_START_URL", default_value = DEFAULT_START_URL)]
        url: String,

        /// Domain the spider may fetch from (repeatable, subdomains included)
        ///
        /// Defaults to stackoverflow.com
        #[arg(long = "allow-domain", value_name = "DOMAIN")]
        allowed_domains: Vec<String>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Scrape a listing page saved as an HTML file
    ///
    /// Example: stack-spider parse newest.html --format jsonl
    Parse {
        /// Path to the saved HTML page
        file: PathBuf,

        #[command(flatten)]
        extract: ExtractArgs,
    },
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// How to print the scraped records
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write records to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Stop at the first question that is missing its link, title or href
    ///
    /// Without this flag such questions are skipped with a warning.
    #[arg(long)]
    pub strict: bool,

    /// CSS selector matching one question entry
    #[arg(long, default_value = DEFAULT_ENTRY_SELECTOR)]
    pub entry_selector: String,

    /// CSS selector matching the question link inside an entry
    #[arg(long, default_value = DEFAULT_LINK_SELECTOR)]
    pub link_selector: String,
}
