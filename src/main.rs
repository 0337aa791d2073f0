// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (exactly one URL)
// 2. Set up logging (tracing, to stderr)
// 3. Crawl the page
// 4. Print the body, its links or a JSON summary to stdout
// 5. Exit with proper code (0 = crawled or skipped, 2 = error)
// =============================================================================

mod cli;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use page_crawler::{normalize_url, CrawlConfig, CrawledPage, Crawler};

#[tokio::main]
async fn main() {
    // Parse CLI arguments first, so --help and usage errors print without logs
    let cli = Cli::parse();

    // RUST_LOG wins over -v / -q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = page crawled, or skipped because it isn't HTML
//   Err   = invalid URL, timeout, network error or HTTP error status
async fn run(cli: Cli) -> Result<i32> {
    // Reject input that isn't a URL before touching the network
    let key = normalize_url(&cli.url)?;
    debug!(url = %cli.url, key = %key, "Normalized start URL");

    let config = CrawlConfig {
        timeout: Duration::from_secs(cli.timeout),
        ..CrawlConfig::default()
    };
    let crawler = Crawler::new(config)?;

    info!("Starting crawl of : {}", cli.url);

    match crawler.crawl(&cli.url).await? {
        Some(page) => print_page(&page, &cli)?,
        None => info!("Nothing to print for {}", cli.url),
    }

    Ok(0)
}

fn print_page(page: &CrawledPage, cli: &Cli) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(page)?);
    } else if cli.links {
        for link in &page.links {
            println!("{}", link);
        }
    } else {
        println!("{}", page.body);
    }
    Ok(())
}
