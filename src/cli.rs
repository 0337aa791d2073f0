// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The crawler takes exactly one positional argument, the URL to crawl.
// clap prints a usage message (and exits with code 2) when it gets
// zero URLs or more than one.
// =============================================================================

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "page-crawler",
    version,
    about = "Fetch one web page, check that it is HTML and extract its links",
    long_about = "page-crawler fetches a single URL with a hard timeout. If the page is HTML \
                  it prints the body (or its links, or a JSON summary). Non-HTML pages are \
                  skipped without an error."
)]
pub struct Cli {
    /// Website URL to crawl (e.g., https://example.com)
    ///
    /// This is a positional argument (required, exactly one)
    pub url: String,

    /// Give up if the server hasn't answered after this many seconds
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub timeout: u64,

    /// Print the crawled page (url, status, links, body) as JSON
    #[arg(long, conflicts_with = "links")]
    pub json: bool,

    /// Print only the extracted links, one per line
    #[arg(long)]
    pub links: bool,

    /// More logging (-v = debug, -vv = trace). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Log level used when RUST_LOG is not set
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
