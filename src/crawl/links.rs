// src/crawl/links.rs
// =============================================================================
// This module extracts links from an HTML page.
//
// We use the `scraper` crate to parse the HTML and find every <a> element,
// and the `url` crate to turn each href into an absolute URL.
//
// Resolution rules (kept deliberately simple):
// - href starts with '/'  -> site-relative: base_url + href, then parse
// - anything else         -> must already be an absolute http(s) URL
//
// A bad href never stops the extraction. It is logged, recorded in
// ExtractedLinks::failures and skipped. Links come back in document order
// and duplicates are kept.
// =============================================================================

use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::fetch::parse_fetchable_url;
use crate::error::CrawlError;

/// Everything one pass over a document produced
#[derive(Debug, Default)]
pub struct ExtractedLinks {
    /// Absolute URLs, in document order, duplicates included
    pub links: Vec<String>,
    /// One entry per anchor that could not be resolved
    pub failures: Vec<CrawlError>,
}

// Extracts all links from HTML content
//
// Example:
//   html = "<a href='/about'>About</a>"
//   base_url = "https://site.example"
//   result = ["https://site.example/about"]
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    extract_links_with_failures(html, base_url).links
}

// Same as extract_links, but also hands back the per-link failures
pub fn extract_links_with_failures(html: &str, base_url: &str) -> ExtractedLinks {
    let mut extracted = ExtractedLinks::default();

    let document = Html::parse_document(html);

    // Plain "a" (not "a[href]"): anchors without href count as failures too.
    // The selector is a constant, so parsing it cannot fail at runtime.
    let selector = Selector::parse("a").expect("'a' is a valid CSS selector");

    for element in document.select(&selector) {
        let result = match element.value().attr("href") {
            Some(href) => resolve_href(href, base_url),
            None => Err(CrawlError::invalid_url("", "anchor has no href attribute")),
        };

        match result {
            Ok(url) => extracted.links.push(url),
            Err(e) => {
                warn!(base_url, error = %e, "Skipping link");
                extracted.failures.push(e);
            }
        }
    }

    debug!(
        base_url,
        links = extracted.links.len(),
        failures = extracted.failures.len(),
        "Extracted links"
    );

    extracted
}

// Turns one href into an absolute URL string
//
// Examples (base = "https://site.example"):
//   "/about"                   -> Ok("https://site.example/about")
//   "https://other.example/x"  -> Ok("https://other.example/x")
//   "about"                    -> Err (relative without leading '/')
//   "mailto:me@site.example"   -> Err (not http/https)
//   ""                         -> Err
fn resolve_href(href: &str, base_url: &str) -> Result<String, CrawlError> {
    let candidate = if href.starts_with('/') {
        format!("{}{}", base_url, href)
    } else {
        href.to_string()
    };

    let url = parse_fetchable_url(&candidate, href)?;
    Ok(url.to_string())
}
