// src/crawl/mod.rs
// =============================================================================
// This module crawls a single web page.
//
// Submodules:
// - normalize: turns a URL into a host+path comparison key
// - links: extracts absolute links from an HTML document
// - fetch: HTTP GET with a hard deadline
// - page: fetch + content-type check + link extraction
//
// There is no shared state between calls: no visited set, no cache, no queue.
// =============================================================================

mod fetch;
mod links;
mod normalize;
mod page;

// Re-export so callers can write `crawl::crawl_page()`
pub use fetch::fetch_with_timeout;
pub use links::{extract_links, extract_links_with_failures, ExtractedLinks};
pub use normalize::normalize_url;
pub use page::{crawl_page, CrawlConfig, CrawledPage, Crawler, DEFAULT_TIMEOUT};
