// src/lib.rs
// =============================================================================
// Library side of page-crawler.
//
// The binary (src/main.rs) is a thin CLI over this. Everything with real
// rules lives here:
// - crawl: URL normalization, link extraction, bounded fetch, page crawl
// - error: the CrawlError kinds every operation reports
// =============================================================================

pub mod crawl;
pub mod error;

pub use crawl::{
    crawl_page, extract_links, extract_links_with_failures, fetch_with_timeout, normalize_url,
    CrawlConfig, CrawledPage, Crawler, ExtractedLinks, DEFAULT_TIMEOUT,
};
pub use error::CrawlError;
