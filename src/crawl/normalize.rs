// src/crawl/normalize.rs
// =============================================================================
// This module turns a URL into a comparison key.
//
// The key is host + path:
//   "https://Blog.Boot.dev/path/"  ->  "blog.boot.dev/path"
//
// The query string and fragment are dropped on purpose. The key is only
// used to tell whether two URLs point at the same page, it is never fetched.
//
// Quirk kept on purpose: the whole key is lower-cased ONLY when a trailing
// '/' was removed. "http://example.com/Path" keeps its path casing,
// "http://example.com/Path/" becomes "example.com/path". The tests at the
// bottom pin this down.
// =============================================================================

use url::Url;

use crate::error::CrawlError;

// Normalizes a URL into its host+path key
//
// Parameters:
//   url: any absolute URL string
//
// Returns: the key, or CrawlError::InvalidUrl if the string doesn't parse
pub fn normalize_url(url: &str) -> Result<String, CrawlError> {
    let parsed = Url::parse(url).map_err(|e| CrawlError::invalid_url(url, e))?;

    // host_str() is None for URLs like "mailto:someone@example.com"
    let host = parsed.host_str().unwrap_or("");
    let full_path = format!("{}{}", host, parsed.path());

    // Strip exactly one trailing separator (and only then fold case)
    match full_path.strip_suffix('/') {
        Some(trimmed) => Ok(trimmed.to_lowercase()),
        None => Ok(full_path),
    }
}
