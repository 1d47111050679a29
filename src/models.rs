//! Wire types for the news extraction service.
//!
//! This module defines the request/response data structures exchanged over
//! the HTTP boundary:
//! - [`SiteList`]: the list of site root URLs supplied by the caller
//! - [`NewsItem`]: one accepted article record
//! - [`NewsResponse`]: the aggregated result for a request
//!
//! All values are request-scoped; nothing here is persisted or shared
//! between requests.

use serde::{Deserialize, Serialize};

/// Request body for `POST /parse_news`: the sites to process, in order.
///
/// An empty list is rejected at the service boundary with a client error
/// before any site is processed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteList {
    /// Root URLs of the sites to extract news from.
    pub urls: Vec<String>,
}

/// One accepted article record.
///
/// # Invariants
///
/// Every emitted `NewsItem` has a non-empty title (the literal `"untitled"`
/// when no title source yielded text), a body of at least 100 characters,
/// and was backed by at least 3 distinct extracted paragraphs. Records that
/// fail these checks are dropped during extraction and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    /// The article URL the content was extracted from.
    pub url: String,
    /// The article title or the `"untitled"` fallback.
    pub title: String,
    /// Plain-text article body, paragraphs joined with single spaces.
    pub content: String,
}

/// Aggregated response for a request.
///
/// `total` always equals `news.len()`. Ordering follows the request's site
/// order, then discovery order within each site.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsResponse {
    /// Number of records in `news`.
    pub total: usize,
    /// The accepted article records across all requested sites.
    pub news: Vec<NewsItem>,
}

impl NewsResponse {
    /// Build a response from collected records, filling in `total`.
    pub fn from_items(news: Vec<NewsItem>) -> Self {
        Self {
            total: news.len(),
            news,
        }
    }
}
