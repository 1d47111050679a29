//! Site orchestration: drive link discovery, then content extraction, for
//! each requested site.
//!
//! Sites are processed one at a time and links within a site one at a time,
//! in discovery order. Discovery over-fetches (twice the requested article
//! count) so extraction rejections and dead links can be absorbed without
//! falling short of the cap. Every per-link and per-site failure is logged
//! and contained; one bad site never affects the others in a batch.

use crate::discovery::discover_links;
use crate::extract::extract_article;
use crate::fetch::FetchPage;
use crate::models::NewsItem;
use crate::rules::Rules;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Process one site: discover candidate links on its front page, then fetch
/// and extract each candidate until `max_news` records are collected.
///
/// Returns records in discovery order, never more than `max_news`. All
/// failures (unparseable site URL, unreachable pages, rejected extractions)
/// yield a shorter or empty result, never an error.
#[instrument(level = "info", skip_all, fields(site = %site_url, max_news))]
pub async fn process_site<F: FetchPage>(
    fetcher: &F,
    site_url: &str,
    max_news: usize,
    rules: &Rules,
) -> Vec<NewsItem> {
    if max_news == 0 {
        return Vec::new();
    }
    let parsed = match Url::parse(site_url) {
        Ok(u) => u,
        Err(e) => {
            warn!(error = %e, "Invalid site URL; skipping site");
            return Vec::new();
        }
    };

    let Some(html) = fetcher.fetch(site_url).await else {
        warn!("Front page unavailable; skipping site");
        return Vec::new();
    };

    // Over-fetch candidates to absorb extraction failures.
    let links = discover_links(&html, &parsed, max_news * 2, rules);
    if links.is_empty() {
        warn!("No article links discovered");
        return Vec::new();
    }
    info!(candidates = links.len(), "Discovered candidate article links");

    let mut result = Vec::new();
    for link in &links {
        if result.len() >= max_news {
            break;
        }
        let Some(page) = fetcher.fetch(link).await else {
            continue;
        };
        match extract_article(&page, link, rules) {
            Some(item) => {
                debug!(url = %link, "Extracted article");
                result.push(item);
            }
            None => {
                debug!(url = %link, "Candidate rejected");
            }
        }
    }

    info!(count = result.len(), "Finished site");
    result
}

/// Process a batch of sites sequentially, preserving site order.
///
/// Each site runs under `site_deadline`; a site that exceeds it contributes
/// nothing while the remaining sites still run.
#[instrument(level = "info", skip_all, fields(sites = urls.len()))]
pub async fn process_sites<F: FetchPage>(
    fetcher: &F,
    urls: &[String],
    max_news: usize,
    site_deadline: Duration,
    rules: &Rules,
) -> Vec<NewsItem> {
    let per_site: Vec<Vec<NewsItem>> = stream::iter(urls)
        .then(|url| async move {
            match tokio::time::timeout(
                site_deadline,
                process_site(fetcher, url, max_news, rules),
            )
            .await
            {
                Ok(items) => items,
                Err(_) => {
                    warn!(%url, "Site processing deadline exceeded; moving on");
                    Vec::new()
                }
            }
        })
        .collect()
        .await;

    per_site.into_iter().flatten().collect()
}
