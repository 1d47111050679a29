//! Page fetching with the permissive client policy scraping requires.
//!
//! This module provides the raw-markup retrieval capability behind both
//! engines. It uses a trait-based design so the orchestrator can be driven
//! by a test double instead of the network:
//! - [`FetchPage`]: core trait for retrieving a page's markup
//! - [`HttpFetcher`]: reqwest-backed implementation
//!
//! # Fetch policy
//!
//! - Standard browser user agent (some sites refuse unknown clients)
//! - Fixed request timeout (10 seconds by default)
//! - TLS certificate validation disabled: arbitrary small news sites are
//!   routinely misconfigured, and scraping them is a requirement
//! - No retries; every transport error or non-2xx status yields `None`

use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Browser identity presented to target sites.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Trait for retrieving a page's raw markup.
///
/// `None` means "no markup available" for any reason: timeout, DNS, TLS,
/// non-2xx status. Callers treat it as zero links or a rejected article,
/// never as a fatal error.
pub trait FetchPage: Send + Sync {
    /// Fetch the page at `url`, returning its markup text if available.
    fn fetch(&self, url: &str) -> impl Future<Output = Option<String>> + Send;
}

/// HTTP implementation of [`FetchPage`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the scraping client policy and the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let t0 = Instant::now();
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(%url, error = %e, "Fetch failed");
                return None;
            }
        };

        let response = match response.error_for_status() {
            Ok(r) => r,
            Err(e) => {
                warn!(%url, error = %e, "Fetch returned error status");
                return None;
            }
        };

        match response.text().await {
            Ok(body) => {
                debug!(
                    %url,
                    bytes = body.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Fetched page"
                );
                Some(body)
            }
            Err(e) => {
                warn!(%url, error = %e, "Failed to read response body");
                None
            }
        }
    }
}
