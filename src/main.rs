//! # newsgrab
//!
//! A news extraction service that takes arbitrary, previously-unseen news
//! site URLs and returns structured article records, using only generic
//! structural and textual heuristics: no learned models, no per-site rules.
//!
//! ## Pipeline
//!
//! 1. **Link discovery**: decide which links on a site's front page are
//!    likely individual articles (container selectors, URL shape patterns,
//!    headline-text heuristics)
//! 2. **Content extraction**: pull a clean title and body from each
//!    candidate page, rejecting listing, navigation, and error pages via
//!    layered quality gates
//! 3. **Orchestration**: run both stages per site with a result cap and
//!    full per-site/per-link failure isolation
//!
//! ## Usage
//!
//! ```sh
//! newsgrab --bind 0.0.0.0:8000
//! curl -X POST localhost:8000/parse_news \
//!   -H 'Content-Type: application/json' \
//!   -d '{"urls": ["https://example.com"]}'
//! ```

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod discovery;
mod extract;
mod fetch;
mod models;
mod pipeline;
mod rules;
mod service;
mod utils;

use cli::Cli;
use fetch::HttpFetcher;
use rules::DEFAULT_RULES;
use service::AppState;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    info!(
        bind = %args.bind,
        max_news = args.max_news,
        fetch_timeout_secs = args.fetch_timeout_secs,
        "newsgrab starting up"
    );

    let fetcher = HttpFetcher::new(Duration::from_secs(args.fetch_timeout_secs))?;
    let state = Arc::new(AppState {
        fetcher,
        rules: DEFAULT_RULES.clone(),
        max_news: args.max_news,
        site_deadline: Duration::from_secs(args.site_deadline_secs),
    });

    let app = service::router(state);
    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!(addr = %args.bind, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
