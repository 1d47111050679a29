//! HTTP service surface: the request/response boundary over the pipeline.
//!
//! Exposes two routes:
//! - `POST /parse_news` — process a list of site URLs and return the
//!   aggregated article records
//! - `GET /` — informational endpoint describing the service
//!
//! The only caller-visible failure is an empty URL list, rejected with a
//! 400 and a `{"detail": ...}` body; every downstream failure is absorbed
//! by the pipeline and shows up only as a smaller result.

use crate::fetch::FetchPage;
use crate::models::{NewsResponse, SiteList};
use crate::pipeline::process_sites;
use crate::rules::Rules;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Shared, read-only service state. Generic over the fetcher so tests can
/// drive the full request path without a network.
pub struct AppState<F> {
    pub fetcher: F,
    pub rules: Rules,
    pub max_news: usize,
    pub site_deadline: Duration,
}

/// Caller-visible request errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("The list of site URLs must not be empty")]
    EmptySiteList,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::EmptySiteList => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Build the service router.
pub fn router<F: FetchPage + 'static>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/parse_news", post(parse_news::<F>))
        .with_state(state)
}

/// Handle `POST /parse_news`: validate the request, run the pipeline, and
/// aggregate records in site order.
async fn parse_news<F: FetchPage + 'static>(
    State(state): State<Arc<AppState<F>>>,
    Json(sites): Json<SiteList>,
) -> Result<Json<NewsResponse>, ApiError> {
    if sites.urls.is_empty() {
        return Err(ApiError::EmptySiteList);
    }
    info!(sites = sites.urls.len(), "Processing parse_news request");

    let news = process_sites(
        &state.fetcher,
        &sites.urls,
        state.max_news,
        state.site_deadline,
        &state.rules,
    )
    .await;

    info!(total = news.len(), "Request complete");
    Ok(Json(NewsResponse::from_items(news)))
}

/// Handle `GET /`: describe the service and give a usage example.
async fn service_info() -> Json<serde_json::Value> {
    Json(json!({
        "name": "newsgrab",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Extracts news articles from arbitrary sites using generic heuristics",
        "endpoints": {
            "/parse_news": "POST a list of site URLs to extract news from them"
        },
        "example": {
            "request": {
                "urls": ["https://example.com/news", "https://another-site.com/feed"]
            }
        }
    }))
}
