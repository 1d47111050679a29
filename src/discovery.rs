//! Link discovery: deciding which links on an unknown front page are
//! probably individual news articles.
//!
//! The engine works in layered passes over the parsed markup:
//!
//! 1. Find "news containers" via structural selectors, falling back to any
//!    element whose class tokens contain a listing keyword.
//! 2. Collect candidate anchors: heading links inside containers first,
//!    then anchors with headline-length text; if containers yield nothing,
//!    fall back to page-wide heading links and headline-length anchors.
//! 3. Score each candidate: resolve to an absolute same-origin URL, drop
//!    anything on the exclusion list, then test the path against the
//!    article-shape patterns, structural path heuristics, and the anchor
//!    text heuristic.
//! 4. If nothing was accepted, a last-resort pass re-scans every anchor on
//!    the page using only the origin, exclusion, and pattern tests.
//!
//! The engine is a pure function of the markup and parameters: same input,
//! same ordered output. It never fails; absence of findings is an empty vec.

use crate::rules::Rules;
use crate::utils::normalize_ws;
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};
use url::Url;

/// Where a candidate anchor was found; higher-confidence kinds come first
/// in the candidate ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Inside an h1-h4 heading (within a container or page-wide).
    Heading,
    /// Inside a recognized news container, outside a heading.
    StructuredContainer,
    /// A bare anchor matched only by its headline-length text.
    GenericAnchor,
}

struct Candidate<'a> {
    link: ElementRef<'a>,
    kind: ContainerKind,
}

/// Discover probable article URLs on a site's front page.
///
/// Returns up to `max_links` absolute URLs in discovery order, deduplicated,
/// all sharing the origin of `site_url`. Never errors; a page with no
/// usable anchors yields an empty vec.
#[instrument(level = "debug", skip_all, fields(site = %site_url, max_links))]
pub fn discover_links(
    html: &str,
    site_url: &Url,
    max_links: usize,
    rules: &Rules,
) -> Vec<String> {
    if max_links == 0 {
        return Vec::new();
    }
    let Some(site_host) = site_url.host_str() else {
        warn!("Site URL has no host; nothing to discover");
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let base = link_base(site_url);

    let candidates = collect_candidates(&document, rules);
    debug!(count = candidates.len(), "Collected candidate anchors");

    let mut accepted: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for candidate in &candidates {
        if accepted.len() >= max_links {
            break;
        }
        let href = candidate.link.attr("href").unwrap_or_default();
        let Some(full) = resolve_href(&base, href) else {
            continue;
        };
        if !same_origin(&full, site_host) || is_excluded(&full, rules) {
            continue;
        }

        let text = anchor_text(&candidate.link);
        let shaped = matches_article_pattern(full.path(), rules)
            || path_heuristics(full.path())
            || headline_text_heuristic(&text, rules);
        if !shaped {
            continue;
        }

        let url = full.to_string();
        if seen.insert(url.clone()) {
            debug!(%url, kind = ?candidate.kind, "Accepted article link");
            accepted.push(url);
        }
    }

    // Last resort: every anchor on the page, pattern test only.
    if accepted.is_empty() {
        warn!("No links accepted from containers; falling back to URL patterns");
        for link in document.select(&rules.anchors) {
            if accepted.len() >= max_links {
                break;
            }
            let href = link.attr("href").unwrap_or_default();
            let Some(full) = resolve_href(&base, href) else {
                continue;
            };
            if !same_origin(&full, site_host) || is_excluded(&full, rules) {
                continue;
            }
            if matches_article_pattern(full.path(), rules) {
                let url = full.to_string();
                if seen.insert(url.clone()) {
                    debug!(%url, "Accepted article link by pattern");
                    accepted.push(url);
                }
            }
        }
    }

    accepted
}

/// Gather candidate anchors in priority order, deduplicated by node
/// identity so an anchor found via several passes is scored once.
fn collect_candidates<'a>(document: &'a Html, rules: &Rules) -> Vec<Candidate<'a>> {
    let mut containers: Vec<ElementRef<'a>> = Vec::new();
    for selector in &rules.container_selectors {
        containers.extend(document.select(selector));
    }
    if containers.is_empty() {
        for element in document.select(&rules.classed_elements) {
            let classes = element.attr("class").unwrap_or_default().to_lowercase();
            if rules.listing_keywords.iter().any(|k| classes.contains(k)) {
                containers.push(element);
            }
        }
    }

    let mut candidates: Vec<Candidate<'a>> = Vec::new();
    for container in &containers {
        for link in container.select(&rules.heading_links) {
            candidates.push(Candidate {
                link,
                kind: ContainerKind::Heading,
            });
        }
        for link in container.select(&rules.anchors) {
            if anchor_text(&link).chars().count() > rules.min_container_anchor_chars {
                candidates.push(Candidate {
                    link,
                    kind: ContainerKind::StructuredContainer,
                });
            }
        }
    }

    if candidates.is_empty() {
        for link in document.select(&rules.fallback_heading_links) {
            candidates.push(Candidate {
                link,
                kind: ContainerKind::Heading,
            });
        }
        for link in document.select(&rules.anchors) {
            let len = anchor_text(&link).chars().count();
            if len > 30 && len < 150 {
                candidates.push(Candidate {
                    link,
                    kind: ContainerKind::GenericAnchor,
                });
            }
        }
    }

    let mut seen_nodes = HashSet::new();
    candidates.retain(|c| seen_nodes.insert(c.link.id()));
    candidates
}

/// Base URL relative hrefs resolve against: the site origin with path,
/// query, and fragment cleared, so front-page links resolve from the root.
fn link_base(site_url: &Url) -> Url {
    let mut base = site_url.clone();
    base.set_path("/");
    base.set_query(None);
    base.set_fragment(None);
    base
}

fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    let full = base.join(href).ok()?;
    full.host_str()?;
    Some(full)
}

/// The candidate host must contain the site host, which admits the site
/// itself and its subdomains while rejecting foreign origins.
fn same_origin(url: &Url, site_host: &str) -> bool {
    url.host_str().is_some_and(|h| h.contains(site_host))
}

fn is_excluded(url: &Url, rules: &Rules) -> bool {
    let lowered = url.as_str().to_lowercase();
    rules
        .exclude_fragments
        .iter()
        .any(|fragment| lowered.contains(fragment))
}

fn matches_article_pattern(path: &str, rules: &Rules) -> bool {
    rules.article_patterns.iter().any(|p| p.is_match(path))
}

/// Structural fallback for paths matching no known pattern: at least two
/// segments, and either a long final segment (a slug) or a digit somewhere
/// (an id or date).
fn path_heuristics(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return false;
    }
    segments
        .last()
        .is_some_and(|s| s.chars().count() > 10)
        || segments
            .iter()
            .any(|s| s.chars().any(|c| c.is_ascii_digit()))
}

/// Headline-shaped anchor text marks a link as article-shaped regardless of
/// its URL: typical headline length plus a colon or a reporting verb.
fn headline_text_heuristic(text: &str, rules: &Rules) -> bool {
    let len = text.chars().count();
    if len <= 30 || len >= 200 {
        return false;
    }
    if text.contains(':') {
        return true;
    }
    let lowered = text.to_lowercase();
    rules.reporting_verbs.iter().any(|v| lowered.contains(v))
}

fn anchor_text(link: &ElementRef) -> String {
    normalize_ws(&link.text().collect::<Vec<_>>().join(" "))
}
