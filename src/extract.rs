//! Content extraction: deciding which text on a candidate page is the
//! title, which is the article body, and whether the page is a real
//! article at all.
//!
//! Title resolution walks an ordered list of [`TitleSource`] entries
//! (headings, title-ish classes, meta tags, the document title) and takes
//! the first non-empty result, falling back to the `"untitled"` literal.
//!
//! Body resolution tries three strategies in order, first success wins:
//!
//! 1. A primary content container (article/content selectors, the
//!    schema.org `articleBody` attribute, content-keyword divs), with
//!    boilerplate subtrees ignored.
//! 2. The `<main>` or `<body>` region with the same boilerplate filter.
//! 3. Every paragraph on the page.
//!
//! Each strategy is a pure function of the parsed markup; nothing computed
//! by a failed strategy leaks into the next one. The quality gate at the
//! end is bound to the paragraph list produced by the winning strategy.
//!
//! A `None` return is a rejection sentinel, not a failure: the page
//! fetched and parsed fine but does not qualify as an article.

use crate::models::NewsItem;
use crate::rules::{Rules, TitleSourceKind, FALLBACK_TITLE};
use crate::utils::{normalize_ws, truncate_for_log};
use itertools::Itertools;
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Extract a title/body pair from a candidate article page.
///
/// Deterministic and infallible: for fixed markup the result is always the
/// same, and unusable pages yield `None` rather than an error.
#[instrument(level = "debug", skip_all, fields(%url))]
pub fn extract_article(html: &str, url: &str, rules: &Rules) -> Option<NewsItem> {
    let document = Html::parse_document(html);

    let title = resolve_title(&document, rules);
    let paragraphs = resolve_body(&document, rules);
    let content = paragraphs.join(" ");

    // Quality gate, applied to the winning strategy's paragraph list.
    if content.chars().count() < rules.min_content_chars {
        warn!(len = content.chars().count(), "Too little content; rejecting");
        return None;
    }
    let lowered = content.to_lowercase();
    if let Some(marker) = rules.error_markers.iter().find(|m| lowered.contains(*m)) {
        warn!(marker = %marker, "Error-page marker in content; rejecting");
        return None;
    }
    let unique = paragraphs.iter().unique().count();
    if unique < rules.min_unique_paragraphs {
        warn!(unique, "Too few unique paragraphs; likely a listing page");
        return None;
    }

    debug!(
        %title,
        paragraphs = paragraphs.len(),
        preview = %truncate_for_log(&content, 120),
        "Extracted article"
    );
    Some(NewsItem {
        url: url.to_string(),
        title,
        content,
    })
}

/// Walk the ordered title sources and return the first non-empty text.
fn resolve_title(document: &Html, rules: &Rules) -> String {
    for source in &rules.title_sources {
        for element in document.select(&source.selector) {
            let text = match source.kind {
                TitleSourceKind::Text => element_text(&element),
                TitleSourceKind::Attr(attr) => {
                    element.attr(attr).map(normalize_ws).unwrap_or_default()
                }
            };
            if !text.is_empty() {
                return text;
            }
            // Only the first match per source is consulted.
            break;
        }
    }
    FALLBACK_TITLE.to_string()
}

/// Run the body strategies in order and return the winning paragraph list.
fn resolve_body(document: &Html, rules: &Rules) -> Vec<String> {
    // Strategy 1: a dedicated content container.
    for scope in container_candidates(document, rules) {
        let paragraphs = paragraphs_in(scope, rules, true);
        if !paragraphs.is_empty() {
            return paragraphs;
        }
    }

    // Strategy 2: the main/body region.
    let region = document
        .select(&rules.main_region)
        .next()
        .or_else(|| document.select(&rules.body_region).next());
    if let Some(scope) = region {
        let paragraphs = paragraphs_in(scope, rules, true);
        if !paragraphs.is_empty() {
            return paragraphs;
        }
    }

    // Strategy 3: every paragraph on the page.
    paragraphs_in(document.root_element(), rules, false)
}

/// Primary-container candidates in priority order.
fn container_candidates<'a>(document: &'a Html, rules: &Rules) -> Vec<ElementRef<'a>> {
    let mut candidates = Vec::new();
    if let Some(el) = document.select(&rules.primary_content).next() {
        candidates.push(el);
    }
    if let Some(el) = document.select(&rules.article_body_attr).next() {
        candidates.push(el);
    }
    if let Some(el) = document
        .select(&rules.classed_divs)
        .find(|div| attr_has_keyword(div.attr("class"), rules))
    {
        candidates.push(el);
    }
    if let Some(el) = document
        .select(&rules.id_divs)
        .find(|div| attr_has_keyword(div.attr("id"), rules))
    {
        candidates.push(el);
    }
    candidates
}

fn attr_has_keyword(value: Option<&str>, rules: &Rules) -> bool {
    value.is_some_and(|v| rules.content_keywords.iter().any(|k| v.contains(k)))
}

/// Collect the trimmed text of paragraphs under `scope` that pass the
/// length filter, optionally ignoring boilerplate subtrees (navigation,
/// sharing widgets, related-story blocks, comments, page chrome).
fn paragraphs_in(scope: ElementRef, rules: &Rules, skip_boilerplate: bool) -> Vec<String> {
    let ignored: HashSet<_> = if skip_boilerplate {
        scope.select(&rules.boilerplate).map(|e| e.id()).collect()
    } else {
        HashSet::new()
    };

    scope
        .select(&rules.paragraphs)
        .filter(|p| {
            !ignored.contains(&p.id()) && !p.ancestors().any(|a| ignored.contains(&a.id()))
        })
        .map(|p| element_text(&p))
        .filter(|text| text.chars().count() > rules.min_paragraph_chars)
        .collect()
}

fn element_text(element: &ElementRef) -> String {
    normalize_ws(&element.text().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DEFAULT_RULES;

    fn extract(html: &str) -> Option<NewsItem> {
        extract_article(html, "https://example.com/news/test-story", &DEFAULT_RULES)
    }

    const FULL_ARTICLE: &str = r#"
        <html><head><title>Site name</title></head><body>
        <h1>City council approves the new transit plan</h1>
        <article>
            <nav><p>Home News Sports Weather Politics Business Culture</p></nav>
            <p>The city council voted on Tuesday to approve a sweeping new transit plan.</p>
            <p>The plan includes new bus lanes, expanded light rail, and bicycle routes.</p>
            <p>Officials said construction would begin next spring at the earliest date.</p>
            <p>Opponents argued the projected costs were understated by a wide margin.</p>
            <div class="share"><p>Share this story on your favorite social network today</p></div>
        </article>
        </body></html>
    "#;

    #[test]
    fn test_full_article_extraction() {
        let item = extract(FULL_ARTICLE).unwrap();

        assert_eq!(item.title, "City council approves the new transit plan");
        assert!(item.content.starts_with("The city council voted on Tuesday"));
        assert!(item.content.contains("bicycle routes"));
        // Boilerplate subtrees are ignored.
        assert!(!item.content.contains("Share this story"));
        assert!(!item.content.contains("Home News Sports"));
    }

    #[test]
    fn test_determinism() {
        assert_eq!(extract(FULL_ARTICLE), extract(FULL_ARTICLE));
    }

    #[test]
    fn test_title_class_fallback() {
        let html = r#"
            <div class="article-title">Headline from a class selector</div>
            <article>
                <p>First paragraph with more than twenty characters of text.</p>
                <p>Second paragraph with more than twenty characters of text.</p>
                <p>Third paragraph with more than twenty characters of text.</p>
            </article>
        "#;
        let item = extract(html).unwrap();
        assert_eq!(item.title, "Headline from a class selector");
    }

    #[test]
    fn test_og_title_fallback() {
        let html = r#"
            <html><head><meta property="og:title" content="Headline from og:title"></head>
            <body><article>
                <p>First paragraph with more than twenty characters of text.</p>
                <p>Second paragraph with more than twenty characters of text.</p>
                <p>Third paragraph with more than twenty characters of text.</p>
            </article></body></html>
        "#;
        let item = extract(html).unwrap();
        assert_eq!(item.title, "Headline from og:title");
    }

    #[test]
    fn test_untitled_fallback() {
        let html = r#"
            <article>
                <p>First paragraph with more than twenty characters of text.</p>
                <p>Second paragraph with more than twenty characters of text.</p>
                <p>Third paragraph with more than twenty characters of text.</p>
            </article>
        "#;
        let item = extract(html).unwrap();
        assert_eq!(item.title, "untitled");
    }

    #[test]
    fn test_short_content_rejected() {
        let html = r#"
            <h1>A headline over a stub</h1>
            <article><p>Barely anything here at all.</p></article>
        "#;
        assert!(extract(html).is_none());
    }

    #[test]
    fn test_error_marker_rejected() {
        // Length alone passes the gate; the marker still rejects the page.
        let html = r#"
            <h1>Oops</h1>
            <article>
                <p>The page you were looking for could not be located on this server.</p>
                <p>Page not found. You may have followed an outdated or mistyped link.</p>
                <p>Try searching from the homepage or browse one of our sections below.</p>
            </article>
        "#;
        assert!(extract(html).is_none());
    }

    #[test]
    fn test_duplicate_paragraphs_rejected() {
        // Five paragraphs: two short duplicates are filtered by length and
        // the survivors collapse to two unique values.
        let html = r#"
            <article>
                <p>A teaser sentence repeated across every card on the listing page.</p>
                <p>short dup</p>
                <p>short dup</p>
                <p>A teaser sentence repeated across every card on the listing page.</p>
                <p>Another teaser sentence repeated beneath a second story card here.</p>
            </article>
        "#;
        assert!(extract(html).is_none());
    }

    #[test]
    fn test_unique_paragraphs_accepted() {
        let html = r#"
            <article>
                <p>First unique paragraph with enough text to pass the filter.</p>
                <p>Second unique paragraph with enough text to pass the filter.</p>
                <p>Third unique paragraph with enough text to pass the filter.</p>
            </article>
        "#;
        assert!(extract(html).is_some());
    }

    #[test]
    fn test_content_keyword_div() {
        let html = r#"
            <h1>Keyword container headline</h1>
            <div class="story-wrapper">
                <p>First paragraph inside a keyword-matched content wrapper div.</p>
                <p>Second paragraph inside a keyword-matched content wrapper div.</p>
                <p>Third paragraph inside a keyword-matched content wrapper div.</p>
            </div>
        "#;
        let item = extract(html).unwrap();
        assert!(item.content.contains("keyword-matched content wrapper"));
    }

    #[test]
    fn test_main_region_fallback() {
        let html = r#"
            <html><body>
            <header><p>A site-wide banner with some promotional text inside.</p></header>
            <main>
                <p>First paragraph living directly under the main region here.</p>
                <p>Second paragraph living directly under the main region here.</p>
                <p>Third paragraph living directly under the main region here.</p>
            </main>
            </body></html>
        "#;
        let item = extract(html).unwrap();
        assert!(item.content.contains("under the main region"));
        assert!(!item.content.contains("promotional text"));
    }

    #[test]
    fn test_last_strategy_ignores_no_boilerplate() {
        // Everything lives in a footer: strategies 1 and 2 skip it as
        // boilerplate, the final pass picks it up.
        let html = r#"
            <html><body><footer>
                <p>First paragraph stranded inside a footer region of the page.</p>
                <p>Second paragraph stranded inside a footer region of the page.</p>
                <p>Third paragraph stranded inside a footer region of the page.</p>
            </footer></body></html>
        "#;
        let item = extract(html).unwrap();
        assert!(item.content.contains("stranded inside a footer"));
    }

    #[test]
    fn test_paragraphs_joined_with_single_spaces() {
        let item = extract(FULL_ARTICLE).unwrap();
        assert!(item.content.contains("transit plan. The plan includes"));
    }
}
