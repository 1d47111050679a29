//! The heuristic rule set driving link discovery and content extraction.
//!
//! Everything the engines know about "what a news site looks like" lives
//! here as ordered, immutable data: container selectors, exclusion
//! substrings, article-shape URL patterns, keyword lists, and quality
//! thresholds. The engines receive a [`Rules`] reference and contain no
//! scattered selector or pattern literals of their own, so the rule set can
//! be tested and swapped independently.
//!
//! All selectors and regexes are fixed literals compiled once at
//! construction; `unwrap` on them cannot fail for well-formed literals.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

/// Fallback title used when no title source yields text.
pub const FALLBACK_TITLE: &str = "untitled";

/// Shared rule set compiled once per process.
pub static DEFAULT_RULES: Lazy<Rules> = Lazy::new(Rules::default);

fn sel(s: &str) -> Selector {
    Selector::parse(s).unwrap()
}

fn re(s: &str) -> Regex {
    Regex::new(s).unwrap()
}

/// How to pull text out of a title candidate element.
///
/// Meta tags carry their value in an attribute; ordinary elements carry it
/// as visible text. Modeling the difference as a tagged variant keeps title
/// resolution a uniform loop over [`TitleSource`] entries.
#[derive(Debug, Clone)]
pub enum TitleSourceKind {
    /// Use the element's visible text.
    Text,
    /// Use the named attribute's value.
    Attr(&'static str),
}

/// One entry in the ordered title resolution list.
#[derive(Debug, Clone)]
pub struct TitleSource {
    pub selector: Selector,
    pub kind: TitleSourceKind,
}

/// The full heuristic configuration for both engines.
///
/// Field order follows the order the engines consult them: discovery rules
/// first, then extraction rules, then the shared quality thresholds.
#[derive(Debug, Clone)]
pub struct Rules {
    // --- link discovery ---
    /// Structural selectors that commonly host article listings.
    pub container_selectors: Vec<Selector>,
    /// Matches any element carrying a class attribute (generic-class fallback).
    pub classed_elements: Selector,
    /// Class tokens that mark an element as a listing container.
    pub listing_keywords: &'static [&'static str],
    /// Links nested in h1-h4 headings inside a container.
    pub heading_links: Selector,
    /// Page-wide h2/h3 heading links used when no container yields links.
    pub fallback_heading_links: Selector,
    /// Every anchor with an href.
    pub anchors: Selector,
    /// URL substrings that disqualify a link outright (checked lowercased).
    pub exclude_fragments: &'static [&'static str],
    /// Ordered article-shape patterns tested against the URL path.
    pub article_patterns: Vec<Regex>,
    /// Verbs typical of headline anchor text.
    pub reporting_verbs: &'static [&'static str],

    // --- content extraction ---
    /// Ordered title candidate sources.
    pub title_sources: Vec<TitleSource>,
    /// Combined priority selector for the primary content container.
    pub primary_content: Selector,
    /// Schema.org articleBody attribute.
    pub article_body_attr: Selector,
    /// Divs carrying a class attribute, scanned for content keywords.
    pub classed_divs: Selector,
    /// Divs carrying an id attribute, scanned for content keywords.
    pub id_divs: Selector,
    /// Class/id tokens that mark a div as content-ish.
    pub content_keywords: &'static [&'static str],
    /// Subtrees ignored during text extraction (navigation, sharing, chrome).
    pub boilerplate: Selector,
    /// The main region fallback scope.
    pub main_region: Selector,
    /// The body fallback scope.
    pub body_region: Selector,
    /// Paragraph elements.
    pub paragraphs: Selector,
    /// Case-insensitive markers of error pages rendered as HTML.
    pub error_markers: &'static [&'static str],

    // --- thresholds ---
    /// Minimum visible anchor text length inside a news container.
    pub min_container_anchor_chars: usize,
    /// Minimum trimmed paragraph length kept during extraction.
    pub min_paragraph_chars: usize,
    /// Minimum total body length for an accepted article.
    pub min_content_chars: usize,
    /// Minimum count of distinct surviving paragraphs for an accepted article.
    pub min_unique_paragraphs: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            container_selectors: vec![
                sel("article"),
                sel("div.article"),
                sel("div.news"),
                sel("div.post"),
                sel("li.news-item"),
                sel(".news-list"),
                sel(".article-list"),
                sel(".post-list"),
                sel(".news-feed"),
                sel(".news-container"),
                sel(".articles-container"),
                sel(".posts-container"),
                sel(r#"[data-testid="latest-stream"]"#),
                sel(r#"[data-testid="article-stream"]"#),
            ],
            classed_elements: sel("[class]"),
            listing_keywords: &["news", "article", "post", "story", "entry"],
            heading_links: sel("h1 a[href], h2 a[href], h3 a[href], h4 a[href]"),
            fallback_heading_links: sel("h2 a[href], h3 a[href]"),
            anchors: sel("a[href]"),
            exclude_fragments: &[
                "/tag/",
                "/tags/",
                "/contacts",
                "/contact",
                "/about",
                "/sotrudnichestvo",
                "/view_file.pdf",
                "/search",
                "/login",
                "/register",
                "/auth",
                "/rss",
                "/advertising",
                "/privacy",
                "/terms",
                ".jpg",
                ".png",
                ".pdf",
                "/category/",
                "/categories/",
                "/section/",
                "/sections/",
                "/topics/",
                "/feed/",
                "/subscriptions/",
                "/subscribe/",
                "/newsletter",
                "/newsletters/",
                "/latest/",
                "/popular/",
                "/archive/",
                "/authors/",
                "/team/",
                "?utm_source=",
                "?from=",
                "/pages/",
                "/help/",
                "/support/",
                "/dc/",
                "/newspaper/",
                "/crypto/",
                "/industries/",
                "/gorod/",
            ],
            article_patterns: vec![
                re(r"/\d{4}/\d{1,2}/\d{1,2}/"),
                re(r"/news/\d+"),
                re(r"/article/\d+"),
                re(r"/\d{4,}/\d{1,2}/\d{1,2}/[a-z0-9-]+"),
                re(r"/news/[a-z0-9-]+"),
                re(r"/article/[a-z0-9-]+"),
                re(r"/post/[a-z0-9-]+"),
                re(r"/story/[a-z0-9-]+"),
                re(r"/[a-z0-9-]{10,}"),
            ],
            reporting_verbs: &[
                "says",
                "claims",
                "reports",
                "announced",
                "revealed",
                "launches",
                "introduces",
            ],
            title_sources: vec![
                TitleSource {
                    selector: sel("h1"),
                    kind: TitleSourceKind::Text,
                },
                TitleSource {
                    selector: sel(
                        ".news-title, .article-title, .post-title, .entry-title, .headline, .title",
                    ),
                    kind: TitleSourceKind::Text,
                },
                TitleSource {
                    selector: sel(r#"meta[property="og:title"]"#),
                    kind: TitleSourceKind::Attr("content"),
                },
                TitleSource {
                    selector: sel(r#"meta[name="title"]"#),
                    kind: TitleSourceKind::Attr("content"),
                },
                TitleSource {
                    selector: sel("title"),
                    kind: TitleSourceKind::Text,
                },
            ],
            primary_content: sel(
                "article, .article, .news-content, .post-content, .entry-content, .content, \
                 .article-body, .post-body, .story-body",
            ),
            article_body_attr: sel(r#"[itemprop="articleBody"]"#),
            classed_divs: sel("div[class]"),
            id_divs: sel("div[id]"),
            content_keywords: &["content", "article", "news", "text", "body", "story"],
            boilerplate: sel(
                "nav, .nav, .navigation, .share, .social, .related, .comments, .sidebar, \
                 aside, footer, header",
            ),
            main_region: sel("main"),
            body_region: sel("body"),
            paragraphs: sel("p"),
            error_markers: &["404", "not found", "page not found", "страница не найдена"],
            min_container_anchor_chars: 15,
            min_paragraph_chars: 20,
            min_content_chars: 100,
            min_unique_paragraphs: 3,
        }
    }
}
