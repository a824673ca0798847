//! HTML text extraction strategies.
//!
//! Two strategies over an already-fetched document:
//!
//! - **Article**: find the main content container, drop boilerplate
//!   (navigation, headers, footers, scripts), keep block-level text.
//! - **Paragraphs**: every `<p>` whose trimmed text is long enough.
//!
//! Both are pure functions so the length gates can be tested without a
//! network.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ExtractError, ExtractResult};
use crate::types::article::{ExtractedContent, ExtractionMethod};
use crate::types::config::ExtractorConfig;

/// Title used when a page has no usable `<title>`.
pub const NO_TITLE: &str = "No Title";

/// Containers tried in order when looking for the main content.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    "#content",
    "#main",
    ".post-content",
    ".entry-content",
    ".article-body",
    ".content",
];

/// Elements whose text is never article content.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form", "iframe", "button",
    "template", "svg",
];

/// Block elements that carry article text.
const BLOCK_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, li, blockquote, pre";

/// Blocks nested inside these are already covered by the outer block.
const CONTAINING_BLOCKS: &[&str] = &["p", "li", "blockquote", "pre"];

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Collapse runs of whitespace and trim.
fn normalize_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn has_ancestor_in(element: ElementRef<'_>, container: ElementRef<'_>, tags: &[&str]) -> bool {
    for node in element.ancestors() {
        if node.id() == container.id() {
            return false;
        }
        if let Some(el) = node.value().as_element() {
            if tags.contains(&el.name()) {
                return true;
            }
        }
    }
    false
}

/// Page title from `<title>`, or [`NO_TITLE`].
pub fn extract_title(document: &Html) -> String {
    selector("title")
        .and_then(|sel| document.select(&sel).next().map(normalize_text))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

fn main_container(document: &Html) -> Option<ElementRef<'_>> {
    CONTENT_SELECTORS
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|sel| document.select(&sel).next())
        .or_else(|| selector("body").and_then(|sel| document.select(&sel).next()))
}

/// Article heuristic: block text from the main content container.
pub fn article_text(document: &Html) -> String {
    let (Some(container), Some(blocks)) = (main_container(document), selector(BLOCK_SELECTOR))
    else {
        return String::new();
    };

    container
        .select(&blocks)
        .filter(|el| !has_ancestor_in(*el, container, BOILERPLATE_TAGS))
        .filter(|el| !has_ancestor_in(*el, container, CONTAINING_BLOCKS))
        .map(normalize_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Paragraph scraping: every `<p>` whose trimmed text exceeds `min_chars`.
pub fn paragraph_text(document: &Html, min_chars: usize) -> String {
    let Some(paragraphs) = selector("p") else {
        return String::new();
    };

    document
        .select(&paragraphs)
        .map(normalize_text)
        .filter(|text| char_len(text) > min_chars)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Primary strategy. `None` when the body does not exceed the floor.
pub fn extract_article(document: &Html, config: &ExtractorConfig) -> Option<ExtractedContent> {
    let body = article_text(document);
    if char_len(&body) > config.primary_min_chars {
        Some(ExtractedContent::new(
            extract_title(document),
            body,
            ExtractionMethod::Article,
        ))
    } else {
        None
    }
}

/// Fallback strategy. Fails with "Content too short" below the floor.
pub fn extract_paragraphs(
    document: &Html,
    config: &ExtractorConfig,
) -> ExtractResult<ExtractedContent> {
    let body = paragraph_text(document, config.paragraph_min_chars);
    if char_len(&body) < config.fallback_min_chars {
        return Err(ExtractError::ContentTooShort);
    }
    Ok(ExtractedContent::new(
        extract_title(document),
        body,
        ExtractionMethod::Paragraphs,
    ))
}

/// Parse once, run the primary strategy, fall back to paragraphs on short output.
pub fn extract_from_html(html: &str, config: &ExtractorConfig) -> ExtractResult<ExtractedContent> {
    let document = Html::parse_document(html);
    match extract_article(&document, config) {
        Some(content) => Ok(content),
        None => extract_paragraphs(&document, config),
    }
}

/// Parse and run only the paragraph strategy.
pub fn extract_paragraphs_from_html(
    html: &str,
    config: &ExtractorConfig,
) -> ExtractResult<ExtractedContent> {
    extract_paragraphs(&Html::parse_document(html), config)
}
