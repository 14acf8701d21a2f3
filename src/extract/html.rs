// src/extract/html.rs
// =============================================================================
// HTML signal extraction.
//
// We use the `scraper` crate (html5ever underneath) and CSS selectors to find:
// - the <title>
// - <meta name="description">
// - <link rel="canonical">
// - <img> tags lacking alt text
// - <a href> targets that point at http(s) URLs
//
// Missing values are replaced by fixed sentinel strings so nothing downstream
// ever has to deal with an absent field.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;

pub const NO_TITLE: &str = "No title found";
pub const NO_META_DESCRIPTION: &str = "No meta description found";
pub const NO_CANONICAL: &str = "No canonical URL found";

/// Outbound link targets found on one page, de-duplicated.
pub type LinkSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    pub canonical_url: String,
    pub images_without_alt: usize,
    /// Every <a href> starting with "http"; relative and mailto:/tel:/... links are left out
    pub anchors: LinkSet,
}

// Selectors are string constants known to be valid, so a parse failure
// would be a programmer error
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

pub fn extract_page_signals(html: &str) -> PageSignals {
    let document = Html::parse_document(html);

    PageSignals {
        title: extract_title(&document),
        meta_description: extract_meta_description(&document),
        canonical_url: extract_canonical(&document),
        images_without_alt: count_images_without_alt(&document),
        anchors: extract_anchors(&document),
    }
}

fn extract_title(document: &Html) -> String {
    document
        .select(&selector("title"))
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

// Only the first <meta name="description"> counts; if it has no content the
// sentinel is used even when a later duplicate does
fn extract_meta_description(document: &Html) -> String {
    document
        .select(&selector("meta[name]"))
        .find(|meta| has_attr_ignore_case(meta, "name", "description"))
        .and_then(|meta| meta.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_META_DESCRIPTION.to_string())
}

fn extract_canonical(document: &Html) -> String {
    document
        .select(&selector(r#"link[rel~="canonical"]"#))
        .next()
        .and_then(|link| link.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_CANONICAL.to_string())
}

// alt="" counts as missing; alt=" " does not
fn count_images_without_alt(document: &Html) -> usize {
    document
        .select(&selector("img"))
        .filter(|img| img.value().attr("alt").map_or(true, str::is_empty))
        .count()
}

fn extract_anchors(document: &Html) -> LinkSet {
    document
        .select(&selector("a[href]"))
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with("http"))
        .map(str::to_string)
        .collect()
}

fn has_attr_ignore_case(element: &ElementRef<'_>, name: &str, expected: &str) -> bool {
    element
        .value()
        .attr(name)
        .is_some_and(|value| value.eq_ignore_ascii_case(expected))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. CSS selectors used here
//    - "meta[name]" = every <meta> that has a name attribute
//    - r#"link[rel~="canonical"]"# = <link> whose rel list contains "canonical"
//      (so rel="canonical alternate" still matches)
//
// 2. Why trim the title but not the anchors?
//    - Titles are display text; surrounding whitespace is noise
//    - Anchors are kept exactly as written so the probe hits what the page links to
//
// 3. Why a BTreeSet for links?
//    - Duplicate links are probed once
//    - Iteration order is stable, which keeps tests and logs predictable
// -----------------------------------------------------------------------------
