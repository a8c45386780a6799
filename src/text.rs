//! Whitespace normalization for text pulled out of HTML.

use scraper::ElementRef;

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text content of an element and all of its descendants.
///
/// Text nodes are concatenated without a separator, so adjacent inline
/// elements read the way a browser would render them.
pub fn element_text(element: &ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}
