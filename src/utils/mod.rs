//! Utility functions and helpers.

pub mod http;

use scraper::ElementRef;

use crate::models::DrawIdentifier;

/// Build the detail page URL for a draw: `<base>?<identifier>`.
pub fn detail_url(base_url: &str, identifier: &DrawIdentifier) -> String {
    let query = identifier.as_str().trim_start_matches('?');
    let base = base_url.trim_end_matches('?');
    format!("{base}?{query}")
}

/// Collapse runs of whitespace and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text content of an element, whitespace-normalized.
pub fn element_text(element: &ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}
