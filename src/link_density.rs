//! Link Density
//!
//! Fraction of a node's text that sits inside hyperlinks. Navigation blocks,
//! tag clouds and "related" lists are mostly links; article bodies are not.

use dom_query::Selection;

use crate::dom;
use crate::text_metrics::text_length;

/// Script-aware length of all text under `<a>` descendants of `element`.
#[must_use]
pub fn link_text_length(element: &Selection) -> usize {
    element
        .select("a")
        .iter()
        .map(|link| text_length(&dom::text_content(&link)))
        .sum()
}

/// Ratio of link text to all text under `element`, in `[0, 1]`.
///
/// Returns `0.0` when the element has no text or no `<a>` descendants.
///
/// # Example
///
/// ```rust
/// use rs_distill::{dom, link_density::link_density};
///
/// let doc = dom::parse(r#"<p>one two <a href="/">three four</a></p>"#);
/// let density = link_density(&doc.select("p"));
/// assert!((density - 0.5).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn link_density(element: &Selection) -> f64 {
    let total = text_length(&dom::text_content(element));
    if total == 0 {
        return 0.0;
    }

    let links = link_text_length(element);
    if links == 0 {
        return 0.0;
    }

    // Nested anchors (invalid but parsed) can count text twice.
    (links as f64 / total as f64).min(1.0)
}
