//! Noise patterns for the document cleaner.
//!
//! A node is noise when its tag, role, class/id tokens or inline visibility
//! mark it as navigation, advertising, share widgets, comment sections or
//! hidden content. Whether noise is actually dropped is decided by
//! [`should_keep_node`].

use dom_query::Selection;

use crate::dom;
use crate::link_density::link_density;
use crate::options::Options;
use crate::patterns::{COMMENT_SECTION_CLASS, HIDDEN_STYLE, NOISE_CLASS};
use crate::text_metrics::text_length;

/// Tags that are boilerplate by definition.
const NOISE_TAGS: &[&str] = &["nav", "aside"];

/// ARIA roles of page chrome.
const NOISE_ROLES: &[&str] = &["navigation", "banner", "complementary", "contentinfo", "search"];

/// Why a node was classified as noise (for tracing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    Tag,
    Role,
    Class,
    CommentSection,
    Hidden,
}

/// Whether the element is hidden via inline style or the `hidden` attribute.
#[must_use]
pub fn is_hidden(sel: &Selection) -> bool {
    if sel.has_attr("hidden") {
        return true;
    }
    dom::get_attribute(sel, "style").is_some_and(|style| HIDDEN_STYLE.is_match(&style))
}

/// Classify an element against the noise patterns.
#[must_use]
pub fn noise_kind(sel: &Selection, opts: &Options) -> Option<NoiseKind> {
    let tag = dom::tag_name(sel)?;
    if NOISE_TAGS.contains(&tag.as_str()) {
        return Some(NoiseKind::Tag);
    }

    if let Some(role) = dom::get_attribute(sel, "role") {
        if NOISE_ROLES.contains(&role.trim().to_lowercase().as_str()) {
            return Some(NoiseKind::Role);
        }
    }

    let tokens = dom::class_id_tokens(sel);
    if tokens.iter().any(|token| NOISE_CLASS.is_match(token)) {
        return Some(NoiseKind::Class);
    }
    if !opts.include_comments && tokens.iter().any(|token| COMMENT_SECTION_CLASS.is_match(token)) {
        return Some(NoiseKind::CommentSection);
    }

    if is_hidden(sel) {
        return Some(NoiseKind::Hidden);
    }

    None
}

/// Keep a noise-matching node that carries media, or enough text that is
/// not mostly links.
#[must_use]
pub fn should_keep_node(sel: &Selection, opts: &Options) -> bool {
    if sel.select("img, video, iframe").exists() {
        return true;
    }
    text_length(&dom::text_content(sel)) > opts.min_text_length
        && link_density(sel) < opts.max_link_density
}
