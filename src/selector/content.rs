//! Content selector rules
//!
//! Selector lists and tag sets the content selector consults after the
//! profile's own selectors.

/// Generic main-content selectors, tried in order when no profile selector
/// yields valid content.
pub const GENERIC_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    "[itemprop='articleBody']",
    "#content",
    ".content",
    "#main",
    ".main",
    "#article",
    ".article",
    ".post",
    ".entry",
];

/// Tags scanned by the heuristic pass.
pub const HEURISTIC_TAGS: &str = "div, article, section, main";

/// Tags that are never main content.
pub const EXCLUDED_TAGS: &[&str] = &["nav", "header", "footer", "aside", "script", "style", "meta", "link"];
