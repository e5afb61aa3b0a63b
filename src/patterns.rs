//! Compiled regex patterns used across the extraction pipeline.
//!
//! All patterns are compiled once on first use via `LazyLock`.
//! Patterns are organized by the stage that consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Boilerplate Detection Patterns (cleaner)
// =============================================================================

/// Class/id tokens of navigation, advertising and share widgets.
///
/// Matched per token, so `post-content` never trips on `post` but
/// `share-bar` and `ad-slot` do.
pub static NOISE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^|[-_])(ad|ads|adv|advert|advertisement|banner|sponsor(ed)?|promo|nav|navbar|navigation|menu|breadcrumbs?|share|sharing|social|sidebar|widget|popup|modal|cookie|newsletter|subscribe)([-_]|$)",
    )
    .expect("NOISE_CLASS regex")
});

/// Class/id tokens of comment sections.
pub static COMMENT_SECTION_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[-_])(comments?|comment[-_]?list|disqus(_thread)?|respond)([-_]|$)")
        .expect("COMMENT_SECTION_CLASS regex")
});

/// Inline styles that hide an element.
pub static HIDDEN_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").expect("HIDDEN_STYLE regex")
});

// =============================================================================
// Scoring Patterns
// =============================================================================

/// `article|content|post|text|body` bucket (+25).
pub static CLASS_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"article|content|post|text|body").expect("CLASS_CONTENT regex")
});

/// `main|primary` bucket (+20).
pub static CLASS_MAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"main|primary").expect("CLASS_MAIN regex"));

/// `entry|story|blog` bucket (+15).
pub static CLASS_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"entry|story|blog").expect("CLASS_ENTRY regex"));

/// `comment|meta|footer|footnote` bucket (-20).
pub static CLASS_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"comment|meta|footer|footnote").expect("CLASS_META regex")
});

/// `sidebar|widget|share|social|nav|menu` bucket (-15).
pub static CLASS_CHROME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"sidebar|widget|share|social|nav|menu").expect("CLASS_CHROME regex")
});

/// `advertisement|banner|ad-` bucket (-30).
pub static CLASS_AD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"advertisement|banner|ad-").expect("CLASS_AD regex")
});

// =============================================================================
// Title Cleanup Patterns
// =============================================================================

/// Runs of whitespace.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Markup embedded in attribute values or titles.
pub static EMBEDDED_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("EMBEDDED_MARKUP regex"));

/// Bracketed annotations such as `[Video]` or `【转载】`.
pub static BRACKETED_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]*\]|【[^】]*】").expect("BRACKETED_ANNOTATION regex")
});

/// A trailing separator and the text after it: `Title - Site`, `Title | Site`.
///
/// Dashes and underscores need whitespace on both sides so hyphenated words
/// survive; a pipe needs none.
pub static TITLE_TRAILING_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\s+[-_–—]\s+[^-_–—|]*|\s*\|[^|]*)$").expect("TITLE_TRAILING_SEPARATOR regex")
});

/// A leading `Site |` prefix.
pub static TITLE_LEADING_PIPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^|]*\|\s*").expect("TITLE_LEADING_PIPE regex")
});

// =============================================================================
// Variant Dispatch Patterns
// =============================================================================

/// Forum-like paths and thread/post/forum id query parameters.
pub static FORUM_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(forum|bbs|thread|topic|[?&](tid|pid|fid)=)").expect("FORUM_URL regex")
});

/// Class/id of the opening post of a forum thread.
pub static MAIN_POST_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(first[-_]?post|main[-_]?post|post[-_]?first|topic[-_]?post|thread[-_]?starter|original[-_]?post|(^|[-_\s])op([-_\s]|$))",
    )
    .expect("MAIN_POST_CLASS regex")
});

// =============================================================================
// Metadata Patterns
// =============================================================================

/// `charset=` in a `<meta charset>` or `http-equiv` content-type tag.
pub static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>/]+)"#).expect("META_CHARSET regex")
});

/// A counter such as `1,234`, `1.2k`, `3万`.
pub static COUNTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(k|m|w|万|千)?").expect("COUNTER regex")
});
