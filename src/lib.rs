//! # rs-distill
//!
//! Main-content extraction for web pages: article bodies, forum threads and
//! long-form social posts.
//!
//! The page is classified into a [`variant::VariantKind`] from its URL,
//! cleaned of navigation, ads, share widgets and other boilerplate, and the
//! main-content node is picked by scoring candidates. The selected subtree
//! is returned as sanitized HTML together with its plain text, a resolved
//! title and variant-specific metadata.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_distill::extract;
//!
//! let html = r#"<html><head><title>My Article - Example</title></head>
//! <body><h1>My Article</h1><article class="post-content"><p>
//! Main content here, long enough to be recognised as the body of the page
//! rather than as a stray caption or a navigation label somewhere else.
//! </p></article></body></html>"#;
//!
//! let result = extract(html, "https://example.com/my-article")?;
//! assert_eq!(result.title, "My Article");
//! assert!(result.text_content.contains("Main content here"));
//! # Ok::<(), rs_distill::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Cleaning**: [`html_processing`] removes noise, scripts and empty nodes
//! - **Scoring**: [`scoring`] rates candidates by tag, class and content shape
//! - **Selection**: [`selector`] runs the profile, generic and heuristic passes
//! - **Title**: [`metadata::title`] reconciles `<title>` with page headings
//! - **Post-processing**: [`postprocess`] sanitizes the selected subtree

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Script-aware text length and string similarity.
pub mod text_metrics;

/// Link density of a subtree.
pub mod link_density;

/// Node scoring.
pub mod scoring;

/// Content selector state machine and noise patterns.
pub mod selector;

/// Document cleaner.
pub mod html_processing;

/// Title resolution and profile metadata (DOM rules, JSON-LD).
pub mod metadata;

/// Post-processing of the selected content subtree.
pub mod postprocess;

/// Variant profiles and URL dispatch.
pub mod variant;

/// URL resolution against the source URL.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{NO_CONTENT_WARNING, RELAXED_LENGTH_WARNING};
pub use options::Options;
pub use result::{keys, ExtractResult};
pub use variant::VariantKind;

/// Extracts main content from an HTML document using default options.
///
/// `source_url` selects the variant profile and is the base for relative
/// links; it is never fetched. Pass `""` when unknown.
///
/// # Errors
///
/// Returns [`Error::MissingMainPost`] when a forum page has no post-like
/// node. A page without usable content is not an error: the result has
/// empty content and a warning.
///
/// # Example
///
/// ```rust
/// use rs_distill::{extract, VariantKind};
///
/// let html = "<html><body><article>Content</article></body></html>";
/// let result = extract(html, "https://example.com/a")?;
/// assert_eq!(result.variant, VariantKind::Article);
/// # Ok::<(), rs_distill::Error>(())
/// ```
pub fn extract(html: &str, source_url: &str) -> Result<ExtractResult> {
    extract_with_options(html, source_url, &Options::default())
}

/// Extracts main content from an HTML document with custom options.
///
/// # Errors
///
/// As [`extract`], plus [`Error::InvalidOptions`] when `options` fail
/// validation.
///
/// # Example
///
/// ```rust
/// use rs_distill::{extract_with_options, Options};
///
/// let html = "<html><body><article>Content</article></body></html>";
/// let options = Options {
///     include_comments: true,
///     resolve_urls: false,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, "", &options)?;
/// # Ok::<(), rs_distill::Error>(())
/// ```
pub fn extract_with_options(html: &str, source_url: &str, options: &Options) -> Result<ExtractResult> {
    extract::extract_content(html, source_url, options)
}

/// Extracts main content from HTML bytes with automatic encoding detection.
///
/// The charset comes from a byte-order mark or a `<meta>` declaration and
/// defaults to UTF-8. Invalid sequences are replaced rather than rejected.
///
/// # Errors
///
/// As [`extract`].
///
/// # Example
///
/// ```rust
/// use rs_distill::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><article>Caf\xE9</article></body></html>";
/// let result = extract_bytes(html, "")?;
/// assert!(result.text_content.contains("Café"));
/// # Ok::<(), rs_distill::Error>(())
/// ```
pub fn extract_bytes(html: &[u8], source_url: &str) -> Result<ExtractResult> {
    let html_str = encoding::decode_html(html);
    extract(&html_str, source_url)
}

/// Extracts main content from HTML bytes with custom options.
///
/// # Errors
///
/// As [`extract_with_options`].
pub fn extract_bytes_with_options(html: &[u8], source_url: &str, options: &Options) -> Result<ExtractResult> {
    let html_str = encoding::decode_html(html);
    extract_with_options(&html_str, source_url, options)
}
