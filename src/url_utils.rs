//! URL Utility Functions
//!
//! Base-URL parsing and resolution of relative `href`/`src` values in the
//! extracted content.

use url::Url;

/// Schemes left untouched by resolution.
const OPAQUE_SCHEMES: &[&str] = &["data:", "javascript:", "mailto:", "tel:", "#"];

/// Parse a source URL into a base for resolution.
///
/// Only absolute `http`/`https` URLs with a host qualify.
#[must_use]
pub fn parse_base(url_str: &str) -> Option<Url> {
    let url = Url::parse(url_str.trim()).ok()?;
    let web = matches!(url.scheme(), "http" | "https");
    (web && url.host().is_some()).then_some(url)
}

/// Convert a relative or absolute URL to absolute form.
///
/// Fragment-only links and `data:`, `javascript:`, `mailto:` and `tel:`
/// URLs are returned unchanged, as is anything that fails to resolve.
///
/// # Example
///
/// ```rust
/// use rs_distill::url_utils::{create_absolute_url, parse_base};
///
/// let base = parse_base("https://example.com/news/story.html").unwrap();
/// assert_eq!(create_absolute_url("../img/a.png", &base), "https://example.com/img/a.png");
/// ```
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() || OPAQUE_SCHEMES.iter().any(|scheme| url_str.starts_with(scheme)) {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}
