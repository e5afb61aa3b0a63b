//! Title Resolver
//!
//! Sources, in priority order: title-like meta tags (with a JSON-LD headline
//! as the last meta candidate), the `<title>` element, then `h1`-`h3`
//! headings. When both a `<title>` and headings exist, the heading most
//! similar to the `<title>` is intersected with it, which drops site-name
//! prefixes and suffixes:
//!
//! ```text
//! <title>Post Title | Site Name</title> + <h1>Post Title</h1>  =>  "Post Title"
//! ```

use std::cmp::Ordering;

use dom_query::Document;
use tracing::trace;

use crate::dom;
use crate::metadata::meta_tags::collapse;
use crate::patterns::{
    BRACKETED_ANNOTATION, EMBEDDED_MARKUP, TITLE_LEADING_PIPE, TITLE_TRAILING_SEPARATOR,
};
use crate::text_metrics::{longest_common_subsequence, longest_common_substring, similarity};

/// Title meta tags, tried in order. Values come from `content`.
const META_TITLE_SELECTORS: &[&str] = &[
    "meta[property='og:title']",
    "meta[name='og:title']",
    "meta[name='twitter:title']",
    "meta[property='twitter:title']",
    "meta[name='title']",
    "meta[name='headline']",
    "meta[itemprop='headline']",
];

/// Reconciled titles shorter than this (in chars) are rejected unless they
/// equal the whole heading.
const MIN_RECONCILED_CHARS: usize = 3;

/// Raw title candidates gathered from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleSources {
    pub meta: Option<String>,
    pub title_tag: Option<String>,
    /// Deduplicated `h1`-`h3` texts in document order.
    pub headings: Vec<String>,
}

impl TitleSources {
    /// Gather the candidates. `headline` is used when no title meta tag is
    /// present.
    #[must_use]
    pub fn collect(doc: &Document, headline: Option<&str>) -> Self {
        let meta = META_TITLE_SELECTORS
            .iter()
            .find_map(|selector| {
                doc.select(selector)
                    .iter()
                    .filter_map(|sel| dom::get_attribute(&sel, "content"))
                    .map(|content| collapse(&content))
                    .find(|content| !content.is_empty())
            })
            .or_else(|| headline.map(collapse).filter(|h| !h.is_empty()));

        let title_tag = doc
            .select("title")
            .iter()
            .map(|sel| collapse(&dom::text_content(&sel)))
            .find(|text| !text.is_empty());

        let mut headings: Vec<String> = Vec::new();
        for sel in doc.select("h1, h2, h3").iter() {
            let text = collapse(&dom::text_content(&sel));
            if !text.is_empty() && !headings.contains(&text) {
                headings.push(text);
            }
        }

        Self { meta, title_tag, headings }
    }

    /// Resolve the final, cleaned title. Empty when there is no source.
    #[must_use]
    pub fn resolve(&self) -> String {
        if let Some(title_tag) = &self.title_tag {
            if let Some(reconciled) = reconcile(title_tag, &self.headings) {
                return reconciled;
            }
        }

        self.meta
            .as_deref()
            .or(self.title_tag.as_deref())
            .or(self.headings.first().map(String::as_str))
            .map(clean_title)
            .unwrap_or_default()
    }
}

/// Resolve the title of a document.
#[must_use]
pub fn resolve_title(doc: &Document, headline: Option<&str>) -> String {
    let sources = TitleSources::collect(doc, headline);
    trace!(?sources, "title sources");
    sources.resolve()
}

/// Intersect the heading most similar to the `<title>` text with it.
///
/// Headings are ranked by similarity, highest first. Equal scores prefer
/// the heading sharing the longer common subsequence with the title, then
/// document order. Returns `None` when there are no headings or the cleaned
/// overlap is too short to be a title.
#[must_use]
pub fn reconcile(title_tag: &str, headings: &[String]) -> Option<String> {
    let mut ranked: Vec<(&String, f64, usize)> = headings
        .iter()
        .map(|heading| {
            let shared = longest_common_subsequence(heading, title_tag).chars().count();
            (heading, similarity(heading, title_tag), shared)
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.2.cmp(&a.2))
    });

    let (best, _, _) = ranked.first()?;
    let overlap = clean_title(&longest_common_substring(best, title_tag));
    let accepted = !overlap.is_empty()
        && (overlap.chars().count() >= MIN_RECONCILED_CHARS || overlap == clean_title(best));

    if accepted {
        Some(overlap)
    } else {
        trace!(best = best.as_str(), "title overlap rejected");
        None
    }
}

/// Clean a raw title.
///
/// Collapses whitespace, strips embedded markup and bracketed annotations,
/// then strips a trailing `separator + site name` and a leading `site |`
/// prefix. A step that would leave nothing is skipped.
#[must_use]
pub fn clean_title(raw: &str) -> String {
    let mut title = collapse(raw);
    for pattern in [
        &*EMBEDDED_MARKUP,
        &*BRACKETED_ANNOTATION,
        &*TITLE_TRAILING_SEPARATOR,
        &*TITLE_LEADING_PIPE,
    ] {
        let stripped = collapse(&pattern.replace_all(&title, ""));
        if !stripped.is_empty() {
            title = stripped;
        }
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_steps() {
        assert_eq!(clean_title("  Post   Title  |  Site "), "Post Title");
        assert_eq!(clean_title("Post Title - Site Name"), "Post Title");
        assert_eq!(clean_title("[Video] Post <b>Title</b>"), "Post Title");
        assert_eq!(clean_title("【转载】标题"), "标题");
        assert_eq!(clean_title("Spider-Man Returns"), "Spider-Man Returns");
        // Stripping would empty the string, so the step is skipped.
        assert_eq!(clean_title("[Video]"), "[Video]");
        assert_eq!(clean_title(""), "");
    }

    #[test]
    fn test_reconcile_prefers_most_similar_heading() {
        let headings = vec![
            "Breaking: Markets Rally".to_string(),
            "Markets Rally — LiveWire".to_string(),
        ];
        let title = reconcile("Markets Rally — LiveWire | News Co", &headings);

        assert_eq!(title.as_deref(), Some("Markets Rally"));
    }

    #[test]
    fn test_reconcile_breaks_similarity_ties_by_shared_characters() {
        // Both headings score 0.5 against "Rust"; "Rust 101" shares more.
        let headings = vec!["Ru".to_string(), "Rust 101".to_string()];
        assert_eq!(reconcile("Rust", &headings).as_deref(), Some("Rust"));
    }

    #[test]
    fn test_reconcile_rejects_trivial_overlap() {
        let headings = vec!["Zebra".to_string()];
        assert_eq!(reconcile("Quantum Physics", &headings), None);
    }

    #[test]
    fn test_resolve_title_from_title_and_h1() {
        let doc = dom::parse(
            "<html><head><title>Foo - MySite</title></head><body><h1>Foo</h1></body></html>",
        );
        assert_eq!(resolve_title(&doc, None), "Foo");
    }

    #[test]
    fn test_meta_title_used_without_headings() {
        let doc = dom::parse(
            r#"<html><head><meta property="og:title" content="OG Title">
               <title>Tag Title | Site</title></head><body><p>x</p></body></html>"#,
        );
        assert_eq!(resolve_title(&doc, None), "OG Title");
    }

    #[test]
    fn test_single_source_fallbacks() {
        let only_title = dom::parse("<html><head><title>Only Title</title></head><body></body></html>");
        assert_eq!(resolve_title(&only_title, None), "Only Title");

        let only_heading = dom::parse("<body><h2>Only Heading</h2><h2>Only Heading</h2></body>");
        let sources = TitleSources::collect(&only_heading, None);
        assert_eq!(sources.headings.len(), 1);
        assert_eq!(sources.resolve(), "Only Heading");

        let headline = dom::parse("<body><p>text</p></body>");
        assert_eq!(resolve_title(&headline, Some("From JSON-LD")), "From JSON-LD");

        let empty = dom::parse("<body><p>text</p></body>");
        assert_eq!(resolve_title(&empty, None), "");
    }
}
