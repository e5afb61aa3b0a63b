//! Core extraction pipeline.
//!
//! ```text
//! dispatch profile -> parse -> metadata + title -> clean -> select -> post-process
//! ```
//!
//! Metadata and the title are read before cleaning because the cleaner
//! strips scripts (JSON-LD) and page chrome.

use tracing::{debug, warn};

use crate::dom::{self, Selection};
use crate::error::Result;
use crate::html_processing::{self, DroppedNodeSet};
use crate::metadata;
use crate::options::Options;
use crate::postprocess;
use crate::result::ExtractResult;
use crate::selector::{self, SelectorState};
use crate::text_metrics::text_length;
use crate::url_utils;
use crate::variant::{self, VariantProfile};

/// Warning attached when the body fallback holds nothing usable.
pub const NO_CONTENT_WARNING: &str = "No main content found";

/// Warning attached when content was only found with the relaxed length.
pub const RELAXED_LENGTH_WARNING: &str = "Main content found only with the relaxed length threshold";

/// State of one extraction call. Nothing here outlives the call.
struct ExtractionSession<'a> {
    source_url: &'a str,
    options: &'a Options,
    profile: &'static VariantProfile,
    warnings: Vec<String>,
}

impl<'a> ExtractionSession<'a> {
    fn new(source_url: &'a str, options: &'a Options) -> Self {
        Self {
            source_url,
            options,
            profile: variant::dispatch(source_url),
            warnings: Vec::new(),
        }
    }

    fn run(mut self, html: &str) -> Result<ExtractResult> {
        let profile = self.profile;
        let options = self.options;
        debug!(variant = ?profile.kind, html_len = html.len(), "starting extraction");

        let document = dom::parse(html);

        let json_ld = metadata::extract_json_ld(&document);
        let title = metadata::resolve_title(&document, json_ld.headline.as_deref());
        let mut metadata = metadata::extract_metadata(&document, profile, &json_ld);

        let mut dropped = DroppedNodeSet::new();
        html_processing::doc_cleaning(&document, profile, options, &mut dropped);

        let selection = selector::find_main_content(&document, profile, options);
        if selection.relaxed && selection.state != SelectorState::Fallback {
            self.warnings.push(RELAXED_LENGTH_WARNING.to_string());
        }

        let mut result = ExtractResult {
            title,
            source_url: self.source_url.to_string(),
            variant: profile.kind,
            ..ExtractResult::default()
        };

        if selection.state == SelectorState::Fallback && !has_usable_content(&selection.node) {
            warn!(url = self.source_url, "no main content found");
            self.warnings.push(NO_CONTENT_WARNING.to_string());
            result.metadata = metadata;
            result.warnings = self.warnings;
            return Ok(result);
        }

        let base_url = url_utils::parse_base(self.source_url);
        postprocess::post_process(&selection.node, profile, options, base_url.as_ref(), &mut metadata)?;

        result.content = fragment_html(&selection.node);
        result.text_content = dom::block_text(&selection.node);
        result.metadata = metadata;
        result.warnings = self.warnings;

        debug!(
            state = ?selection.state,
            score = selection.score,
            content_len = result.content.len(),
            "extraction finished"
        );
        Ok(result)
    }
}

/// Whether a node has any text or media worth returning.
fn has_usable_content(sel: &Selection) -> bool {
    text_length(&dom::text_content(sel)) > 0 || dom::has_media(sel)
}

/// Serialized content: the element itself, or only the children of a
/// `<body>`/`<html>` fallback.
fn fragment_html(sel: &Selection) -> String {
    match dom::tag_name(sel).as_deref() {
        Some("body" | "html") | None => dom::inner_html(sel).to_string(),
        Some(_) => dom::outer_html(sel).to_string(),
    }
}

/// Main entry point for content extraction.
pub(crate) fn extract_content(html: &str, source_url: &str, options: &Options) -> Result<ExtractResult> {
    options.validate()?;
    ExtractionSession::new(source_url, options).run(html)
}
