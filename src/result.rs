//! Result types for extraction output.
//!
//! This module defines the structured output from content extraction:
//! the resolved title, the sanitized content fragment, its plain text, and
//! an open metadata map whose keys depend on the variant profile.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::variant::VariantKind;

/// Metadata keys shared by every profile.
pub mod keys {
    /// Author or account name.
    pub const AUTHOR: &str = "author";
    /// Publication time, RFC 3339 when it could be parsed.
    pub const PUBLISH_TIME: &str = "publishTime";
    /// Platform tag of the variant profile.
    pub const PLATFORM: &str = "platform";
    /// Number of replies in a reconstructed forum thread.
    pub const REPLY_COUNT: &str = "replyCount";
    /// Like/upvote counter.
    pub const LIKE_COUNT: &str = "likeCount";
    /// View/read counter.
    pub const VIEW_COUNT: &str = "viewCount";
}

/// Result of content extraction from an HTML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResult {
    /// Resolved page title (empty when no source yielded one).
    pub title: String,

    /// Main content as a sanitized HTML fragment.
    pub content: String,

    /// Main content as plain text, one line per block element.
    pub text_content: String,

    /// URL the document was fetched from.
    pub source_url: String,

    /// Profile the document was extracted with.
    pub variant: VariantKind,

    /// Open metadata map (`author`, `publishTime`, `platform`, counters).
    pub metadata: BTreeMap<String, String>,

    /// Non-fatal issues encountered during extraction, such as the content
    /// selector falling back to an empty body.
    pub warnings: Vec<String>,
}

impl ExtractResult {
    /// Look up a metadata field, treating empty values as missing.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Whether the content selector produced any usable text.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.text_content.trim().is_empty()
    }

    /// Serialize the result as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
