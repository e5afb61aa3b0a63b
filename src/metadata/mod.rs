//! Metadata extraction module.
//!
//! Metadata is read from the document before cleaning, since the cleaner
//! strips scripts (JSON-LD) and may drop bylines sitting in page chrome.
//!
//! 1. The profile's ordered rules (`field <- selector [attr]`); the first
//!    non-empty value per field wins.
//! 2. JSON-LD fills `author` and `publishTime` when the rules found nothing.
//! 3. `author` and `publishTime` are always present, empty when unknown.

pub mod json_ld;
pub mod meta_tags;
pub mod title;

use std::collections::BTreeMap;

use dom_query::Document;
use tracing::debug;

use crate::result::keys::{AUTHOR, PLATFORM, PUBLISH_TIME};
use crate::variant::{MetaValue, VariantProfile};

pub use json_ld::{extract_json_ld, JsonLdFacts};
pub use meta_tags::{normalize_time, parse_counter, parse_meta_date};
pub use title::{resolve_title, TitleSources};

/// Metadata map carried on the extraction result.
pub type Metadata = BTreeMap<String, String>;

/// Extract profile metadata from a document.
#[must_use]
pub fn extract_metadata(doc: &Document, profile: &VariantProfile, json_ld: &JsonLdFacts) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(PLATFORM.to_string(), profile.platform.to_string());

    for rule in profile.metadata_rules {
        if metadata.get(rule.field).is_some_and(|v| !v.is_empty()) {
            continue;
        }
        let Some(raw) = meta_tags::read_rule(doc, rule) else {
            continue;
        };
        let value = match rule.value {
            MetaValue::Text => Some(raw),
            MetaValue::Time => Some(normalize_time(&raw)),
            MetaValue::Counter => parse_counter(&raw).map(|n| n.to_string()),
        };
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            metadata.insert(rule.field.to_string(), value);
        }
    }

    fill_missing(&mut metadata, AUTHOR, json_ld.author.clone());
    fill_missing(&mut metadata, PUBLISH_TIME, json_ld.date_published.as_deref().map(normalize_time));

    debug!(fields = metadata.len(), platform = profile.platform, "metadata extracted");
    metadata
}

/// Set `key` from `fallback` unless it already holds a value; the key ends
/// up present either way.
fn fill_missing(metadata: &mut Metadata, key: &str, fallback: Option<String>) {
    let entry = metadata.entry(key.to_string()).or_default();
    if entry.is_empty() {
        if let Some(value) = fallback {
            *entry = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::result::keys::{LIKE_COUNT, VIEW_COUNT};
    use crate::variant::{article::ARTICLE, social::SOCIAL_POST};

    #[test]
    fn test_article_rules_in_order() {
        let doc = dom::parse(
            r#"<html><head>
                <meta name="author" content="Meta Author">
                <meta property="article:published_time" content="2024-05-06T07:08:09Z">
            </head><body><span class="byline">Byline Author</span></body></html>"#,
        );
        let metadata = extract_metadata(&doc, &ARTICLE, &JsonLdFacts::default());

        assert_eq!(metadata.get(AUTHOR).map(String::as_str), Some("Meta Author"));
        assert_eq!(
            metadata.get(PUBLISH_TIME).map(String::as_str),
            Some("2024-05-06T07:08:09+00:00")
        );
        assert_eq!(metadata.get(PLATFORM).map(String::as_str), Some("article"));
    }

    #[test]
    fn test_missing_fields_degrade_to_empty() {
        let doc = dom::parse("<html><body><time>no datetime attr</time></body></html>");
        let metadata = extract_metadata(&doc, &ARTICLE, &JsonLdFacts::default());

        assert_eq!(metadata.get(AUTHOR).map(String::as_str), Some(""));
        assert_eq!(metadata.get(PUBLISH_TIME).map(String::as_str), Some(""));
    }

    #[test]
    fn test_json_ld_backfills() {
        let doc = dom::parse("<html><body><p>x</p></body></html>");
        let facts = JsonLdFacts {
            author: Some("LD Author".to_string()),
            date_published: Some("2023-01-02".to_string()),
            headline: None,
        };
        let metadata = extract_metadata(&doc, &ARTICLE, &facts);

        assert_eq!(metadata.get(AUTHOR).map(String::as_str), Some("LD Author"));
        assert_eq!(
            metadata.get(PUBLISH_TIME).map(String::as_str),
            Some("2023-01-02T00:00:00+00:00")
        );
    }

    #[test]
    fn test_social_counters() {
        let doc = dom::parse(
            r#"<body><strong id="js_name"> Daily Notes </strong>
               <em id="publish_time">2024-03-01 08:00</em>
               <span id="readNum3">10万+</span><span class="like_num">1,024</span></body>"#,
        );
        let metadata = extract_metadata(&doc, &SOCIAL_POST, &JsonLdFacts::default());

        assert_eq!(metadata.get(AUTHOR).map(String::as_str), Some("Daily Notes"));
        assert_eq!(
            metadata.get(PUBLISH_TIME).map(String::as_str),
            Some("2024-03-01T08:00:00+00:00")
        );
        assert_eq!(metadata.get(VIEW_COUNT).map(String::as_str), Some("100000"));
        assert_eq!(metadata.get(LIKE_COUNT).map(String::as_str), Some("1024"));
        assert_eq!(metadata.get(PLATFORM).map(String::as_str), Some("wechat"));
    }
}
