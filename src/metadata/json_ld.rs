//! JSON-LD Metadata
//!
//! Schema.org objects embedded in `<script type="application/ld+json">`
//! backfill the author, publication time and headline when the profile's
//! DOM rules find nothing. Read before cleaning, which strips scripts.

use dom_query::Document;
use serde_json::{Map, Value};
use tracing::trace;

use crate::dom;

/// Facts taken from the first article-like schema object that has them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonLdFacts {
    pub author: Option<String>,
    pub date_published: Option<String>,
    pub headline: Option<String>,
}

/// Extract article facts from every JSON-LD block in the document.
///
/// Blocks that fail to parse are skipped.
#[must_use]
pub fn extract_json_ld(doc: &Document) -> JsonLdFacts {
    let mut articles: Vec<Map<String, Value>> = Vec::new();

    for script in doc.select(r#"script[type="application/ld+json"]"#).iter() {
        let json_text = dom::text_content(&script);
        let json_text = json_text.trim();
        if json_text.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(json_text) {
            Ok(value) => collect_articles(&value, &mut articles),
            Err(err) => trace!(%err, "skipping malformed JSON-LD block"),
        }
    }

    let mut facts = JsonLdFacts::default();
    for article in &articles {
        if facts.headline.is_none() {
            facts.headline = single_string(article, "headline").or_else(|| single_string(article, "name"));
        }
        if facts.date_published.is_none() {
            facts.date_published =
                single_string(article, "datePublished").or_else(|| single_string(article, "dateCreated"));
        }
        if facts.author.is_none() {
            facts.author = article.get("author").and_then(author_name);
        }
    }
    facts
}

/// Walk objects, arrays and `@graph` lists, keeping article-typed objects.
fn collect_articles(value: &Value, out: &mut Vec<Map<String, Value>>) {
    match value {
        Value::Object(map) => {
            if is_article_type(map) {
                out.push(map.clone());
            }
            for nested in map.values() {
                if nested.is_object() || nested.is_array() {
                    collect_articles(nested, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_articles(item, out);
            }
        }
        _ => {}
    }
}

fn is_article_type(map: &Map<String, Value>) -> bool {
    let is_article = |t: &str| {
        matches!(
            t.to_lowercase().as_str(),
            "article"
                | "newsarticle"
                | "blogposting"
                | "techarticle"
                | "report"
                | "socialmediaposting"
                | "discussionforumposting"
                | "webpage"
        )
    };
    match map.get("@type") {
        Some(Value::String(t)) => is_article(t.as_str()),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(is_article),
        _ => false,
    }
}

/// Name of an `author` value: a string, a Person object, or the first
/// usable entry of an array.
fn author_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s),
        Value::Object(map) => single_string(map, "name").or_else(|| {
            let given = map.get("givenName").and_then(Value::as_str).unwrap_or("");
            let family = map.get("familyName").and_then(Value::as_str).unwrap_or("");
            non_empty(&format!("{} {}", given.trim(), family.trim()))
        }),
        Value::Array(items) => items.iter().find_map(author_name),
        _ => None,
    }
}

fn single_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => non_empty(s),
        Value::Array(items) => items.first().and_then(Value::as_str).and_then(non_empty),
        _ => None,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_facts_from_graph() {
        let doc = dom::parse(
            r#"<html><head><script type="application/ld+json">
            {"@context": "https://schema.org", "@graph": [
                {"@type": "WebSite", "name": "Site"},
                {"@type": "NewsArticle", "headline": "Big News",
                 "datePublished": "2024-02-01T09:00:00Z",
                 "author": [{"@type": "Person", "name": "Ann Lee"}]}
            ]}
            </script></head><body></body></html>"#,
        );
        let facts = extract_json_ld(&doc);

        assert_eq!(facts.headline.as_deref(), Some("Big News"));
        assert_eq!(facts.date_published.as_deref(), Some("2024-02-01T09:00:00Z"));
        assert_eq!(facts.author.as_deref(), Some("Ann Lee"));
    }

    #[test]
    fn test_composed_author_name() {
        let doc = dom::parse(
            r#"<script type="application/ld+json">
            {"@type": ["BlogPosting"], "author": {"givenName": "Bo", "familyName": "Chen"}}
            </script>"#,
        );
        assert_eq!(extract_json_ld(&doc).author.as_deref(), Some("Bo Chen"));
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let doc = dom::parse(
            r#"<script type="application/ld+json">{not json</script>
               <script type="application/ld+json">{"@type": "Article", "headline": "Ok"}</script>"#,
        );
        let facts = extract_json_ld(&doc);

        assert_eq!(facts.headline.as_deref(), Some("Ok"));
        assert_eq!(facts.author, None);
    }
}
