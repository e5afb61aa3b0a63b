//! Node Scoring
//!
//! A node's desirability as the main-content container:
//!
//! ```text
//! score = tag_weight(tag) + Σ class_weight(token) + content_score + profile delta
//! ```
//!
//! The content score rewards length, images, paragraphs and headings, and is
//! reduced according to the profile's [`LinkPenalty`].

use dom_query::Selection;
use regex::Regex;

use crate::dom;
use crate::link_density::link_density;
use crate::options::Options;
use crate::patterns::{CLASS_AD, CLASS_CHROME, CLASS_CONTENT, CLASS_ENTRY, CLASS_MAIN, CLASS_META};
use crate::text_metrics::text_length;
use crate::variant::{LinkPenalty, ScoringShape, VariantProfile};

/// Weight of an element by tag name.
#[must_use]
pub fn tag_weight(tag: &str) -> f64 {
    match tag {
        "article" => 30.0,
        "section" => 25.0,
        "main" => 20.0,
        "div" => 5.0,
        "p" | "pre" | "blockquote" | "ol" | "ul" => 3.0,
        "li" => 1.0,
        "td" => -3.0,
        "form" => -10.0,
        _ => 0.0,
    }
}

/// Weight of one lowercased class (or id) token. Every bucket the token
/// matches contributes.
#[must_use]
pub fn class_weight(token: &str) -> f64 {
    let buckets: [(&Regex, f64); 6] = [
        (&CLASS_CONTENT, 25.0),
        (&CLASS_MAIN, 20.0),
        (&CLASS_ENTRY, 15.0),
        (&CLASS_META, -20.0),
        (&CLASS_CHROME, -15.0),
        (&CLASS_AD, -30.0),
    ];

    buckets
        .iter()
        .filter(|(pattern, _)| pattern.is_match(token))
        .map(|(_, weight)| weight)
        .sum()
}

/// Length, media, paragraph and heading terms, before link penalties.
fn raw_content_score(sel: &Selection, text_len: usize, shape: &ScoringShape) -> f64 {
    let length = ((text_len / 100) as f64).min(shape.length_cap);
    let images = (sel.select("img").length() as f64 * 2.0).min(10.0);
    let paragraphs = (sel.select("p").length() as f64 * shape.paragraph_weight).min(shape.paragraph_cap);
    let headings = (sel.select("h1, h2, h3, h4, h5, h6").length() as f64 * 2.0).min(6.0);

    length + images + paragraphs + headings
}

/// Score a candidate node with the given profile.
///
/// Returns `None` for nodes that cannot be scored (empty selections, text
/// or comment nodes). Callers skip such candidates and keep scanning.
#[must_use]
pub fn score_node(sel: &Selection, profile: &VariantProfile, opts: &Options) -> Option<f64> {
    let node = sel.nodes().first()?;
    let tag = dom::node_tag(node)?;

    let base = tag_weight(&tag)
        + dom::class_id_tokens(sel)
            .iter()
            .map(|token| class_weight(token))
            .sum::<f64>();

    let text_len = text_length(&dom::text_content(sel));
    let content = raw_content_score(sel, text_len, &profile.scoring);
    let density = link_density(sel);

    let score = match profile.scoring.link_penalty {
        LinkPenalty::AttenuateContent => base + content * (1.0 - density),
        LinkPenalty::AttenuateTotal => (base + content) * (1.0 - density),
        LinkPenalty::Fixed(penalty) => {
            if density > opts.max_link_density {
                base + content - penalty
            } else {
                base + content
            }
        }
    };

    Some(score + profile.delta(sel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{article::ARTICLE, forum::FORUM, social::SOCIAL_POST};

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_tag_weights() {
        assert!((tag_weight("article") - 30.0).abs() < f64::EPSILON);
        assert!((tag_weight("form") + 10.0).abs() < f64::EPSILON);
        assert!(tag_weight("span").abs() < f64::EPSILON);
    }

    #[test]
    fn test_class_weight_buckets_accumulate() {
        // content bucket only once even with two matching words
        assert!((class_weight("post-content") - 25.0).abs() < f64::EPSILON);
        // content (+25) and main (+20)
        assert!((class_weight("main-content") - 45.0).abs() < f64::EPSILON);
        // content (+25) and chrome (-15)
        assert!((class_weight("post-share") - 10.0).abs() < f64::EPSILON);
        assert!((class_weight("ad-banner") + 30.0).abs() < f64::EPSILON);
        assert!(class_weight("wrapper").abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_article_with_class() {
        let html = format!(r#"<article class="post-content"><p>{}</p></article>"#, words(40));
        let doc = dom::parse(&html);
        let score = score_node(&doc.select("article"), &ARTICLE, &Options::default());

        // 30 (tag) + 25 (class) + 0 (length) + 1 (paragraph)
        assert_eq!(score, Some(56.0));
    }

    #[test]
    fn test_text_node_is_unscorable() {
        let doc = dom::parse("<p>text</p>");
        let text = doc.select("p").nodes()[0].first_child();
        let score = text.and_then(|t| score_node(&Selection::from(t), &ARTICLE, &Options::default()));

        assert_eq!(score, None);
    }

    #[test]
    fn test_link_density_attenuates_content_only() {
        let html = format!(
            r#"<div><p>{}</p><p><a href="/x">{}</a></p></div>"#,
            words(10),
            words(10)
        );
        let doc = dom::parse(&html);
        let score = score_node(&doc.select("div"), &ARTICLE, &Options::default());

        // 5 (div) + 2 paragraphs * (1 - 0.5)
        assert_eq!(score, Some(6.0));
    }

    #[test]
    fn test_link_density_attenuates_total_for_social() {
        let html = format!(
            r#"<div><p>{}</p><p><a href="/x">{}</a></p></div>"#,
            words(10),
            words(10)
        );
        let doc = dom::parse(&html);
        let score = score_node(&doc.select("div"), &SOCIAL_POST, &Options::default());

        // (5 + 2) * 0.5
        assert_eq!(score, Some(3.5));
    }

    #[test]
    fn test_fixed_penalty_applies_above_threshold_only() {
        let html = format!(r#"<div><p><a href="/x">{}</a> {}</p></div>"#, words(6), words(4));
        let doc = dom::parse(&html);
        let score = score_node(&doc.select("div"), &FORUM, &Options::default());

        // density 0.6 > 0.5: 5 (div) + 3 (one paragraph, x3) - 10
        assert_eq!(score, Some(-2.0));
    }

    #[test]
    fn test_content_bonuses_are_capped() {
        let mut html = String::from("<div>");
        for _ in 0..8 {
            html.push_str(r#"<h2>Heading</h2><p>para</p><img src="a.png">"#);
        }
        html.push_str("</div>");
        let doc = dom::parse(&html);
        let score = score_node(&doc.select("div"), &ARTICLE, &Options::default());

        // 5 (div) + 10 (images) + 5 (paragraphs) + 6 (headings)
        assert_eq!(score, Some(26.0));
    }
}
