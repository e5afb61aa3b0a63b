//! Generic article profile.

use super::{LinkPenalty, MetaRule, MetaValue, ScoringShape, VariantKind, VariantProfile};
use crate::result::keys::{AUTHOR, PUBLISH_TIME};

/// Containers that almost always hold the body of a news or blog article.
const SELECTORS: &[&str] = &[
    "[itemprop='articleBody']",
    ".article-body",
    ".article-content",
    ".post-content",
    ".entry-content",
    ".story-body",
    ".post-body",
];

const METADATA_RULES: &[MetaRule] = &[
    MetaRule::attr(AUTHOR, "meta[name='author']", "content", MetaValue::Text),
    MetaRule::attr(AUTHOR, "meta[property='article:author']", "content", MetaValue::Text),
    MetaRule::text(AUTHOR, "[itemprop='author'] [itemprop='name']", MetaValue::Text),
    MetaRule::text(AUTHOR, "[rel='author']", MetaValue::Text),
    MetaRule::text(AUTHOR, ".author-name", MetaValue::Text),
    MetaRule::text(AUTHOR, ".byline", MetaValue::Text),
    MetaRule::attr(PUBLISH_TIME, "meta[property='article:published_time']", "content", MetaValue::Time),
    MetaRule::attr(PUBLISH_TIME, "meta[itemprop='datePublished']", "content", MetaValue::Time),
    MetaRule::attr(PUBLISH_TIME, "meta[name='pubdate']", "content", MetaValue::Time),
    MetaRule::attr(PUBLISH_TIME, "time[datetime]", "datetime", MetaValue::Time),
    MetaRule::attr(PUBLISH_TIME, "[itemprop='datePublished']", "datetime", MetaValue::Time),
];

/// Generic article profile, used when no other pattern matches the URL.
pub static ARTICLE: VariantProfile = VariantProfile {
    kind: VariantKind::Article,
    platform: "article",
    selectors: SELECTORS,
    unhide_selectors: &[],
    scoring: ScoringShape {
        length_cap: 20.0,
        paragraph_weight: 1.0,
        paragraph_cap: 5.0,
        link_penalty: LinkPenalty::AttenuateContent,
    },
    score_delta: None,
    metadata_rules: METADATA_RULES,
    post_process: None,
};
