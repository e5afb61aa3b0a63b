//! Long-form social post profile (WeChat official-account articles).
//!
//! The article body lives in `#js_content`, which the page ships with
//! `visibility: hidden` and reveals from script. Images are lazy-loaded
//! through `data-src`.

use super::{LinkPenalty, MetaRule, MetaValue, ScoringShape, VariantKind, VariantProfile};
use crate::result::keys::{AUTHOR, LIKE_COUNT, PUBLISH_TIME, VIEW_COUNT};

const SELECTORS: &[&str] = &["#js_content", ".rich_media_content", "#page-content"];

const UNHIDE_SELECTORS: &[&str] = &["#js_content", ".rich_media_content"];

const METADATA_RULES: &[MetaRule] = &[
    MetaRule::text(AUTHOR, "#js_name", MetaValue::Text),
    MetaRule::text(AUTHOR, ".rich_media_meta_nickname", MetaValue::Text),
    MetaRule::text(AUTHOR, "#js_author_name", MetaValue::Text),
    MetaRule::attr(AUTHOR, "meta[name='author']", "content", MetaValue::Text),
    MetaRule::text(PUBLISH_TIME, "#publish_time", MetaValue::Time),
    MetaRule::text(PUBLISH_TIME, "em#post-date", MetaValue::Time),
    MetaRule::attr(PUBLISH_TIME, "meta[property='article:published_time']", "content", MetaValue::Time),
    MetaRule::text(VIEW_COUNT, "#readNum3", MetaValue::Counter),
    MetaRule::text(VIEW_COUNT, ".read_num", MetaValue::Counter),
    MetaRule::text(LIKE_COUNT, "#like_num", MetaValue::Counter),
    MetaRule::text(LIKE_COUNT, ".like_num", MetaValue::Counter),
];

/// WeChat official-account article profile.
pub static SOCIAL_POST: VariantProfile = VariantProfile {
    kind: VariantKind::SocialPost,
    platform: "wechat",
    selectors: SELECTORS,
    unhide_selectors: UNHIDE_SELECTORS,
    scoring: ScoringShape {
        length_cap: 30.0,
        paragraph_weight: 1.0,
        paragraph_cap: 5.0,
        link_penalty: LinkPenalty::AttenuateTotal,
    },
    score_delta: None,
    metadata_rules: METADATA_RULES,
    post_process: None,
};
