//! Variant Profiles
//!
//! A closed set of extraction profiles, one per publication pattern. Each
//! profile is plain `'static` data: selector lists, the shape of the content
//! score, metadata rules, and an optional post-process hook. The content
//! selector and post-processor take a profile as a parameter instead of
//! being specialized per site type.

use std::collections::BTreeMap;

use dom_query::Selection;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::patterns::FORUM_URL;

pub mod article;
pub mod forum;
pub mod social;

/// Publication pattern a document is extracted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantKind {
    /// Generic article or blog post.
    #[default]
    Article,
    /// Forum thread with an opening post and replies.
    Forum,
    /// Long-form social-media post (WeChat official account articles).
    SocialPost,
}

/// How link density lowers a node's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkPenalty {
    /// Multiply the content score by `1 - link_density`.
    AttenuateContent,
    /// Multiply the whole score by `1 - link_density`.
    AttenuateTotal,
    /// Subtract a fixed amount once link density exceeds the threshold.
    Fixed(f64),
}

/// Per-profile shape of the content score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringShape {
    /// Cap on the `text_length / 100` term.
    pub length_cap: f64,
    /// Points per paragraph.
    pub paragraph_weight: f64,
    /// Cap on the paragraph term.
    pub paragraph_cap: f64,
    /// Link density treatment.
    pub link_penalty: LinkPenalty,
}

/// Where a metadata rule reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaSource {
    /// Text content of the matched element.
    Text,
    /// An attribute of the matched element.
    Attr(&'static str),
}

/// How a raw metadata value is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaValue {
    /// Whitespace-collapsed text.
    Text,
    /// Date/time, normalized to RFC 3339 when parseable.
    Time,
    /// Integer counter (`1,234`, `1.2k`, `3万`).
    Counter,
}

/// One `field <- selector` mapping. Rules are tried in order; the first
/// non-empty value for a field wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaRule {
    pub field: &'static str,
    pub selector: &'static str,
    pub source: MetaSource,
    pub value: MetaValue,
}

impl MetaRule {
    /// Rule reading element text.
    #[must_use]
    pub const fn text(field: &'static str, selector: &'static str, value: MetaValue) -> Self {
        Self { field, selector, source: MetaSource::Text, value }
    }

    /// Rule reading an attribute.
    #[must_use]
    pub const fn attr(
        field: &'static str,
        selector: &'static str,
        attr: &'static str,
        value: MetaValue,
    ) -> Self {
        Self { field, selector, source: MetaSource::Attr(attr), value }
    }
}

/// Profile-specific score adjustment for one candidate node.
pub type ScoreDelta = fn(&Selection) -> f64;

/// Profile-specific rewrite of the selected content subtree. May add
/// metadata fields (e.g. `replyCount`).
pub type PostProcessHook = fn(&Selection, &mut BTreeMap<String, String>) -> Result<()>;

/// Strategy bundle customizing extraction for one publication pattern.
#[derive(Debug)]
pub struct VariantProfile {
    pub kind: VariantKind,
    /// Value of the `platform` metadata field.
    pub platform: &'static str,
    /// Candidate selectors tried before the generic list, in order.
    pub selectors: &'static [&'static str],
    /// Containers hidden by inline style until scripts run; un-hidden before
    /// cleaning so the noise pass does not drop them.
    pub unhide_selectors: &'static [&'static str],
    pub scoring: ScoringShape,
    pub score_delta: Option<ScoreDelta>,
    pub metadata_rules: &'static [MetaRule],
    pub post_process: Option<PostProcessHook>,
}

impl VariantProfile {
    /// Profile-specific delta for a node, `0.0` when the profile has none.
    #[must_use]
    pub fn delta(&self, sel: &Selection) -> f64 {
        self.score_delta.map_or(0.0, |delta| delta(sel))
    }
}

/// Pick the profile for a source URL.
///
/// WeChat official-account articles are social posts; forum-like paths and
/// thread/post/forum id parameters are forums; everything else is an
/// article.
///
/// # Example
///
/// ```rust
/// use rs_distill::variant::{dispatch, VariantKind};
///
/// assert_eq!(dispatch("https://mp.weixin.qq.com/s/abc").kind, VariantKind::SocialPost);
/// assert_eq!(dispatch("https://bbs.example.com/viewthread.php?tid=1").kind, VariantKind::Forum);
/// assert_eq!(dispatch("https://example.com/news/1").kind, VariantKind::Article);
/// ```
#[must_use]
pub fn dispatch(url: &str) -> &'static VariantProfile {
    if url.contains("mp.weixin.qq.com") {
        &social::SOCIAL_POST
    } else if FORUM_URL.is_match(url) {
        &forum::FORUM
    } else {
        &article::ARTICLE
    }
}

/// The profile registered for a kind.
///
/// For callers that already know what kind of page they hold and want to
/// skip URL dispatch, e.g. to run [`crate::html_processing::doc_cleaning`]
/// with a fixed profile.
///
/// ```rust
/// use rs_distill::variant::{profile, VariantKind};
///
/// assert_eq!(profile(VariantKind::Forum).kind, VariantKind::Forum);
/// ```
#[must_use]
pub fn profile(kind: VariantKind) -> &'static VariantProfile {
    match kind {
        VariantKind::Article => &article::ARTICLE,
        VariantKind::Forum => &forum::FORUM,
        VariantKind::SocialPost => &social::SOCIAL_POST,
    }
}
