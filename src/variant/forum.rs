//! Forum thread profile.
//!
//! Forum pages list an opening post followed by replies, often interleaved
//! with pagination, ads and "quick reply" boxes. After the generic
//! post-processing pass, the thread is rebuilt as the main post followed by
//! the replies in document order, each tagged with its floor number.

use std::collections::{BTreeMap, HashSet};

use dom_query::{NodeId, NodeRef, Selection};
use tracing::debug;

use super::{LinkPenalty, MetaRule, MetaValue, ScoringShape, VariantKind, VariantProfile};
use crate::dom;
use crate::error::{Error, Result};
use crate::patterns::MAIN_POST_CLASS;
use crate::result::keys::{AUTHOR, LIKE_COUNT, PUBLISH_TIME, REPLY_COUNT, VIEW_COUNT};

/// Elements that hold a single post (opening post or reply).
pub const POST_SELECTOR: &str = ".post, .reply, .forum-post, .topic-post, .post-item, .floor, \
     .first-post, .main-post, [id^='post-'], [id^='post_'], [id^='pid'], [data-post-id]";

/// Quoted earlier posts inside a reply.
const QUOTE_SELECTOR: &str = "blockquote, .quote, .bbcode-quote";

/// Author cards and signature blocks.
const USER_INFO_SELECTOR: &str =
    ".author, .user-info, .userinfo, .poster, .postauthor, .username, .signature";

/// Attribute carrying the floor number on rebuilt posts.
pub const FLOOR_ATTR: &str = "data-floor";

const SELECTORS: &[&str] = &[
    "#postlist",
    ".post-list",
    ".postlist",
    ".thread-posts",
    ".topic-posts",
    ".thread",
    ".topic",
    ".posts",
];

const METADATA_RULES: &[MetaRule] = &[
    MetaRule::text(AUTHOR, ".first-post .author", MetaValue::Text),
    MetaRule::text(AUTHOR, ".main-post .author", MetaValue::Text),
    MetaRule::text(AUTHOR, ".post .username", MetaValue::Text),
    MetaRule::text(AUTHOR, ".post .author", MetaValue::Text),
    MetaRule::attr(AUTHOR, "meta[name='author']", "content", MetaValue::Text),
    MetaRule::attr(PUBLISH_TIME, ".first-post time[datetime]", "datetime", MetaValue::Time),
    MetaRule::attr(PUBLISH_TIME, ".post time[datetime]", "datetime", MetaValue::Time),
    MetaRule::text(PUBLISH_TIME, ".post-date", MetaValue::Time),
    MetaRule::attr(PUBLISH_TIME, "meta[property='article:published_time']", "content", MetaValue::Time),
    MetaRule::text(VIEW_COUNT, ".views", MetaValue::Counter),
    MetaRule::text(VIEW_COUNT, ".view-count", MetaValue::Counter),
    MetaRule::text(LIKE_COUNT, ".first-post .likes", MetaValue::Counter),
    MetaRule::text(LIKE_COUNT, ".like-count", MetaValue::Counter),
];

/// Forum thread profile.
pub static FORUM: VariantProfile = VariantProfile {
    kind: VariantKind::Forum,
    platform: "forum",
    selectors: SELECTORS,
    unhide_selectors: &[],
    scoring: ScoringShape {
        length_cap: 10.0,
        paragraph_weight: 3.0,
        paragraph_cap: 15.0,
        link_penalty: LinkPenalty::Fixed(10.0),
    },
    score_delta: Some(forum_score_delta),
    metadata_rules: METADATA_RULES,
    post_process: Some(reconstruct_thread),
};

/// Whether the element's class or id marks it as the opening post.
#[must_use]
pub fn is_main_post(sel: &Selection) -> bool {
    let class_id = format!(
        "{} {}",
        dom::class_name(sel).unwrap_or_default(),
        dom::id(sel).unwrap_or_default()
    );
    MAIN_POST_CLASS.is_match(&class_id)
}

/// Forum score adjustments.
///
/// Posts are favored (+15 main, +8 reply); containers holding several posts
/// get +10 per post up to +30 so the thread wins over any single post.
/// Quotes (-5) and author cards (-3) mark chrome inside a candidate.
fn forum_score_delta(sel: &Selection) -> f64 {
    let mut delta = 0.0;

    if sel.is(POST_SELECTOR) {
        delta += if is_main_post(sel) { 15.0 } else { 8.0 };
    } else {
        let posts = sel.select(POST_SELECTOR).length();
        if posts >= 2 {
            delta += (posts as f64 * 10.0).min(30.0);
        }
    }

    if sel.select(QUOTE_SELECTOR).exists() {
        delta -= 5.0;
    }
    if sel.select(USER_INFO_SELECTOR).exists() {
        delta -= 3.0;
    }

    delta
}

/// Outermost post-like nodes in the subtree, in document order.
///
/// When the subtree root is itself a post with no nested posts, the root is
/// the only post.
#[must_use]
pub fn collect_posts<'a>(content: &Selection<'a>) -> Vec<NodeRef<'a>> {
    let Some(root) = content.nodes().first().copied() else {
        return Vec::new();
    };

    let mut kept: HashSet<NodeId> = HashSet::new();
    let mut posts = Vec::new();

    for node in content.select(POST_SELECTOR).nodes() {
        if has_kept_ancestor(node, root.id, &kept) {
            continue;
        }
        kept.insert(node.id);
        posts.push(*node);
    }

    if posts.is_empty() && content.is(POST_SELECTOR) {
        posts.push(root);
    }

    posts
}

fn has_kept_ancestor(node: &NodeRef, root: NodeId, kept: &HashSet<NodeId>) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id == root {
            return false;
        }
        if kept.contains(&parent.id) {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Rebuild the thread as `[main post][replies...]` with sequential floors.
///
/// # Errors
///
/// Returns [`Error::MissingMainPost`] when no post-like node exists in the
/// selected content.
pub fn reconstruct_thread(content: &Selection, metadata: &mut BTreeMap<String, String>) -> Result<()> {
    let Some(root) = content.nodes().first().copied() else {
        return Err(Error::MissingMainPost);
    };

    let posts = collect_posts(content);
    if posts.is_empty() {
        return Err(Error::MissingMainPost);
    }

    let main_index = posts
        .iter()
        .position(|post| is_main_post(&Selection::from(*post)))
        .unwrap_or(0);

    let mut ordered = Vec::with_capacity(posts.len());
    ordered.push(posts[main_index]);
    ordered.extend(
        posts
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != main_index)
            .map(|(_, post)| *post),
    );

    let root_is_post = ordered.len() == 1 && ordered[0].id == root.id;
    if !root_is_post {
        for post in &ordered {
            post.remove_from_parent();
        }
        // Pagination, quick-reply forms and other leftovers go.
        for child in root.children() {
            child.remove_from_parent();
        }
        for post in &ordered {
            root.append_child(post);
        }
    }

    for (i, post) in ordered.iter().enumerate() {
        Selection::from(*post).set_attr(FLOOR_ATTR, &(i + 1).to_string());
    }

    debug!(posts = ordered.len(), "rebuilt forum thread");
    metadata.insert(REPLY_COUNT.to_string(), (ordered.len() - 1).to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floors(content: &Selection) -> Vec<(String, String)> {
        content
            .select(&format!("[{FLOOR_ATTR}]"))
            .iter()
            .map(|post| {
                (
                    dom::get_attribute(&post, FLOOR_ATTR).unwrap_or_default(),
                    dom::id(&post).unwrap_or_default(),
                )
            })
            .collect()
    }

    #[test]
    fn test_main_post_moves_first() {
        let doc = dom::parse(
            r#"<div id="thread">
                <div class="post" id="a">reply a</div>
                <div class="post first-post" id="op">opening</div>
                <div class="pagination">1 2 3</div>
                <div class="post" id="b">reply b</div>
            </div>"#,
        );
        let content = doc.select("#thread");
        let mut metadata = BTreeMap::new();

        assert!(reconstruct_thread(&content, &mut metadata).is_ok());
        assert_eq!(
            floors(&content),
            vec![
                ("1".to_string(), "op".to_string()),
                ("2".to_string(), "a".to_string()),
                ("3".to_string(), "b".to_string()),
            ]
        );
        assert!(doc.select(".pagination").is_empty());
        assert_eq!(metadata.get(REPLY_COUNT).map(String::as_str), Some("2"));
    }

    #[test]
    fn test_nested_posts_are_not_counted_twice() {
        let doc = dom::parse(
            r#"<div id="thread">
                <div class="post" id="a">outer <div class="reply" id="nested">inner</div></div>
                <div class="post" id="b">second</div>
            </div>"#,
        );
        let posts = collect_posts(&doc.select("#thread"));

        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_root_post_only_gets_floor_one() {
        let doc = dom::parse(r#"<div class="post" id="solo"><p>only post</p></div>"#);
        let content = doc.select("#solo");
        let mut metadata = BTreeMap::new();

        assert!(reconstruct_thread(&content, &mut metadata).is_ok());
        assert_eq!(dom::get_attribute(&content, FLOOR_ATTR).as_deref(), Some("1"));
        assert!(content.select("p").exists());
        assert_eq!(metadata.get(REPLY_COUNT).map(String::as_str), Some("0"));
    }

    #[test]
    fn test_missing_posts_is_error() {
        let doc = dom::parse(r#"<div id="thread"><p>no posts here</p></div>"#);
        let mut metadata = BTreeMap::new();

        let result = reconstruct_thread(&doc.select("#thread"), &mut metadata);
        assert!(matches!(result, Err(Error::MissingMainPost)));
    }

    #[test]
    fn test_score_delta_favors_thread_container() {
        let doc = dom::parse(
            r#"<div id="thread">
                <div class="post first-post" id="op">opening</div>
                <div class="post" id="r1">reply</div>
                <div class="post" id="r2"><blockquote>quoted</blockquote>reply</div>
            </div>"#,
        );

        assert!((forum_score_delta(&doc.select("#op")) - 15.0).abs() < f64::EPSILON);
        assert!((forum_score_delta(&doc.select("#r1")) - 8.0).abs() < f64::EPSILON);
        assert!((forum_score_delta(&doc.select("#r2")) - 3.0).abs() < f64::EPSILON);
        // 3 posts -> +30, contains a quote -> -5
        assert!((forum_score_delta(&doc.select("#thread")) - 25.0).abs() < f64::EPSILON);
    }
}
