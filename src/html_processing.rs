//! HTML Processing and Cleaning
//!
//! Sanitizes the parsed tree before content selection. Steps run in a fixed
//! order and each one is idempotent, so cleaning an already cleaned document
//! removes nothing further.
//!
//! 1. Strip `script`/`style`/`noscript`, and HTML comments unless comments
//!    are requested.
//! 2. Drop noise (navigation, ads, share widgets, comment sections, hidden
//!    elements) unless the node carries media or substantial non-link text.
//!    Script text must already be gone here, or it would count as content
//!    and a second run would judge the same node differently.
//! 3. Prune empty elements until a fixed point is reached.
//! 4. Merge adjacent text nodes and normalize whitespace.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::dom::{self, Document, NodeId, NodeRef, Selection};
use crate::options::Options;
use crate::patterns::{HIDDEN_STYLE, WHITESPACE_NORMALIZE};
use crate::selector::discard::{noise_kind, should_keep_node};
use crate::variant::VariantProfile;

/// Tags removed with their content regardless of options.
const TAGS_TO_STRIP: &str = "script, style, noscript";

/// Elements that stay even when they have no children and no text.
const KEEP_WHEN_EMPTY: &[&str] = &[
    "img", "video", "iframe", "embed", "audio", "source", "picture", "svg", "br", "hr", "td", "th",
];

/// Elements whose whitespace is significant.
const PREFORMATTED: &[&str] = &["pre", "code", "textarea"];

/// Nodes removed during one extraction call.
///
/// Descendants of a dropped node are detached with it; [`Self::covers`]
/// lets later passes skip them instead of re-processing detached subtrees.
#[derive(Debug, Default)]
pub struct DroppedNodeSet {
    ids: HashSet<NodeId>,
}

impl DroppedNodeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: &NodeRef) {
        self.ids.insert(node.id);
    }

    #[must_use]
    pub fn contains(&self, node: &NodeRef) -> bool {
        self.ids.contains(&node.id)
    }

    /// Whether the node or any of its ancestors was dropped.
    #[must_use]
    pub fn covers(&self, node: &NodeRef) -> bool {
        if self.contains(node) {
            return true;
        }
        let mut current = node.parent();
        while let Some(parent) = current {
            if self.ids.contains(&parent.id) {
                return true;
            }
            current = parent.parent();
        }
        false
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Counts of what one cleaning run changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleaningReport {
    pub noise_removed: usize,
    pub stripped: usize,
    pub pruned: usize,
    pub text_nodes_merged: usize,
    pub text_nodes_removed: usize,
}

impl CleaningReport {
    /// Number of nodes removed from the tree.
    #[must_use]
    pub fn removals(&self) -> usize {
        self.noise_removed + self.stripped + self.pruned + self.text_nodes_merged + self.text_nodes_removed
    }
}

/// Clean the document in place.
pub fn doc_cleaning(
    doc: &Document,
    profile: &VariantProfile,
    opts: &Options,
    dropped: &mut DroppedNodeSet,
) -> CleaningReport {
    let mut report = CleaningReport::default();

    unhide_protected(doc, profile);
    report.stripped = strip_non_content(doc, opts, dropped);
    report.noise_removed = remove_noise(doc, opts, dropped);
    report.pruned = prune_empty(doc, dropped);
    let (merged, removed) = normalize_text(doc);
    report.text_nodes_merged = merged;
    report.text_nodes_removed = removed;

    debug!(?report, "document cleaned");
    report
}

/// Strip hiding styles from containers the profile knows are revealed by
/// script at runtime.
fn unhide_protected(doc: &Document, profile: &VariantProfile) {
    for selector in profile.unhide_selectors {
        for sel in doc.select(selector).iter() {
            sel.remove_attr("hidden");
            if let Some(style) = dom::get_attribute(&sel, "style") {
                if HIDDEN_STYLE.is_match(&style) {
                    let visible = HIDDEN_STYLE.replace_all(&style, "");
                    let visible = visible.trim().trim_matches(';').trim();
                    if visible.is_empty() {
                        sel.remove_attr("style");
                    } else {
                        sel.set_attr("style", visible);
                    }
                }
            }
        }
    }
}

/// Step 1: scripts, styles and (optionally) comments.
fn strip_non_content(doc: &Document, opts: &Options, dropped: &mut DroppedNodeSet) -> usize {
    let mut removed = 0;

    for node in doc.select(TAGS_TO_STRIP).nodes().to_vec() {
        dropped.insert(&node);
        node.remove_from_parent();
        removed += 1;
    }

    if !opts.include_comments {
        for node in doc.root().descendants() {
            if node.is_comment() {
                dropped.insert(&node);
                node.remove_from_parent();
                removed += 1;
            }
        }
    }

    removed
}

/// Step 2: drop noise-pattern elements that do not carry content.
fn remove_noise(doc: &Document, opts: &Options, dropped: &mut DroppedNodeSet) -> usize {
    let body = dom::body(doc);
    let candidates: Vec<NodeRef> = body.select("*").nodes().to_vec();
    let mut removed = 0;

    for node in candidates {
        if dropped.covers(&node) {
            continue;
        }
        let sel = Selection::from(node);
        let Some(kind) = noise_kind(&sel, opts) else {
            continue;
        };
        if should_keep_node(&sel, opts) {
            trace!(?kind, tag = ?dom::node_tag(&node), "keeping noise-matching node with content");
            continue;
        }
        trace!(?kind, tag = ?dom::node_tag(&node), "dropping noise node");
        dropped.insert(&node);
        node.remove_from_parent();
        removed += 1;
    }

    removed
}

/// Step 3: repeatedly remove empty elements until nothing changes.
fn prune_empty(doc: &Document, dropped: &mut DroppedNodeSet) -> usize {
    let mut total = 0;

    loop {
        let body = dom::body(doc);
        // Children before parents, so one pass clears most nesting.
        let mut candidates: Vec<NodeRef> = body.select("*").nodes().to_vec();
        candidates.reverse();

        let mut removed = 0;
        for node in candidates {
            if is_empty_element(&node) {
                dropped.insert(&node);
                node.remove_from_parent();
                removed += 1;
            }
        }

        total += removed;
        if removed == 0 {
            break;
        }
    }

    total
}

fn is_empty_element(node: &NodeRef) -> bool {
    if dom::node_is_one_of(node, KEEP_WHEN_EMPTY) {
        return false;
    }
    if node.children().iter().any(NodeRef::is_element) {
        return false;
    }
    node.text().trim().is_empty()
}

/// Step 4: merge adjacent text nodes, collapse whitespace runs, and drop or
/// trim whitespace at block boundaries.
///
/// Returns `(merged, removed)` text node counts.
fn normalize_text(doc: &Document) -> (usize, usize) {
    let body = dom::body(doc);
    let Some(root) = body.nodes().first().copied() else {
        return (0, 0);
    };

    let mut merged = 0;
    let mut gone: HashSet<NodeId> = HashSet::new();
    let text_nodes: Vec<NodeRef> = root.descendants().into_iter().filter(NodeRef::is_text).collect();

    for node in &text_nodes {
        if gone.contains(&node.id) {
            continue;
        }
        // Concatenate into the first node, drop the second; the first keeps
        // its position.
        while let Some(next) = node.next_sibling().filter(NodeRef::is_text) {
            let combined = format!("{}{}", node.text(), next.text());
            node.set_text(combined);
            next.remove_from_parent();
            gone.insert(next.id);
            merged += 1;
        }
    }

    let mut removed = 0;
    for node in &text_nodes {
        if gone.contains(&node.id) || in_preformatted(node) {
            continue;
        }

        let original = node.text();
        let collapsed = WHITESPACE_NORMALIZE.replace_all(&original, " ");
        let at_start = node.prev_sibling().is_none_or(|n| dom::is_block(&n));
        let at_end = node.next_sibling().is_none_or(|n| dom::is_block(&n));

        if collapsed.trim().is_empty() {
            if at_start || at_end {
                node.remove_from_parent();
                removed += 1;
            } else if original.as_ref() != " " {
                node.set_text(" ");
            }
            continue;
        }

        let mut normalized: &str = &collapsed;
        if at_start {
            normalized = normalized.trim_start();
        }
        if at_end {
            normalized = normalized.trim_end();
        }
        if normalized != original.as_ref() {
            node.set_text(normalized);
        }
    }

    (merged, removed)
}

fn in_preformatted(node: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if dom::node_is_one_of(&parent, PREFORMATTED) {
            return true;
        }
        current = parent.parent();
    }
    false
}
