//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate. Selections are used for CSS
//! queries and attribute access; `NodeRef` is used when the pipeline has to
//! walk text nodes or move nodes around (tables, forum reconstruction).

pub use dom_query::{Document, NodeId, NodeRef, Selection};

pub use tendril::StrTendril;

/// Block-level tags. Text of adjacent blocks is separated by a newline in
/// plain-text output, and whitespace at block boundaries is insignificant.
pub const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "html", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Tags that carry media and make an otherwise empty element meaningful.
pub const MEDIA_TAGS: &[&str] = &["img", "video", "iframe", "embed", "audio", "picture", "svg"];

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get all attributes as key-value pairs
///
/// Returns empty vector if node has no attributes or if selection is empty.
#[must_use]
pub fn get_all_attributes(sel: &Selection) -> Vec<(String, String)> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Class tokens and the id of an element, lowercased.
///
/// The id is returned as a single token so that `id="main-content"` is
/// weighted once, like one class.
#[must_use]
pub fn class_id_tokens(sel: &Selection) -> Vec<String> {
    let mut tokens: Vec<String> = class_name(sel)
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    if let Some(id) = id(sel) {
        let id = id.trim().to_lowercase();
        if !id.is_empty() {
            tokens.push(id);
        }
    }
    tokens
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes().first().and_then(node_tag)
}

/// Tag name of a single node, `None` for text, comment and document nodes.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Whether a node is an element with one of the given tag names.
#[must_use]
pub fn node_is_one_of(node: &NodeRef, tags: &[&str]) -> bool {
    node_tag(node).is_some_and(|t| tags.contains(&t.as_str()))
}

/// Whether a node is a block-level element.
#[must_use]
pub fn is_block(node: &NodeRef) -> bool {
    node_is_one_of(node, BLOCK_TAGS)
}

/// Whether the selection contains a media element (including itself).
#[must_use]
pub fn has_media(sel: &Selection) -> bool {
    let selector = MEDIA_TAGS.join(", ");
    sel.is(&selector) || sel.select(&selector).exists()
}

// === Text Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Plain text of a subtree with one line per block element.
///
/// Inline whitespace is collapsed; blank lines are dropped.
#[must_use]
pub fn block_text(sel: &Selection) -> String {
    let mut out = String::new();
    for node in sel.nodes() {
        push_block_text(node, &mut out);
    }
    out.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_block_text(node: &NodeRef, out: &mut String) {
    if node.is_text() {
        out.push_str(&node.text());
        return;
    }
    if !node.is_element() && !node.is_document() {
        return;
    }
    let block = is_block(node) || node_is_one_of(node, &["br"]);
    if block {
        out.push('\n');
    }
    for child in node.children() {
        push_block_text(&child, out);
    }
    if block {
        out.push('\n');
    }
}

// === Tree Manipulation ===

/// Create a detached element in the same tree as `anchor`.
#[must_use]
pub fn new_element<'a>(anchor: &NodeRef<'a>, tag: &str) -> NodeRef<'a> {
    anchor.tree.new_element(tag)
}

/// Create a detached text node in the same tree as `anchor`.
#[must_use]
pub fn new_text<'a>(anchor: &NodeRef<'a>, text: &str) -> NodeRef<'a> {
    anchor.tree.new_text(text)
}

/// Move `node` to become the last child of `parent`.
pub fn move_to_end(node: &NodeRef, parent: &NodeRef) {
    node.remove_from_parent();
    parent.append_child(node);
}

/// Rename element tag
#[inline]
pub fn rename(sel: &Selection, new_tag: &str) {
    sel.rename(new_tag);
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// The `<body>` of a document, or the document root when the parser
/// produced none.
#[must_use]
pub fn body(doc: &Document) -> Selection<'_> {
    let body = doc.select_single("body");
    if body.exists() {
        body
    } else {
        Selection::from(doc.root())
    }
}
