//! Math and code spans written as plain text.
//!
//! Pages often carry TeX (`$x^2$`, `$$\sum$$`, `\(..\)`, `\[..\]`) or
//! Markdown-style backtick code as raw text. This pass works on leaf text
//! nodes only: each match becomes an element whose `data-source` attribute
//! holds the inner source for downstream renderers, while its text stays
//! the original matched text.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use dom_query::{NodeRef, Selection};
use regex::Regex;

use crate::dom;

/// Attribute carrying the unrendered source.
pub const SOURCE_ATTR: &str = "data-source";

/// Text under these elements is left alone.
const SKIP_ANCESTORS: &[&str] = &["pre", "code", "kbd", "samp", "script", "style", "textarea", "math"];

/// One text pattern and the element it becomes.
pub struct MarkupRule {
    pub name: &'static str,
    /// Group 1 is the source stored in [`SOURCE_ATTR`].
    pub pattern: &'static LazyLock<Regex>,
    pub tag: &'static str,
    pub class: &'static str,
    /// Skip matches immediately followed by an ASCII digit.
    pub reject_before_digit: bool,
}

impl MarkupRule {
    const fn new(
        name: &'static str,
        pattern: &'static LazyLock<Regex>,
        tag: &'static str,
        class: &'static str,
    ) -> Self {
        Self { name, pattern, tag, class, reject_before_digit: false }
    }

    const fn not_before_digit(mut self) -> Self {
        self.reject_before_digit = true;
        self
    }

    /// First acceptable match in `text`.
    fn find<'t>(&self, text: &'t str) -> Option<regex::Captures<'t>> {
        self.pattern.captures_iter(text).find(|caps| {
            !self.reject_before_digit
                || caps
                    .get(0)
                    .is_some_and(|m| !text[m.end()..].starts_with(|c: char| c.is_ascii_digit()))
        })
    }
}

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*([^`]+?)\s*```").expect("FENCED_CODE regex"));

static DISPLAY_MATH_DOLLARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$([^$]+?)\$\$").expect("DISPLAY_MATH_DOLLARS regex"));

static DISPLAY_MATH_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\[(.+?)\\\]").expect("DISPLAY_MATH_BRACKETS regex"));

static INLINE_MATH_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\((.+?)\\\)").expect("INLINE_MATH_PARENS regex"));

/// `$...$` with no whitespace just inside the delimiters, so prices such as
/// `$5 and $10` are not taken for math. Ranges like `$5-$10` are handled by
/// the rule's digit check, since the closing `$` there opens a price.
static INLINE_MATH_DOLLARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([^\s$](?:[^$]*[^\s$])?)\$").expect("INLINE_MATH_DOLLARS regex")
});

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("INLINE_CODE regex"));

/// Rules in priority order; at equal positions the earlier rule wins.
pub static MARKUP_RULES: &[MarkupRule] = &[
    MarkupRule::new("code-block", &FENCED_CODE, "code", "code-block"),
    MarkupRule::new("math-display", &DISPLAY_MATH_DOLLARS, "span", "math-display"),
    MarkupRule::new("math-display", &DISPLAY_MATH_BRACKETS, "span", "math-display"),
    MarkupRule::new("math-inline", &INLINE_MATH_PARENS, "span", "math-inline"),
    MarkupRule::new("math-inline", &INLINE_MATH_DOLLARS, "span", "math-inline").not_before_digit(),
    MarkupRule::new("code-inline", &INLINE_CODE, "code", "code-inline"),
];

/// A run of text split into plain and marked-up pieces.
#[derive(Debug, PartialEq, Eq)]
enum Piece<'t> {
    Text(&'t str),
    Markup { rule: usize, raw: &'t str, source: &'t str },
}

/// Earliest match of any rule in `text`.
fn next_match(text: &str) -> Option<(usize, regex::Captures<'_>)> {
    MARKUP_RULES
        .iter()
        .enumerate()
        .filter_map(|(i, rule)| rule.find(text).map(|caps| (i, caps)))
        .min_by_key(|(i, caps)| (caps.get(0).map_or(usize::MAX, |m| m.start()), *i))
}

fn split(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while let Some((rule, caps)) = next_match(rest) {
        let (Some(whole), Some(source)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if whole.start() > 0 {
            pieces.push(Piece::Text(&rest[..whole.start()]));
        }
        pieces.push(Piece::Markup { rule, raw: whole.as_str(), source: source.as_str() });
        rest = &rest[whole.end()..];
    }

    if !rest.is_empty() {
        pieces.push(Piece::Text(rest));
    }
    pieces
}

fn in_skipped(node: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if dom::node_is_one_of(&parent, SKIP_ANCESTORS) || Selection::from(parent).has_attr(SOURCE_ATTR) {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Rewrite math and code found in the subtree's text nodes. Returns the
/// number of elements created.
pub fn markup_math_and_code(content: &Selection) -> usize {
    let Some(root) = content.nodes().first().copied() else {
        return 0;
    };
    let text_nodes: Vec<NodeRef> = root.descendants().into_iter().filter(NodeRef::is_text).collect();
    let mut created = 0;

    for node in text_nodes {
        if in_skipped(&node) {
            continue;
        }
        let text = node.text();
        let pieces = split(&text);
        if !pieces.iter().any(|p| matches!(p, Piece::Markup { .. })) {
            continue;
        }

        for piece in pieces {
            let replacement = match piece {
                Piece::Text(s) => dom::new_text(&node, s),
                Piece::Markup { rule, raw, source } => {
                    let rule = &MARKUP_RULES[rule];
                    let element = dom::new_element(&node, rule.tag);
                    element.append_child(&dom::new_text(&node, raw));
                    let sel = Selection::from(element);
                    sel.set_attr("class", rule.class);
                    sel.set_attr(SOURCE_ATTR, source.trim());
                    created += 1;
                    element
                }
            };
            node.insert_before(&replacement);
        }
        node.remove_from_parent();
    }

    created
}
