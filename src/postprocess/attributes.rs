//! Attribute sanitation for the selected content subtree.

use dom_query::Selection;
use url::Url;

use crate::dom;
use crate::url_utils::create_absolute_url;

/// Attributes kept on content elements; everything else is dropped.
pub const ALLOWED_ATTRIBUTES: &[&str] = &[
    "src",
    "href",
    "alt",
    "title",
    "datetime",
    "width",
    "height",
    "loading",
    "rel",
    "target",
    "class",
    "id",
    "role",
    "aria-label",
    "itemprop",
    crate::variant::forum::FLOOR_ATTR,
];

/// Lazy-load attributes holding the real image URL, in priority order.
const LAZY_SRC_ATTRIBUTES: &[&str] = &["data-src", "data-original", "data-lazy-src"];

/// Tokens every `target="_blank"` link must carry in `rel`.
const BLANK_TARGET_REL: &[&str] = &["noopener", "noreferrer"];

/// The subtree root and all its element descendants.
fn elements<'a>(content: &Selection<'a>) -> Vec<Selection<'a>> {
    let mut all: Vec<Selection<'a>> = content.nodes().iter().map(|node| Selection::from(*node)).collect();
    all.extend(content.select("*").iter());
    all
}

/// Copy lazy-load image URLs into `src`. Returns the number of images fixed.
pub fn resolve_lazy_images(content: &Selection) -> usize {
    let mut fixed = 0;
    for img in elements(content).into_iter().filter(|sel| sel.is("img")) {
        let lazy = LAZY_SRC_ATTRIBUTES
            .iter()
            .filter_map(|name| dom::get_attribute(&img, name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());
        if let Some(src) = lazy {
            img.set_attr("src", &src);
            fixed += 1;
        }
    }
    fixed
}

/// Resolve relative `href` and `src` values against `base`.
pub fn resolve_urls(content: &Selection, base: &Url) {
    for sel in elements(content) {
        for name in ["href", "src"] {
            if let Some(value) = dom::get_attribute(&sel, name) {
                let resolved = create_absolute_url(&value, base);
                if resolved != value {
                    sel.set_attr(name, &resolved);
                }
            }
        }
    }
}

/// Drop every attribute outside [`ALLOWED_ATTRIBUTES`]. Returns the number
/// of attributes removed.
pub fn filter_attributes(content: &Selection) -> usize {
    let mut removed = 0;
    for sel in elements(content) {
        for (name, _) in dom::get_all_attributes(&sel) {
            if !ALLOWED_ATTRIBUTES.contains(&name.as_str()) {
                sel.remove_attr(&name);
                removed += 1;
            }
        }
    }
    removed
}

/// Add `noopener noreferrer` to the `rel` of links opening a new window,
/// keeping any tokens already present.
pub fn secure_blank_targets(content: &Selection) {
    for link in elements(content).into_iter().filter(|sel| sel.is("a")) {
        let opens_window = dom::get_attribute(&link, "target")
            .is_some_and(|target| target.trim().eq_ignore_ascii_case("_blank"));
        if !opens_window {
            continue;
        }

        let mut tokens: Vec<String> = dom::get_attribute(&link, "rel")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        for required in BLANK_TARGET_REL {
            if !tokens.iter().any(|t| t.eq_ignore_ascii_case(required)) {
                tokens.push((*required).to_string());
            }
        }
        link.set_attr("rel", &tokens.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_utils::parse_base;

    #[test]
    fn test_lazy_images_take_priority_order() {
        let doc = dom::parse(
            r#"<div id="c">
                <img id="a" src="placeholder.gif" data-src="real.jpg" data-original="other.jpg">
                <img id="b" data-original="orig.jpg">
                <img id="d" src="plain.jpg">
            </div>"#,
        );
        let fixed = resolve_lazy_images(&doc.select("#c"));

        assert_eq!(fixed, 2);
        assert_eq!(dom::get_attribute(&doc.select("#a"), "src").as_deref(), Some("real.jpg"));
        assert_eq!(dom::get_attribute(&doc.select("#b"), "src").as_deref(), Some("orig.jpg"));
        assert_eq!(dom::get_attribute(&doc.select("#d"), "src").as_deref(), Some("plain.jpg"));
    }

    #[test]
    fn test_filter_attributes_keeps_allow_list() {
        let doc = dom::parse(
            r#"<div id="c" style="color:red" onclick="x()"><a href="/a" data-track="1" title="t">link</a></div>"#,
        );
        let content = doc.select("#c");
        let removed = filter_attributes(&content);
        let link = doc.select("a");

        assert_eq!(removed, 3);
        assert!(!content.has_attr("style"));
        assert!(!content.has_attr("onclick"));
        assert!(link.has_attr("href"));
        assert!(link.has_attr("title"));
        assert!(!link.has_attr("data-track"));
    }

    #[test]
    fn test_blank_targets_gain_rel() {
        let doc = dom::parse(
            r#"<div id="c"><a id="x" href="/a" target="_blank">a</a>
               <a id="y" href="/b" target="_blank" rel="nofollow noopener">b</a>
               <a id="z" href="/c">c</a></div>"#,
        );
        secure_blank_targets(&doc.select("#c"));

        assert_eq!(dom::get_attribute(&doc.select("#x"), "rel").as_deref(), Some("noopener noreferrer"));
        assert_eq!(
            dom::get_attribute(&doc.select("#y"), "rel").as_deref(),
            Some("nofollow noopener noreferrer")
        );
        assert!(!doc.select("#z").has_attr("rel"));
    }

    #[test]
    fn test_resolve_urls_against_base() {
        let doc = dom::parse(r##"<div id="c"><a href="/about">a</a><img src="pic.png"><a href="#top">t</a></div>"##);
        let Some(base) = parse_base("https://example.com/news/") else {
            panic!("expected a valid base URL");
        };
        resolve_urls(&doc.select("#c"), &base);

        assert_eq!(
            dom::get_attribute(&doc.select("a").first(), "href").as_deref(),
            Some("https://example.com/about")
        );
        assert_eq!(
            dom::get_attribute(&doc.select("img"), "src").as_deref(),
            Some("https://example.com/news/pic.png")
        );
        assert_eq!(dom::get_attribute(&doc.select("a").last(), "href").as_deref(), Some("#top"));
    }
}
