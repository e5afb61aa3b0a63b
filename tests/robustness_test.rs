use rs_distill::{extract, NO_CONTENT_WARNING};

#[test]
fn extract_does_not_panic_on_empty_input() {
    match extract("", "") {
        Ok(result) => {
            assert!(result.content.is_empty());
            assert!(result.warnings.iter().any(|w| w == NO_CONTENT_WARNING));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_does_not_panic_on_plain_text() {
    match extract("just some text without any markup at all", "") {
        Ok(result) => assert_eq!(result.text_content, "just some text without any markup at all"),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_does_not_panic_on_malformed_html() {
    for html in [
        "<p>text<div>more",
        "<p><div></p></div>",
        "<html><body><article>content",
        "<div class=\"test id=broken>",
        "&amp text &lt;",
        "<<<>>>",
        "</div></div></body>",
        "\0\u{1}\u{2}",
    ] {
        let result = extract(html, "");
        assert!(result.is_ok(), "{html:?} gave {result:?}");
    }
}

#[test]
fn unclosed_tags_keep_their_text() {
    match extract("<p>text<div>more", "") {
        Ok(result) => {
            assert!(result.text_content.contains("text"));
            assert!(result.text_content.contains("more"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn script_only_page_has_no_content() {
    match extract("<html><head><script>var a = 1;</script></head><body><script>run()</script></body></html>", "") {
        Ok(result) => {
            assert!(result.content.is_empty());
            assert!(!result.text_content.contains("run()"));
            assert_eq!(result.warnings, vec![NO_CONTENT_WARNING.to_string()]);
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn image_only_page_is_not_empty() {
    match extract(r#"<html><body><div><img src="/photo.jpg"></div></body></html>"#, "https://example.com/p") {
        Ok(result) => {
            assert!(result.content.contains("https://example.com/photo.jpg"));
            assert!(result.warnings.is_empty());
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn deeply_nested_divs() {
    let depth = 200;
    let text = (0..40).map(|i| format!("deep{i}")).collect::<Vec<_>>().join(" ");
    let html = format!(
        "<html><body>{}<p>{text}</p>{}</body></html>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );

    match extract(&html, "") {
        Ok(result) => assert!(result.text_content.contains("deep39")),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn garbage_source_urls_are_tolerated() {
    let html = r#"<html><body><article><p>Text with a <a href="relative/link">link</a>.</p></article></body></html>"#;

    for url in ["not a url", "ftp://example.com/x", "://", "javascript:alert(1)"] {
        match extract(html, url) {
            Ok(result) => assert!(result.content.contains(r#"href="relative/link""#), "{url}"),
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }
}

#[test]
fn wide_documents_with_many_siblings() {
    let mut html = String::from("<html><body>");
    for i in 0..2000 {
        html.push_str(&format!("<div class=\"item\"><span>item {i}</span></div>"));
    }
    html.push_str("</body></html>");

    assert!(extract(&html, "").is_ok());
}

#[test]
fn repeated_calls_are_independent() {
    let html = "<html><head><title>Repeat</title></head><body><p>one two three</p></body></html>";
    let first = extract(html, "");
    let second = extract(html, "");

    match (first, second) {
        (Ok(first), Ok(second)) => assert_eq!(first, second),
        (first, second) => panic!("expected two Ok(_) results, got {first:?} and {second:?}"),
    }
}
