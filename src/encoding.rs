//! Charset sniffing for raw page bytes.
//!
//! Order: byte-order mark, then a `charset=` declaration in the first 2 KiB
//! (`<meta charset>` or an `http-equiv` content type), then UTF-8. Chinese
//! forum and WeChat pages still ship GBK/GB18030, which `encoding_rs`
//! decodes through the same label lookup.

use encoding_rs::{Encoding, UTF_8};

use crate::patterns::META_CHARSET;

/// Bytes scanned for a charset declaration.
const SNIFF_LIMIT: usize = 2048;

/// Detect the character encoding of an HTML byte stream.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);
    META_CHARSET
        .captures(&head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Malformed sequences become U+FFFD; decoding never fails.
///
/// # Examples
///
/// ```
/// use rs_distill::encoding::decode_html;
///
/// let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9</p>";
/// assert!(decode_html(html).contains("Café"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    // `decode` also strips a BOM of the detected encoding.
    let (decoded, _used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_from_meta_charset() {
        let html = br#"<html><head><meta charset="gbk"></head><body></body></html>"#;
        assert_eq!(detect_encoding(html).name(), "GBK");
    }

    #[test]
    fn detect_from_content_type() {
        let html = br#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=ISO-8859-1">"#;
        // WHATWG maps ISO-8859-1 to windows-1252.
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn bom_wins_over_declaration() {
        let mut html = vec![0xEF, 0xBB, 0xBF];
        html.extend_from_slice(br#"<meta charset="gbk"><p>x</p>"#);
        assert_eq!(detect_encoding(&html), UTF_8);
        assert!(!decode_html(&html).starts_with('\u{feff}'));
    }

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<p>plain</p>"), UTF_8);
        assert_eq!(detect_encoding(br#"<meta charset="no-such-charset">"#), UTF_8);
    }

    #[test]
    fn decodes_gbk() {
        // "中文" in GBK.
        let mut html = br#"<meta charset="gb2312"><p>"#.to_vec();
        html.extend_from_slice(&[0xD6, 0xD0, 0xCE, 0xC4]);
        html.extend_from_slice(b"</p>");
        assert!(decode_html(&html).contains("中文"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let result = decode_html(b"<p>Test \xFF\xFE Invalid</p>");
        assert!(result.contains("Test"));
        assert!(result.contains('\u{FFFD}'));
    }
}
