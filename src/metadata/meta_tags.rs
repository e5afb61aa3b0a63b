//! Metadata value readers and normalizers.
//!
//! Profile metadata rules hand raw strings to these helpers: dates are
//! normalized to RFC 3339, counters to plain integers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::{COUNTER, WHITESPACE_NORMALIZE};
use crate::variant::{MetaRule, MetaSource};

/// Date-time layouts tried after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y年%m月%d日 %H:%M",
];

/// Date-only layouts, taken as midnight UTC.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y年%m月%d日",
    "%B %d, %Y", // January 15, 2024
    "%b %d, %Y", // Jan 15, 2024
    "%d %B %Y",  // 15 January 2024
];

/// Parse a date string from meta tags or DOM elements.
///
/// Supports RFC 3339, common ISO-like layouts with and without time, and
/// Chinese `年月日` dates. Naive values are taken as UTC.
#[must_use]
pub fn parse_meta_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

/// RFC 3339 form of a date string, or the trimmed input when it does not
/// parse (relative dates such as `3 days ago` are kept as written).
#[must_use]
pub fn normalize_time(raw: &str) -> String {
    parse_meta_date(raw).map_or_else(|| collapse(raw), |dt| dt.to_rfc3339())
}

/// Parse a counter such as `1,234`, `1.2k`, `3万` or `10万+`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_counter(raw: &str) -> Option<u64> {
    let caps = COUNTER.captures(raw)?;
    let number: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
    let multiplier = match caps.get(2).map(|m| m.as_str().to_lowercase()).as_deref() {
        Some("k" | "千") => 1_000.0,
        Some("w" | "万") => 10_000.0,
        Some("m") => 1_000_000.0,
        _ => 1.0,
    };

    let value = (number * multiplier).round();
    if value.is_finite() && value >= 0.0 {
        Some(value as u64)
    } else {
        None
    }
}

/// Raw value of one metadata rule, `None` when the selector matches nothing
/// or the value is blank.
#[must_use]
pub fn read_rule(doc: &Document, rule: &MetaRule) -> Option<String> {
    doc.select(rule.selector).iter().find_map(|sel| {
        let raw = read_source(&sel, rule.source)?;
        let raw = collapse(&raw);
        (!raw.is_empty()).then_some(raw)
    })
}

fn read_source(sel: &Selection, source: MetaSource) -> Option<String> {
    match source {
        MetaSource::Text => Some(dom::text_content(sel).to_string()),
        MetaSource::Attr(name) => dom::get_attribute(sel, name),
    }
}

/// Collapse whitespace runs and trim.
#[must_use]
pub fn collapse(s: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(s, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::MetaValue;

    #[test]
    fn test_date_parsing_formats() {
        assert_eq!(
            parse_meta_date("2024-01-15T10:30:00+02:00").map(|d| d.to_rfc3339()),
            Some("2024-01-15T08:30:00+00:00".to_string())
        );
        assert_eq!(
            parse_meta_date("2024-01-15 10:30").map(|d| d.to_rfc3339()),
            Some("2024-01-15T10:30:00+00:00".to_string())
        );
        assert!(parse_meta_date("2024/01/15").is_some());
        assert!(parse_meta_date("2024年1月15日").is_some());
        assert!(parse_meta_date("January 15, 2024").is_some());
        assert!(parse_meta_date("yesterday").is_none());
        assert!(parse_meta_date("").is_none());
    }

    #[test]
    fn test_normalize_time_keeps_unparseable_text() {
        assert_eq!(normalize_time("2024-03-01"), "2024-03-01T00:00:00+00:00");
        assert_eq!(normalize_time("  3 days   ago "), "3 days ago");
    }

    #[test]
    fn test_parse_counter() {
        assert_eq!(parse_counter("1,234"), Some(1234));
        assert_eq!(parse_counter("1.2k views"), Some(1200));
        assert_eq!(parse_counter("阅读 3万"), Some(30_000));
        assert_eq!(parse_counter("10万+"), Some(100_000));
        assert_eq!(parse_counter("2.5M"), Some(2_500_000));
        assert_eq!(parse_counter("no digits"), None);
    }

    #[test]
    fn test_read_rule_text_and_attr() {
        let doc = dom::parse(
            r#"<html><head><meta name="author" content="  Jane   Doe "></head>
               <body><span class="byline"></span><span class="byline">  By Someone </span></body></html>"#,
        );
        let attr_rule = MetaRule::attr("author", "meta[name='author']", "content", MetaValue::Text);
        let text_rule = MetaRule::text("author", ".byline", MetaValue::Text);
        let missing = MetaRule::attr("author", "time", "datetime", MetaValue::Time);

        assert_eq!(read_rule(&doc, &attr_rule).as_deref(), Some("Jane Doe"));
        assert_eq!(read_rule(&doc, &text_rule).as_deref(), Some("By Someone"));
        assert_eq!(read_rule(&doc, &missing), None);
    }
}
