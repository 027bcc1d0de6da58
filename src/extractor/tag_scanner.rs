//! Canonical and degraded-input Open Graph tag scanning.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};

use crate::metadata::ReservedField;

use super::OpenGraph;

// Parsed once at first access and cached forever.
static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta").expect("BUG: hardcoded CSS selector 'meta' is invalid")
});

// Markup broken enough to defeat the parser can still carry og tags; match
// meta-like substrings in both attribute orders.
static META_PROPERTY_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*property=["'](og:[^"']+)["'][^>]*content=["']([^"']*)["']"#)
        .expect("BUG: hardcoded property/content regex is invalid")
});

static META_CONTENT_PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*content=["']([^"']*)["'][^>]*property=["'](og:[^"']+)["']"#)
        .expect("BUG: hardcoded content/property regex is invalid")
});

/// Scan parsed `<meta>` elements for `og:`-prefixed properties.
///
/// Every match lands in the tree; reserved paths additionally fill their
/// result field and bare `image` paths feed the image list.
pub(super) fn scan(og: &mut OpenGraph, doc: &Html) {
    for element in doc.select(&META_SELECTOR) {
        let Some(property) = element.value().attr("property") else {
            continue;
        };
        let Some(path) = og_path(property) else {
            continue;
        };
        let content = element.value().attr("content").unwrap_or_default();
        record(og, path, content.trim());
    }
    debug!(
        "tag scan recorded {} top-level metadata keys",
        og.metadata.len()
    );
}

/// Regex rescue pass over the raw body, for documents whose markup defeated
/// the tag scan entirely.
pub(super) fn scan_degraded(og: &mut OpenGraph, body: &str) {
    debug!("no og tags parsed; re-scanning raw text");
    for captures in META_PROPERTY_CONTENT_RE.captures_iter(body) {
        if let (Some(property), Some(content)) = (captures.get(1), captures.get(2)) {
            record_raw(og, property.as_str(), content.as_str());
        }
    }
    for captures in META_CONTENT_PROPERTY_RE.captures_iter(body) {
        if let (Some(content), Some(property)) = (captures.get(1), captures.get(2)) {
            record_raw(og, property.as_str(), content.as_str());
        }
    }
}

fn record(og: &mut OpenGraph, path: &str, content: &str) {
    og.metadata.insert_path(path, content);
    if let Some(field) = ReservedField::from_path(path) {
        og.assign_reserved(field, content);
    } else if path == "image" {
        og.add_image(content);
    }
}

fn record_raw(og: &mut OpenGraph, property: &str, content: &str) {
    let Some(path) = og_path(property) else {
        return;
    };
    let content = decode_html_entities(content);
    record(og, path, content.trim());
}

/// Strip a case-insensitive `og:` prefix, keeping the rest of the path as
/// written. Returns `None` for non-og properties and a bare `og:`.
fn og_path(property: &str) -> Option<&str> {
    let prefix = property.get(..3)?;
    if !prefix.eq_ignore_ascii_case("og:") {
        return None;
    }
    let path = &property[3..];
    (!path.is_empty()).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn og_path_strips_prefix_case_insensitively() {
        assert_eq!(og_path("og:title"), Some("title"));
        assert_eq!(og_path("OG:title"), Some("title"));
        assert_eq!(og_path("og:image:width"), Some("image:width"));
    }

    #[test]
    fn og_path_rejects_non_og_properties() {
        assert_eq!(og_path("fb:app_id"), None);
        assert_eq!(og_path("og"), None);
        assert_eq!(og_path("og:"), None);
        assert_eq!(og_path("blog:title"), None);
        assert_eq!(og_path(""), None);
        // Multibyte lead characters must not split the prefix probe.
        assert_eq!(og_path("日本語:title"), None);
    }

    #[test]
    fn record_routes_reserved_image_and_plain_keys() {
        let mut og = OpenGraph::default();
        record(&mut og, "title", "My Page");
        record(&mut og, "image", "a.jpg");
        record(&mut og, "locale", "en_GB");

        assert_eq!(og.title.as_deref(), Some("My Page"));
        assert_eq!(og.images, vec!["a.jpg"]);
        assert!(og.metadata.contains_key("title"));
        assert!(og.metadata.contains_key("image"));
        assert!(og.metadata.contains_key("locale"));
    }

    #[test]
    fn degraded_scan_handles_both_attribute_orders_and_entities() {
        let body = concat!(
            "<html><head>",
            r#"<meta property="og:title" content="Tom &amp; Jerry">"#,
            r#"<meta content="video.movie" property="og:type">"#,
            "</head>"
        );
        let mut og = OpenGraph::default();
        scan_degraded(&mut og, body);

        assert_eq!(og.title.as_deref(), Some("Tom & Jerry"));
        assert_eq!(og.og_type.as_deref(), Some("video.movie"));
    }
}
