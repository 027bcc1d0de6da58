//! Heuristic extraction for documents without canonical Open Graph tags.
//!
//! Tiers run in a fixed order and each one touches only fields the earlier
//! passes left unset or empty. The final raw-text pass exists for markup so
//! broken that even lenient parsing recovered no title and no images.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};

use crate::config::MIN_PARAGRAPH_DESCRIPTION_CHARS;

use super::OpenGraph;

// Parsed once at first access and cached forever.
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("head > title").expect("BUG: hardcoded CSS selector 'head > title' is invalid")
});

static DESCRIPTION_META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"head > meta[name="description"]"#)
        .expect("BUG: hardcoded CSS selector for the description meta is invalid")
});

static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("BUG: hardcoded CSS selector 'p' is invalid"));

static IMAGE_SRC_LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"head > link[rel="image_src"]"#)
        .expect("BUG: hardcoded CSS selector for the image_src link is invalid")
});

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("BUG: hardcoded CSS selector 'img' is invalid"));

static RAW_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>")
        .expect("BUG: hardcoded raw title regex is invalid")
});

static RAW_IMG_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["']"#)
        .expect("BUG: hardcoded raw img regex is invalid")
});

/// Fill unset fields from generic HTML structure.
pub(super) fn apply(og: &mut OpenGraph, doc: &Html, body: &str) {
    if is_unset(&og.title) {
        if let Some(element) = doc.select(&TITLE_SELECTOR).next() {
            let title = element.text().collect::<String>();
            og.title = Some(title.trim().to_string());
            debug!("fallback title from the head title element");
        }
    }

    if is_unset(&og.url) {
        og.url = Some(og.src.clone());
    }

    if is_unset(&og.description) {
        if let Some(content) = doc
            .select(&DESCRIPTION_META_SELECTOR)
            .next()
            .and_then(|element| element.value().attr("content"))
        {
            og.description = Some(content.trim().to_string());
            debug!("fallback description from the description meta");
        }
    }

    // Second description tier: first paragraph long enough to read as a
    // summary. When nothing qualifies the description is set empty rather
    // than left unset.
    if is_unset(&og.description) {
        og.description = Some(first_long_paragraph(doc).unwrap_or_default());
    }

    if og.images.is_empty() {
        collect_images(og, doc, &IMAGE_SRC_LINK_SELECTOR, "href");
    }
    if og.images.is_empty() {
        collect_images(og, doc, &IMG_SELECTOR, "src");
    }

    if is_unset(&og.title) && og.images.is_empty() {
        raw_text_pass(og, body);
    }
}

/// Matches the empty-string-means-missing convention the fallback tiers use:
/// an earlier tier may have set a field to an empty trimmed value.
fn is_unset(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}

fn first_long_paragraph(doc: &Html) -> Option<String> {
    doc.select(&PARAGRAPH_SELECTOR)
        .map(|paragraph| paragraph.text().collect::<String>())
        .map(|text| text.trim().to_string())
        .find(|text| text.chars().count() > MIN_PARAGRAPH_DESCRIPTION_CHARS)
}

fn collect_images(og: &mut OpenGraph, doc: &Html, selector: &Selector, attr: &str) {
    for element in doc.select(selector) {
        if let Some(value) = element.value().attr(attr) {
            og.add_image(value.trim());
        }
    }
}

/// Last resort: scrape a literal title element and img src attributes out of
/// the raw text.
fn raw_text_pass(og: &mut OpenGraph, body: &str) {
    debug!("title and images still empty; scraping raw text");
    if is_unset(&og.title) {
        if let Some(capture) = RAW_TITLE_RE.captures(body).and_then(|c| c.get(1)) {
            let title = decode_html_entities(capture.as_str());
            let title = title.trim();
            if !title.is_empty() {
                og.title = Some(title.to_string());
            }
        }
    }
    if og.images.is_empty() {
        for captures in RAW_IMG_SRC_RE.captures_iter(body) {
            if let Some(src) = captures.get(1) {
                og.add_image(src.as_str().trim());
            }
        }
    }
}
