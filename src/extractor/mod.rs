//! Open Graph extraction pipeline.
//!
//! One extraction call classifies its input (URL vs literal HTML), fetches if
//! needed, then runs a fixed sequence of passes over the body: canonical tag
//! scan, raw-text rescue scan for unparseable markup, heuristic fallbacks,
//! and finally image path resolution.

mod fallback;
mod image_resolver;
mod tag_scanner;

use log::{debug, warn};
use scraper::Html;
use serde::Serialize;

use crate::config::ExtractOptions;
use crate::error::FetchResult;
use crate::metadata::{MetadataTree, ReservedField};
use crate::resolver::RedirectFollower;

/// Extracted Open Graph data for a single page.
///
/// Built in one pass and returned immutable. Fetch failures other than
/// redirect exhaustion never error: they degrade to `title == url == src`
/// with everything else empty.
///
/// ```
/// use opengraph::OpenGraph;
///
/// let html = r#"<html><head>
///   <meta property="og:title" content="Breaking News">
///   <meta property="og:url" content="http://example.com/news">
///   <meta property="og:image" content="/headline.jpg">
/// </head><body></body></html>"#;
///
/// let og = OpenGraph::extract(html)?;
/// assert!(og.literal_html);
/// assert_eq!(og.title.as_deref(), Some("Breaking News"));
/// assert_eq!(og.images, vec!["http://example.com/headline.jpg"]);
/// assert_eq!(og.original_images, vec!["/headline.jpg"]);
/// # Ok::<(), opengraph::FetchError>(())
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenGraph {
    /// Original input, whether URL or literal HTML
    pub src: String,
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
    pub description: Option<String>,
    /// Absolute image URLs in first-seen order, no duplicates
    pub images: Vec<String>,
    /// Image references exactly as they appeared in the document
    pub original_images: Vec<String>,
    /// Every `og:` property, nested by its colon-delimited key
    pub metadata: MetadataTree,
    /// True when `src` was treated as literal HTML instead of fetched
    pub literal_html: bool,
}

impl OpenGraph {
    /// Extract with default options: fallbacks on, redirect limit 5.
    ///
    /// # Errors
    ///
    /// Only [`FetchError::TooManyRedirects`](crate::FetchError::TooManyRedirects);
    /// every other fetch failure degrades into an `Ok` result.
    pub fn extract(src: &str) -> FetchResult<Self> {
        Self::extract_with_options(src, ExtractOptions::default())
    }

    /// Extract with explicit options.
    ///
    /// # Errors
    ///
    /// See [`OpenGraph::extract`].
    pub fn extract_with_options(src: &str, options: ExtractOptions) -> FetchResult<Self> {
        let ExtractOptions {
            follow_fallback,
            redirect_limit,
            headers,
        } = options;

        let mut og = OpenGraph {
            src: src.to_string(),
            ..Self::default()
        };

        let body = if is_literal_html(src) {
            debug!("input carries a closing html tag; treating as literal document");
            og.literal_html = true;
            src.to_string()
        } else {
            let fetch = RedirectFollower::new(src)
                .redirect_limit(redirect_limit)
                .headers(headers)
                .resolve();
            match fetch {
                Ok(page) => {
                    debug!(
                        "fetched {} ({} redirects, status {})",
                        page.url, page.redirects, page.status
                    );
                    page.body
                }
                Err(err) if err.is_redirect_exhaustion() => return Err(err),
                Err(err) => {
                    warn!("fetch of '{src}' failed, degrading: {err}");
                    og.title = Some(src.to_string());
                    og.url = Some(src.to_string());
                    return Ok(og);
                }
            }
        };

        let doc = Html::parse_document(&body);
        tag_scanner::scan(&mut og, &doc);
        if og.metadata.is_empty() {
            tag_scanner::scan_degraded(&mut og, &body);
        }
        if follow_fallback {
            fallback::apply(&mut og, &doc, &body);
        }
        image_resolver::resolve_images(&mut og);

        Ok(og)
    }

    /// Assign a reserved field. First non-empty write wins; later tags for
    /// the same property only accumulate in the tree.
    fn assign_reserved(&mut self, field: ReservedField, content: &str) {
        if content.is_empty() {
            return;
        }
        let slot = match field {
            ReservedField::Title => &mut self.title,
            ReservedField::Url => &mut self.url,
            ReservedField::Type => &mut self.og_type,
            ReservedField::Description => &mut self.description,
        };
        if slot.is_none() {
            *slot = Some(content.to_string());
        }
    }

    /// Append an image reference, skipping empties and duplicates.
    fn add_image(&mut self, image_url: &str) {
        if image_url.is_empty() || self.images.iter().any(|existing| existing == image_url) {
            return;
        }
        self.images.push(image_url.to_string());
    }
}

/// A closing html tag marks the input as a document body rather than a URL.
/// The check is an exact substring match, so URLs never qualify.
fn is_literal_html(src: &str) -> bool {
    src.contains("</html>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_html_detection_requires_closing_tag() {
        assert!(is_literal_html("<html><body></body></html>"));
        assert!(is_literal_html("prefix </html> suffix"));
        assert!(!is_literal_html("http://example.com/page"));
        assert!(!is_literal_html("<html><body></body>"));
        assert!(!is_literal_html("</HTML>"));
    }

    #[test]
    fn reserved_assignment_is_first_non_empty_write_wins() {
        let mut og = OpenGraph::default();
        og.assign_reserved(ReservedField::Title, "");
        assert_eq!(og.title, None);
        og.assign_reserved(ReservedField::Title, "First");
        og.assign_reserved(ReservedField::Title, "Second");
        assert_eq!(og.title.as_deref(), Some("First"));
    }

    #[test]
    fn add_image_skips_empty_and_duplicate_entries() {
        let mut og = OpenGraph::default();
        og.add_image("");
        og.add_image("a.jpg");
        og.add_image("b.jpg");
        og.add_image("a.jpg");
        assert_eq!(og.images, vec!["a.jpg", "b.jpg"]);
    }
}
