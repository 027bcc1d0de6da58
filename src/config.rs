//! Extraction options and shared defaults.
//!
//! A single structured options value controls one extraction run. It is
//! resolved once at the public entry point; the resolver and the fallback
//! passes each read the pieces they need.

use std::collections::HashMap;

/// Default redirect budget: 5 followed redirects
///
/// Matches common browser behavior closely enough for metadata fetching.
/// A chain longer than this is almost always a loop or a tracking trap.
/// Users can adjust via [`ExtractOptions::redirect_limit`].
pub const DEFAULT_REDIRECT_LIMIT: usize = 5;

/// Minimum trimmed character count for a paragraph to qualify as a
/// fallback description
///
/// Paragraphs at or under this length are mostly bylines, timestamps, and
/// navigation crumbs rather than article summaries.
pub const MIN_PARAGRAPH_DESCRIPTION_CHARS: usize = 20;

/// Chrome user agent sent with every request unless the caller overrides
/// `User-Agent` through [`ExtractOptions::header`]
///
/// Some origins serve stripped-down markup (often without Open Graph tags)
/// to clients that do not identify as a mainstream browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Options for a single extraction run.
///
/// ```
/// use opengraph::ExtractOptions;
///
/// let options = ExtractOptions::default()
///     .follow_fallback(false)
///     .redirect_limit(2)
///     .header("Accept-Language", "en-GB");
/// assert_eq!(options.redirect_limit, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Apply heuristic fallbacks (title element, meta description, long
    /// paragraphs, img tags) when canonical Open Graph tags are missing
    pub follow_fallback: bool,
    /// Redirects followed before the fetch fails with `TooManyRedirects`
    pub redirect_limit: usize,
    /// Extra request headers, merged into every request in the redirect chain
    pub headers: HashMap<String, String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            follow_fallback: true,
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
            headers: HashMap::new(),
        }
    }
}

impl ExtractOptions {
    /// Enable or disable the heuristic fallback passes.
    #[must_use]
    pub fn follow_fallback(mut self, enabled: bool) -> Self {
        self.follow_fallback = enabled;
        self
    }

    /// Set the redirect budget. A limit of 0 permits the initial request but
    /// no redirects.
    #[must_use]
    pub fn redirect_limit(mut self, limit: usize) -> Self {
        self.redirect_limit = limit;
        self
    }

    /// Add one request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the whole header map.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}
