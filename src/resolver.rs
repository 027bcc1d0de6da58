//! Bounded HTTP redirect resolution.
//!
//! `reqwest`'s automatic redirect handling is disabled so the budget and
//! target-discovery rules here are authoritative: `Location` header first,
//! then the first in-body anchor for legacy servers that answer a 3xx with a
//! link in the body instead of a header. TLS (rustls, peer verification on)
//! or plain HTTP is picked per the current URL's scheme on every hop.

use std::collections::HashMap;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LOCATION, USER_AGENT};
use reqwest::redirect::Policy;
use url::Url;

use crate::config::{DEFAULT_REDIRECT_LIMIT, DEFAULT_USER_AGENT};
use crate::error::{FetchError, FetchResult};

// Parsed once at first access and cached forever.
static BODY_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a href="([^">]+)">"#).expect("BUG: hardcoded body-link regex is invalid")
});

/// Terminal response of a resolved redirect chain.
#[derive(Debug, Clone)]
pub struct ResolvedPage {
    /// URL that produced the terminal response
    pub url: String,
    /// Terminal HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
    /// Redirects followed before the terminal response
    pub redirects: usize,
}

/// HTTP GET that follows redirects up to a configured limit.
///
/// ```no_run
/// use opengraph::RedirectFollower;
///
/// # fn main() -> Result<(), opengraph::FetchError> {
/// let page = RedirectFollower::new("http://example.com/moved")
///     .redirect_limit(2)
///     .header("Accept-Language", "en-GB")
///     .resolve()?;
/// println!("{} after {} redirects", page.url, page.redirects);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RedirectFollower {
    url: String,
    redirect_limit: usize,
    headers: HashMap<String, String>,
}

impl RedirectFollower {
    /// Create a follower for `url` with the default budget and no extra
    /// headers.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
            headers: HashMap::new(),
        }
    }

    /// Set the redirect budget. A limit of 0 permits the initial request but
    /// no redirects.
    #[must_use]
    pub fn redirect_limit(mut self, limit: usize) -> Self {
        self.redirect_limit = limit;
        self
    }

    /// Add one request header, sent with every request in the chain.
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

    /// Fetch the URL, following redirects until a terminal response or the
    /// budget runs out.
    ///
    /// # Errors
    ///
    /// [`FetchError::TooManyRedirects`] when the response after
    /// `redirect_limit` followed redirects is still a redirect; otherwise the
    /// first URL, header, or transport failure encountered.
    pub fn resolve(&self) -> FetchResult<ResolvedPage> {
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(FetchError::Client)?;
        let headers = self.header_map()?;

        let mut current = parse_url(&self.url)?;
        let mut redirects = 0usize;

        loop {
            debug!("GET {current} ({redirects} redirects followed)");
            let response = client
                .get(current.clone())
                .headers(headers.clone())
                .send()
                .map_err(|source| FetchError::Request {
                    url: current.to_string(),
                    source,
                })?;
            let status = response.status();

            if !status.is_redirection() {
                let body = response.text().map_err(|source| FetchError::Request {
                    url: current.to_string(),
                    source,
                })?;
                debug!("terminal response {status} from {current}");
                return Ok(ResolvedPage {
                    url: current.to_string(),
                    status: status.as_u16(),
                    body,
                    redirects,
                });
            }

            if redirects >= self.redirect_limit {
                warn!(
                    "redirect limit {} exhausted at {current}",
                    self.redirect_limit
                );
                return Err(FetchError::TooManyRedirects {
                    limit: self.redirect_limit,
                });
            }

            let target = redirect_target(response, &current)?;
            // Relative targets resolve against the URL that redirected.
            current = current
                .join(&target)
                .map_err(|source| FetchError::InvalidUrl {
                    url: target.clone(),
                    source,
                })?;
            redirects += 1;
            debug!("following redirect to {current}");
        }
    }

    fn header_map(&self) -> FetchResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len() + 1);
        map.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::InvalidHeader { name: name.clone() })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| FetchError::InvalidHeader { name: name.clone() })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

fn parse_url(url: &str) -> FetchResult<Url> {
    Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// Pick the next URL out of a redirect response: `Location` header when
/// present and readable, else the first anchor href in the body.
fn redirect_target(response: Response, url: &Url) -> FetchResult<String> {
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    if let Some(target) = location {
        return Ok(target);
    }

    let body = response.text().map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;
    body_link_target(&body).ok_or_else(|| FetchError::MissingRedirectTarget {
        url: url.to_string(),
    })
}

fn body_link_target(body: &str) -> Option<String> {
    BODY_LINK_RE
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_string())
}
