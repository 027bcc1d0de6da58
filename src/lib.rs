pub mod config;
pub mod error;
pub mod extractor;
pub mod metadata;
pub mod resolver;

pub use config::{DEFAULT_REDIRECT_LIMIT, DEFAULT_USER_AGENT, ExtractOptions};
pub use error::{FetchError, FetchResult};
pub use extractor::OpenGraph;
pub use metadata::{MetadataNode, MetadataTree};
pub use resolver::{RedirectFollower, ResolvedPage};

/// Extract Open Graph data from a URL or a literal HTML document, using
/// default options.
///
/// # Errors
///
/// Only [`FetchError::TooManyRedirects`]; any other fetch failure degrades
/// into an `Ok` result with `title == url == src`.
pub fn extract(src: &str) -> FetchResult<OpenGraph> {
    OpenGraph::extract(src)
}
