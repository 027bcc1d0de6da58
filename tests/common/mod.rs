//! Test utilities and helper functions for the opengraph test suite

use mockito::{Mock, Server};

/// Initializes logging for test output; safe to call from every test
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates an HTML document with the full Open Graph fixture: reserved
/// fields, two images with nested dimensions, and a locale with alternates
#[allow(dead_code)]
pub fn opengraph_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
    <meta property="og:title" content="OpenGraph Title">
    <meta property="og:type" content="article">
    <meta property="og:url" content="http://test.host">
    <meta property="og:description" content="My OpenGraph sample article page">
    <meta property="og:image" content="http://test.host/images/rock1.jpg">
    <meta property="og:image:width" content="300">
    <meta property="og:image:height" content="300">
    <meta property="og:image" content="/images/rock2.jpg">
    <meta property="og:image:height" content="1000">
    <meta property="og:locale" content="en_GB">
    <meta property="og:locale:alternate" content="fr_FR">
    <meta property="og:locale:alternate" content="es_ES">
    <title>Page Title</title>
</head>
<body>
    <p>Body paragraph that is long enough to be a description.</p>
</body>
</html>"#
        .to_string()
}

/// Same fixture preceded by an HTML comment, for the literal-input check
#[allow(dead_code)]
pub fn opengraph_html_with_leading_comment() -> String {
    format!("<!-- page exported 2015-03-17 -->\n{}", opengraph_html())
}

/// Creates an HTML document with no Open Graph tags but every fallback
/// source populated: head title, description meta, and body images
#[allow(dead_code)]
pub fn no_metadata_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
    <title>OpenGraph Title Fallback</title>
    <meta name="description" content="Short Description Fallback">
</head>
<body>
    <p>Tiny intro.</p>
    <img src="/images/wall1.jpg">
    <img src="/images/wall2.jpg">
</body>
</html>"#
        .to_string()
}

/// Creates an HTML document with neither Open Graph tags nor a description
/// meta; the first sufficiently long paragraph is the description source
#[allow(dead_code)]
pub fn no_meta_nor_description_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
    <title>OpenGraph Title Fallback</title>
</head>
<body>
    <p>Nav crumbs</p>
    <p>No description meta here.</p>
    <p>A later paragraph that is also long enough but must not win.</p>
    <img src="/images/wall1.jpg">
    <img src="/images/wall2.jpg">
</body>
</html>"#
        .to_string()
}

/// Creates an HTML document where every paragraph is at or under the
/// description length threshold
#[allow(dead_code)]
pub fn short_paragraphs_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
    <title>OpenGraph Title Fallback</title>
</head>
<body>
    <p>Short one.</p>
    <p>Another short one.</p>
</body>
</html>"#
        .to_string()
}

/// Creates a mock endpoint that returns HTML content
#[allow(dead_code)]
pub fn create_html_mock(server: &mut Server, path: &str, html: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create()
}

/// Creates a mock endpoint that returns a redirect
#[allow(dead_code)]
pub fn create_redirect_mock(server: &mut Server, from: &str, to: &str) -> Mock {
    server
        .mock("GET", from)
        .with_status(301)
        .with_header("location", to)
        .create()
}

/// Creates a mock endpoint that redirects via an in-body anchor with no
/// Location header
#[allow(dead_code)]
pub fn create_body_link_redirect_mock(server: &mut Server, from: &str, to: &str) -> Mock {
    server
        .mock("GET", from)
        .with_status(301)
        .with_body(format!(r#"<body><a href="{to}"></a></body>"#))
        .create()
}

/// Creates a mock endpoint that returns an error status
#[allow(dead_code)]
pub fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create()
}

/// Helper to create test URLs
#[allow(dead_code)]
pub fn test_url(server: &Server, path: &str) -> String {
    format!("{}{}", server.url(), path)
}
