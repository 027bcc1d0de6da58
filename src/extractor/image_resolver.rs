//! Resolution of extracted image references to absolute URLs.

use log::{debug, warn};
use url::Url;

use super::OpenGraph;

/// Snapshot the raw image list into `original_images`, then rewrite every
/// host-less reference against the base location (canonical url when set,
/// else the source).
///
/// Individually malformed references are dropped rather than failing the
/// batch; an unparseable base keeps the whole raw list untouched.
pub(super) fn resolve_images(og: &mut OpenGraph) {
    og.original_images = og.images.clone();
    if og.images.is_empty() {
        return;
    }

    let base_input = og.url.as_deref().unwrap_or(&og.src);
    let Ok(base) = Url::parse(base_input) else {
        debug!("base location is not a url; keeping image paths as written");
        return;
    };

    let raw = std::mem::take(&mut og.images);
    for image in &raw {
        if has_host(image) {
            og.add_image(image);
            continue;
        }
        match base.join(image) {
            Ok(resolved) => og.add_image(resolved.as_str()),
            Err(err) => warn!("skipping malformed image url '{image}': {err}"),
        }
    }
}

/// Absolute and protocol-relative references already carry a host and are
/// kept exactly as written.
fn has_host(image: &str) -> bool {
    if image.starts_with("//") {
        return true;
    }
    Url::parse(image).map(|url| url.has_host()).unwrap_or(false)
}
