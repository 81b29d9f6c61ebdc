//! Link discovery over a rendered snapshot.
//!
//! Extracts candidate pages for a multi-page audit: same-hostname links
//! only, with `javascript:`, `mailto:`, `tel:`, `data:` and pure-fragment
//! targets excluded. Relative URLs resolve against the snapshot's own
//! URL. Results are deduplicated (fragments stripped first) and returned
//! in first-occurrence order; no crawl priority exists beyond that.

use crate::render::Snapshot;
use std::collections::HashSet;
use url::Url;

/// Extracts same-origin audit candidates from a rendered page.
pub fn discover_links(snapshot: &Snapshot) -> Vec<Url> {
    let base_url = snapshot.url();
    let origin_host = match base_url.host_str() {
        Some(host) => host,
        None => return Vec::new(),
    };

    let anchors = match snapshot.select("a[href]") {
        Ok(anchors) => anchors,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in anchors {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(mut resolved) = resolve_link(href, base_url) else {
            continue;
        };
        if resolved.host_str() != Some(origin_host) {
            continue;
        }
        resolved.set_fragment(None);
        if seen.insert(resolved.to_string()) {
            links.push(resolved);
        }
    }

    links
}

/// Resolves an href to an absolute URL, excluding targets the crawl must
/// never follow.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Special schemes and same-page anchors are not pages.
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
        || href.starts_with('#')
    {
        return None;
    }

    let resolved = base_url.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}
