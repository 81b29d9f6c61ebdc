//! Page renderer: isolated navigation under a hard deadline.
//!
//! The renderer obtains a page's served DOM over HTTP and exposes it as a
//! read-only [`Snapshot`]. Readiness is full receipt of the response body;
//! the whole navigation (connect, redirects, body transfer, parse) is
//! capped by the caller's deadline. On timeout or navigation failure the
//! renderer returns a classified error and never a partially populated
//! snapshot.
//!
//! The caller is responsible for URL safety: `render` trusts that it
//! receives a validated `http(s)` URL that does not point at loopback or
//! private address ranges.

mod snapshot;
pub mod style;

pub use snapshot::Snapshot;
pub use style::{parse_color, Rgb};

use crate::config::UserAgentConfig;
use crate::ScanError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Builds the HTTP client backing all renders within one scan.
///
/// The client is the single shared resource of a scan: connection pooling
/// is internal to reqwest and each in-flight page holds its own response
/// exclusively, so no two concurrent checks ever share a browsing context.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{} (+{})", config.name, config.version, config.contact_url);

    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Navigates to `url` and returns a snapshot of the rendered document.
///
/// The entire navigation is bounded by `deadline`. Errors are classified
/// as [`ScanError::RenderTimeout`] when the deadline (or the transport's
/// own timeout) expired, and [`ScanError::RenderFailure`] for every other
/// navigation problem: connection errors, non-success status codes, and
/// non-HTML content types.
pub async fn render(client: &Client, url: &Url, deadline: Duration) -> Result<Snapshot, ScanError> {
    let navigation = async {
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_reqwest_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::RenderFailure {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.is_empty() && !content_type.contains("text/html") {
            return Err(ScanError::RenderFailure {
                url: url.to_string(),
                message: format!("Expected HTML, got {}", content_type),
            });
        }

        // Final URL after redirects becomes the snapshot's base so that
        // relative links resolve correctly during discovery.
        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(url, e))?;

        tracing::debug!("Rendered {} ({} bytes)", final_url, body.len());
        Ok(Snapshot::parse(&body, final_url))
    };

    match tokio::time::timeout(deadline, navigation).await {
        Ok(result) => result,
        Err(_) => Err(ScanError::RenderTimeout {
            url: url.to_string(),
        }),
    }
}

/// Maps a transport error onto the render error taxonomy.
fn classify_reqwest_error(url: &Url, error: reqwest::Error) -> ScanError {
    if error.is_timeout() {
        ScanError::RenderTimeout {
            url: url.to_string(),
        }
    } else {
        ScanError::RenderFailure {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
