//! Crawl orchestration: bounded multi-page scanning.
//!
//! The orchestrator always scans the base page first, discovers
//! same-origin links from its snapshot, and scans up to `max_pages - 1`
//! additional pages (first-seen order) under a bounded worker pool and a
//! crawl-level deadline. Per-page failures never abort the crawl; a
//! failed page contributes its synthetic `scan-error` result.

use crate::config::ScanConfig;
use crate::crawler::discover::discover_links;
use crate::render::render;
use crate::scanner::{error_page, scan_page, scan_snapshot, PageOutcome};
use crate::ScanError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use url::Url;

/// Scans up to `max_pages` pages starting from `base_url`, returning one
/// outcome per attempted page, in attempt order.
///
/// The caller routes `max_pages <= 1` requests to the single-page
/// scanner; this function expects a real crawl budget.
pub async fn crawl(
    client: &Client,
    base_url: &Url,
    max_pages: u32,
    config: &ScanConfig,
) -> Vec<PageOutcome> {
    let crawl_deadline = Instant::now() + Duration::from_millis(config.crawl_deadline_ms);
    let discovery_timeout = Duration::from_millis(config.discovery_timeout_ms);
    let page_timeout = Duration::from_millis(config.page_timeout_ms);

    // The base page is rendered once and reused for both its own audit
    // and link discovery.
    let (base_outcome, links) = match render(client, base_url, discovery_timeout).await {
        Ok(snapshot) => {
            let links = discover_links(&snapshot);
            let outcome = PageOutcome {
                result: scan_snapshot(&snapshot),
                error: None,
            };
            (outcome, links)
        }
        Err(e) => {
            tracing::warn!("Base page render failed for {}: {}", base_url, e);
            let outcome = PageOutcome {
                result: error_page(base_url.as_str()),
                error: Some(e),
            };
            // Nothing to discover from; the crawl is just the base page.
            return vec![outcome];
        }
    };

    let budget = (max_pages.saturating_sub(1)) as usize;
    let targets: Vec<Url> = links
        .into_iter()
        .filter(|link| link != base_url)
        .take(budget)
        .collect();

    if targets.len() == budget && budget > 0 {
        // Informational: the page exposes more same-origin links than the
        // crawl budget allows.
        tracing::info!(
            "Crawl budget of {} pages reached for {}",
            max_pages,
            base_url
        );
    }

    tracing::debug!(
        "Crawling {} additional pages from {}",
        targets.len(),
        base_url
    );

    // Bounded worker pool; each in-flight page holds a permit for the
    // duration of its render and check run.
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_pages as usize));
    let mut tasks = JoinSet::new();

    for (index, url) in targets.into_iter().enumerate() {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;

            // Per-page timeouts are subordinate to the crawl deadline: a
            // page launched near the deadline gets whatever budget is
            // left. A page whose turn comes after the deadline is not
            // fetched, but it still appears in the results as a failed
            // attempt so the caller can see the crawl was truncated.
            let Some(remaining) = crawl_deadline.checked_duration_since(Instant::now()) else {
                tracing::warn!("Crawl deadline expired before {} could be scanned", url);
                let outcome = PageOutcome {
                    result: error_page(url.as_str()),
                    error: Some(ScanError::RenderTimeout {
                        url: url.to_string(),
                    }),
                };
                return Some((index, outcome));
            };
            let deadline = remaining.min(page_timeout);

            Some((index, scan_page(&client, &url, deadline).await))
        });
    }

    let mut slots: Vec<Option<PageOutcome>> = Vec::new();
    slots.resize_with(budget, || None);

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some((index, outcome))) => slots[index] = Some(outcome),
            Ok(None) => {} // semaphore closed, only possible during shutdown
            Err(e) => tracing::error!("Page scan task failed: {}", e),
        }
    }

    let mut outcomes = vec![base_outcome];
    outcomes.extend(slots.into_iter().flatten());
    outcomes
}
