//! Single-page scanner: render, check, score.
//!
//! Composes the renderer and the check registry into one page's
//! [`PageResult`]. Rendering failures never surface as a "clean" page:
//! they produce a synthetic `scan-error` result and hand the underlying
//! error back to the caller for its fallback decision.

use crate::checks::{run_checks, total_checks};
use crate::render::{render, Snapshot};
use crate::report::{Impact, PageResult, Principle, Violation};
use crate::ScanError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of one page scan attempt, carrying the render error (if any)
/// so the fallback controller can distinguish page-specific failures
/// from systemic ones.
#[derive(Debug)]
pub struct PageOutcome {
    pub result: PageResult,
    pub error: Option<ScanError>,
}

/// Computes the page score from its violations.
///
/// Starts at 100 and deducts `count * severity_weight * (100 /
/// (total_checks * 10))` per violation, where weights are critical 4,
/// serious 3, moderate 2, minor 1. The result is clamped to `[0, 100]`
/// and rounded to the nearest integer.
pub fn score_page(violations: &[Violation], total_checks: usize) -> u32 {
    let unit = 100.0 / (total_checks as f64 * 10.0);
    let mut score = 100.0;
    for violation in violations {
        score -= violation.count as f64 * violation.impact.weight() as f64 * unit;
    }
    score.clamp(0.0, 100.0).round() as u32
}

/// Runs the full check battery against an already-rendered snapshot.
pub fn scan_snapshot(snapshot: &Snapshot) -> PageResult {
    let violations = run_checks(snapshot);
    let total = total_checks();
    let score = score_page(&violations, total);
    let passed_checks = (total - violations.len()) as u32;
    let issue_count = PageResult::issue_count_of(&violations);

    PageResult {
        url: snapshot.url().to_string(),
        score,
        passed_checks,
        issue_count,
        violations,
    }
}

/// The synthetic violation emitted when a page could not be rendered.
pub fn scan_error_violation() -> Violation {
    Violation::new(
        "scan-error",
        "The page could not be rendered for scanning",
        Impact::Critical,
        1,
        "N/A",
        Principle::Robust,
    )
    .with_recommendation("Verify the page is reachable and serves HTML, then scan again")
}

/// Builds the synthetic result for a page that failed to render:
/// score 0, no passed checks, a single `scan-error` violation.
pub fn error_page(url: &str) -> PageResult {
    let violations = vec![scan_error_violation()];
    let issue_count = PageResult::issue_count_of(&violations);
    PageResult {
        url: url.to_string(),
        score: 0,
        passed_checks: 0,
        issue_count,
        violations,
    }
}

/// Scans one page: renders it under `deadline` and evaluates every
/// registry check against the snapshot.
pub async fn scan_page(client: &Client, url: &Url, deadline: Duration) -> PageOutcome {
    match render(client, url, deadline).await {
        Ok(snapshot) => PageOutcome {
            result: scan_snapshot(&snapshot),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Page scan failed for {}: {}", url, e);
            PageOutcome {
                result: error_page(url.as_str()),
                error: Some(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(body: &str) -> Snapshot {
        Snapshot::parse(body, Url::parse("https://example.com/").unwrap())
    }

    fn violation(impact: Impact, count: u32) -> Violation {
        Violation::new("x", "x", impact, count, "1.1.1 (Level A)", Principle::Perceivable)
    }

    #[test]
    fn test_clean_page_scores_100() {
        assert_eq!(score_page(&[], 7), 100);
    }

    #[test]
    fn test_deduction_formula() {
        // One critical violation, count 2, 7 checks:
        // 100 - 2 * 4 * (100 / 70) = 100 - 11.43 -> 89
        let violations = vec![violation(Impact::Critical, 2)];
        assert_eq!(score_page(&violations, 7), 89);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let violations = vec![violation(Impact::Critical, 500)];
        assert_eq!(score_page(&violations, 7), 0);
    }

    #[test]
    fn test_score_in_range_and_integer() {
        for count in 0..60 {
            let violations = vec![violation(Impact::Serious, count)];
            let score = score_page(&violations, 7);
            assert!(score <= 100);
        }
    }

    #[test]
    fn test_scan_snapshot_populates_result() {
        let snap = snapshot(
            r#"<html><head></head><body>
                <img src="a.png"><img src="b.png">
            </body></html>"#,
        );
        let result = scan_snapshot(&snap);

        // image-alt (2), document-language (1), document-title (1)
        assert_eq!(result.issue_count, 4);
        assert_eq!(result.passed_checks as usize, total_checks() - 3);
        assert!(result.score < 100);
        assert_eq!(result.url, "https://example.com/");
        assert!(result.violations.iter().all(|v| v.count > 0));
    }

    #[test]
    fn test_scan_snapshot_is_deterministic() {
        let snap = snapshot(r#"<html><body><h3>skip</h3></body></html>"#);
        let a = scan_snapshot(&snap);
        let b = scan_snapshot(&snap);
        assert_eq!(a, b);
    }

    #[test]
    fn test_error_page_shape() {
        let result = error_page("https://example.com/down");
        assert_eq!(result.score, 0);
        assert_eq!(result.passed_checks, 0);
        assert_eq!(result.issue_count, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].id, "scan-error");
        assert_eq!(result.violations[0].impact, Impact::Critical);
    }
}
