//! Aggregation of per-page results into a site-level report.
//!
//! Violations merge by id with counts summed, keeping first-appearance
//! order. The merge is commutative over the set of pages: any completion
//! order of concurrent page scans produces the same report.

use crate::report::{PageResult, ScanResult, Violation};
use std::collections::HashMap;

/// Merges per-page results into one [`ScanResult`].
///
/// The overall score is the arithmetic mean of per-page scores, rounded
/// to the nearest integer; passed-check and issue counts are sums.
/// `is_multi_page` is true whenever more than one page was attempted.
pub fn aggregate(pages: Vec<PageResult>) -> ScanResult {
    let is_multi_page = pages.len() > 1;
    let pages_scanned: Vec<String> = pages.iter().map(|p| p.url.clone()).collect();

    let score = if pages.is_empty() {
        0
    } else {
        let total: u32 = pages.iter().map(|p| p.score).sum();
        (total as f64 / pages.len() as f64).round() as u32
    };

    let passed_checks = pages.iter().map(|p| p.passed_checks).sum();

    let mut violations: Vec<Violation> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for page in &pages {
        for violation in &page.violations {
            match index_by_id.get(&violation.id) {
                Some(&index) => violations[index].count += violation.count,
                None => {
                    index_by_id.insert(violation.id.clone(), violations.len());
                    violations.push(violation.clone());
                }
            }
        }
    }

    let issue_count = violations.iter().map(|v| v.count).sum();

    ScanResult {
        score,
        passed_checks,
        issue_count,
        violations,
        is_multi_page,
        pages_scanned,
        page_results: is_multi_page.then_some(pages),
        degraded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Impact, Principle};

    fn violation(id: &str, count: u32) -> Violation {
        Violation::new(
            id,
            format!("violation {id}"),
            Impact::Serious,
            count,
            "1.4.3 (Level AA)",
            Principle::Perceivable,
        )
    }

    fn page(url: &str, score: u32, violations: Vec<Violation>) -> PageResult {
        let issue_count = PageResult::issue_count_of(&violations);
        PageResult {
            url: url.to_string(),
            score,
            passed_checks: 7 - violations.len() as u32,
            issue_count,
            violations,
        }
    }

    #[test]
    fn test_single_page_mirrors_page() {
        let result = aggregate(vec![page("https://a/", 80, vec![violation("x", 3)])]);
        assert_eq!(result.score, 80);
        assert_eq!(result.issue_count, 3);
        assert!(!result.is_multi_page);
        assert_eq!(result.pages_scanned, vec!["https://a/"]);
        assert!(result.page_results.is_none());
    }

    #[test]
    fn test_mean_score_rounded() {
        let result = aggregate(vec![
            page("https://a/", 100, vec![]),
            page("https://b/", 75, vec![]),
        ]);
        // (100 + 75) / 2 = 87.5 -> 88
        assert_eq!(result.score, 88);
        assert!(result.is_multi_page);
    }

    #[test]
    fn test_violations_merge_by_id_counts_summed() {
        let result = aggregate(vec![
            page("https://a/", 90, vec![violation("x", 2), violation("y", 1)]),
            page("https://b/", 85, vec![violation("x", 3)]),
        ]);

        assert_eq!(result.violations.len(), 2);
        assert_eq!(result.violations[0].id, "x");
        assert_eq!(result.violations[0].count, 5);
        assert_eq!(result.violations[1].id, "y");
        assert_eq!(result.violations[1].count, 1);
        assert_eq!(result.issue_count, 6);
    }

    #[test]
    fn test_first_appearance_order() {
        let result = aggregate(vec![
            page("https://a/", 90, vec![violation("late", 1)]),
            page("https://b/", 90, vec![violation("early", 1), violation("late", 1)]),
        ]);
        let ids: Vec<&str> = result.violations.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn test_aggregation_is_commutative() {
        let a = page("https://a/", 92, vec![violation("x", 2)]);
        let b = page("https://b/", 71, vec![violation("y", 4), violation("x", 1)]);
        let c = page("https://c/", 100, vec![]);

        let forward = aggregate(vec![a.clone(), b.clone(), c.clone()]);
        let backward = aggregate(vec![c, b, a]);

        assert_eq!(forward.score, backward.score);
        assert_eq!(forward.issue_count, backward.issue_count);
        assert_eq!(forward.passed_checks, backward.passed_checks);

        let mut forward_ids: Vec<(String, u32)> = forward
            .violations
            .iter()
            .map(|v| (v.id.clone(), v.count))
            .collect();
        let mut backward_ids: Vec<(String, u32)> = backward
            .violations
            .iter()
            .map(|v| (v.id.clone(), v.count))
            .collect();
        forward_ids.sort();
        backward_ids.sort();
        assert_eq!(forward_ids, backward_ids);
    }

    #[test]
    fn test_passed_checks_summed() {
        let result = aggregate(vec![
            page("https://a/", 100, vec![]),
            page("https://b/", 100, vec![]),
        ]);
        assert_eq!(result.passed_checks, 14);
    }
}
