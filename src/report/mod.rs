//! Report data model shared by every stage of the scan pipeline.
//!
//! All types here are plain values: created fresh per scan invocation,
//! immutable once returned, and serializable as-is for API responses or
//! persistence by the layers above this crate.

use serde::{Deserialize, Serialize};

/// Severity classification of a violation, used both for scoring weight
/// and for report prioritization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl Impact {
    /// Scoring weight applied per violation instance.
    pub fn weight(&self) -> u32 {
        match self {
            Impact::Critical => 4,
            Impact::Serious => 3,
            Impact::Moderate => 2,
            Impact::Minor => 1,
        }
    }
}

/// The four WCAG top-level groupings used to categorize violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principle {
    Perceivable,
    Operable,
    Understandable,
    Robust,
}

/// A detected accessibility issue.
///
/// Invariant: a `Violation` with `count == 0` must never appear in a
/// result. Checks filter zero-count findings before emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Stable check identifier (e.g. "image-alt")
    pub id: String,

    /// Human-readable description of the issue
    pub description: String,

    /// Severity classification
    pub impact: Impact,

    /// Number of offending occurrences on the page(s)
    pub count: u32,

    /// WCAG success criterion reference, e.g. "1.1.1 (Level A)"
    pub wcag_level: String,

    /// WCAG principle this criterion belongs to
    pub principle: Principle,

    /// Markup snippet demonstrating the problem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,

    /// Short remediation guidance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,

    /// Markup snippet demonstrating a fix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_example: Option<String>,
}

impl Violation {
    /// Creates a violation with the mandatory fields; remediation fields
    /// start empty and are filled via the builder methods.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        impact: Impact,
        count: u32,
        wcag_level: impl Into<String>,
        principle: Principle,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            impact,
            count,
            wcag_level: wcag_level.into(),
            principle,
            code_example: None,
            recommendation: None,
            fix_example: None,
        }
    }

    pub fn with_code_example(mut self, example: impl Into<String>) -> Self {
        self.code_example = Some(example.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    pub fn with_fix_example(mut self, example: impl Into<String>) -> Self {
        self.fix_example = Some(example.into());
        self
    }
}

/// Audit result for a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// The page URL as attempted
    pub url: String,

    /// Normalized compliance score in [0, 100]
    pub score: u32,

    /// Number of registry checks that produced no violation
    pub passed_checks: u32,

    /// Total occurrence count across all violations on this page
    pub issue_count: u32,

    /// Violations detected on this page, in registry order
    pub violations: Vec<Violation>,
}

impl PageResult {
    /// Derives `issue_count` from the violation list; it is never set
    /// independently.
    pub fn issue_count_of(violations: &[Violation]) -> u32 {
        violations.iter().map(|v| v.count).sum()
    }
}

/// Site-level audit result returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Overall score: arithmetic mean of per-page scores, rounded
    pub score: u32,

    /// Sum of passed checks across pages
    pub passed_checks: u32,

    /// Sum of violation counts across pages
    pub issue_count: u32,

    /// Violations merged by id across pages, counts summed,
    /// first-appearance order
    pub violations: Vec<Violation>,

    /// True whenever more than one page was attempted
    pub is_multi_page: bool,

    /// Every page attempted, in attempt order (successes and failures)
    pub pages_scanned: Vec<String>,

    /// Per-page breakdown; present only for multi-page scans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_results: Option<Vec<PageResult>>,

    /// True when this result came from the heuristic fallback generator
    /// rather than real page rendering
    pub degraded: bool,
}
