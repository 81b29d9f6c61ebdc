//! The check registry: a fixed, ordered battery of DOM/style inspections.
//!
//! Each check is a pure function of a [`Snapshot`] that reports at most
//! one [`Violation`] carrying an occurrence count. The registry runs in a
//! fixed documented order; order only affects iteration determinism,
//! never the score. A check that cannot complete is logged as
//! inconclusive and the remaining checks still run.

pub mod alt_text;
pub mod contrast;
pub mod forms;
pub mod headings;
pub mod keyboard;
pub mod language;
pub mod title;

use crate::render::Snapshot;
use crate::report::Violation;
use crate::{CheckError, ScanError};

/// A single accessibility inspection routine.
pub trait Check: Send + Sync {
    /// Stable identifier, also used as the emitted violation id.
    fn id(&self) -> &'static str;

    /// Builds this check's violation with the given occurrence count,
    /// including its WCAG reference and remediation guidance. Also used
    /// by the degraded-mode generator so fabricated findings stay within
    /// the real catalogue.
    fn violation(&self, count: u32) -> Violation;

    /// Inspects the snapshot. Returns `Ok(None)` when the page passes.
    fn run(&self, snapshot: &Snapshot) -> Result<Option<Violation>, CheckError>;
}

/// The full check battery, in its fixed execution order:
///
/// 1. Images without alternative text
/// 2. Form controls without labels
/// 3. Heading order
/// 4. Color contrast
/// 5. Keyboard reachability
/// 6. Document language
/// 7. Document title
pub fn registry() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(alt_text::AltText),
        Box::new(forms::FormLabels),
        Box::new(headings::HeadingOrder),
        Box::new(contrast::ColorContrast),
        Box::new(keyboard::KeyboardAccess),
        Box::new(language::DocumentLanguage),
        Box::new(title::DocumentTitle),
    ]
}

/// Number of checks in the registry, computed rather than hardcoded so
/// the scoring denominator tracks the actual battery size.
pub fn total_checks() -> usize {
    registry().len()
}

/// Runs every registry check against a snapshot, in order.
///
/// Zero-count findings are filtered before emission. A check error marks
/// that check inconclusive for this page and does not abort the others.
pub fn run_checks(snapshot: &Snapshot) -> Vec<Violation> {
    let mut violations = Vec::new();

    for check in registry() {
        match check.run(snapshot) {
            Ok(Some(violation)) if violation.count > 0 => violations.push(violation),
            Ok(_) => {}
            Err(e) => {
                let err = ScanError::CheckExecution {
                    check: check.id(),
                    source: e,
                };
                tracing::warn!("Inconclusive for {}: {}", snapshot.url(), err);
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn snapshot(body: &str) -> Snapshot {
        Snapshot::parse(body, Url::parse("https://example.com/").unwrap())
    }

    #[test]
    fn test_registry_order_is_fixed() {
        let ids: Vec<&str> = registry().iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            vec![
                "image-alt",
                "form-label",
                "heading-order",
                "color-contrast",
                "keyboard-access",
                "document-language",
                "document-title",
            ]
        );
    }

    #[test]
    fn test_total_checks_matches_registry() {
        assert_eq!(total_checks(), registry().len());
    }

    #[test]
    fn test_clean_page_passes_everything() {
        let snap = snapshot(
            r#"<html lang="en"><head><title>Fine</title></head>
            <body><h1>Heading</h1><p>text</p></body></html>"#,
        );
        assert!(run_checks(&snap).is_empty());
    }

    #[test]
    fn test_checks_are_idempotent_over_a_snapshot() {
        let snap = snapshot(
            r#"<html><head></head><body>
                <img src="a.png"><img src="b.png">
                <h2>starts too deep</h2>
            </body></html>"#,
        );
        let first = run_checks(&snap);
        let second = run_checks(&snap);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_emitted_violations_never_have_zero_count() {
        let snap = snapshot(
            r#"<html><body><img src="a.png"><input type="text"></body></html>"#,
        );
        for violation in run_checks(&snap) {
            assert!(violation.count > 0, "{} emitted count 0", violation.id);
        }
    }
}
