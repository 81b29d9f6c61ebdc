//! Document title - WCAG 2.4.2 Page Titled (Level A)

use crate::checks::Check;
use crate::render::Snapshot;
use crate::report::{Impact, Principle, Violation};
use crate::CheckError;

/// Flags documents without a non-empty `<title>`.
pub struct DocumentTitle;

impl Check for DocumentTitle {
    fn id(&self) -> &'static str {
        "document-title"
    }

    fn violation(&self, count: u32) -> Violation {
        Violation::new(
            self.id(),
            "The document must have a title describing its topic or purpose",
            Impact::Serious,
            count,
            "2.4.2 (Level A)",
            Principle::Operable,
        )
        .with_code_example("<head></head>")
        .with_recommendation("Add a descriptive title element to the document head")
        .with_fix_example("<head><title>Order history - Example Store</title></head>")
    }

    fn run(&self, snapshot: &Snapshot) -> Result<Option<Violation>, CheckError> {
        Ok(snapshot.title().is_none().then(|| self.violation(1)))
    }
}
