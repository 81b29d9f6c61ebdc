//! Document language - WCAG 3.1.1 Language of Page (Level A)

use crate::checks::Check;
use crate::render::Snapshot;
use crate::report::{Impact, Principle, Violation};
use crate::CheckError;

/// Flags documents whose root element declares no language.
pub struct DocumentLanguage;

impl Check for DocumentLanguage {
    fn id(&self) -> &'static str {
        "document-language"
    }

    fn violation(&self, count: u32) -> Violation {
        Violation::new(
            self.id(),
            "The document must declare its language so screen readers choose the right voice",
            Impact::Serious,
            count,
            "3.1.1 (Level A)",
            Principle::Understandable,
        )
        .with_code_example("<html>")
        .with_recommendation("Add a lang attribute to the html element")
        .with_fix_example(r#"<html lang="en">"#)
    }

    fn run(&self, snapshot: &Snapshot) -> Result<Option<Violation>, CheckError> {
        Ok(snapshot.language().is_none().then(|| self.violation(1)))
    }
}
