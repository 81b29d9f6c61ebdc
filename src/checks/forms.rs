//! Form controls without labels - WCAG 3.3.2 Labels or Instructions (Level A)

use crate::checks::Check;
use crate::render::Snapshot;
use crate::report::{Impact, Principle, Violation};
use crate::CheckError;
use scraper::ElementRef;
use std::collections::HashSet;

/// Input types that need no visible label.
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "submit", "button"];

/// Flags form controls with no associated label: no `label[for]` pointing
/// at their id, no enclosing `<label>`, and no `aria-label` /
/// `aria-labelledby`.
pub struct FormLabels;

impl Check for FormLabels {
    fn id(&self) -> &'static str {
        "form-label"
    }

    fn violation(&self, count: u32) -> Violation {
        Violation::new(
            self.id(),
            "Form controls must have an associated label describing their purpose",
            Impact::Critical,
            count,
            "3.3.2 (Level A)",
            Principle::Understandable,
        )
        .with_code_example(r#"<input type="email" name="email">"#)
        .with_recommendation(
            "Associate every input, select, and textarea with a label element, or provide an aria-label",
        )
        .with_fix_example(
            r#"<label for="email">Email address</label>
<input type="email" id="email" name="email">"#,
        )
    }

    fn run(&self, snapshot: &Snapshot) -> Result<Option<Violation>, CheckError> {
        // Every id a <label for="..."> points at, collected once.
        let label_targets: HashSet<String> = snapshot
            .select("label[for]")?
            .iter()
            .filter_map(|label| label.value().attr("for"))
            .map(String::from)
            .collect();

        let count = snapshot
            .select("input, select, textarea")?
            .iter()
            .filter(|control| {
                if control.value().name() == "input" {
                    let input_type = control.value().attr("type").unwrap_or("text");
                    if EXEMPT_INPUT_TYPES.contains(&input_type.to_lowercase().as_str()) {
                        return false;
                    }
                }
                !is_labelled(control, &label_targets)
            })
            .count() as u32;

        Ok((count > 0).then(|| self.violation(count)))
    }
}

/// A control is labelled if it has non-empty `aria-label` or
/// `aria-labelledby`, an id referenced by some `label[for]`, or an
/// enclosing `<label>` element.
fn is_labelled(control: &ElementRef, label_targets: &HashSet<String>) -> bool {
    let element = control.value();

    let has_aria = ["aria-label", "aria-labelledby"]
        .iter()
        .any(|attr| element.attr(attr).map(|v| !v.trim().is_empty()).unwrap_or(false));
    if has_aria {
        return true;
    }

    if let Some(id) = element.attr("id") {
        if label_targets.contains(id) {
            return true;
        }
    }

    control.ancestors().any(|node| {
        node.value()
            .as_element()
            .map(|el| el.name() == "label")
            .unwrap_or(false)
    })
}
