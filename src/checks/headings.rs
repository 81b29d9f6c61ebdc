//! Heading order - WCAG 1.3.1 Info and Relationships (Level A)

use crate::checks::Check;
use crate::render::Snapshot;
use crate::report::{Impact, Principle, Violation};
use crate::CheckError;

/// Flags heading-structure problems: the first heading must be an `<h1>`,
/// and no heading may skip more than one level from the previous one.
pub struct HeadingOrder;

impl Check for HeadingOrder {
    fn id(&self) -> &'static str {
        "heading-order"
    }

    fn violation(&self, count: u32) -> Violation {
        Violation::new(
            self.id(),
            "Headings must start at level one and descend without skipping levels",
            Impact::Moderate,
            count,
            "1.3.1 (Level A)",
            Principle::Perceivable,
        )
        .with_code_example("<h1>Title</h1>\n<h3>Section</h3>")
        .with_recommendation(
            "Use heading levels to express document structure: begin with h1 and increase by at most one level at a time",
        )
        .with_fix_example("<h1>Title</h1>\n<h2>Section</h2>")
    }

    fn run(&self, snapshot: &Snapshot) -> Result<Option<Violation>, CheckError> {
        let headings = snapshot.select("h1, h2, h3, h4, h5, h6")?;

        let mut count = 0u32;
        let mut previous_level: Option<u32> = None;

        for heading in &headings {
            let level = heading_level(heading.value().name());
            match previous_level {
                None => {
                    if level != 1 {
                        count += 1;
                    }
                }
                Some(previous) => {
                    if level > previous + 1 {
                        count += 1;
                    }
                }
            }
            previous_level = Some(level);
        }

        Ok((count > 0).then(|| self.violation(count)))
    }
}

fn heading_level(tag: &str) -> u32 {
    tag.trim_start_matches('h').parse().unwrap_or(1)
}
