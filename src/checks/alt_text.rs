//! Images without alternative text - WCAG 1.1.1 Non-text Content (Level A)

use crate::checks::Check;
use crate::render::Snapshot;
use crate::report::{Impact, Principle, Violation};
use crate::CheckError;

/// Flags `<img>` elements lacking a non-empty `alt` attribute.
pub struct AltText;

impl Check for AltText {
    fn id(&self) -> &'static str {
        "image-alt"
    }

    fn violation(&self, count: u32) -> Violation {
        Violation::new(
            self.id(),
            "Images must have alternative text so screen readers can describe them",
            Impact::Critical,
            count,
            "1.1.1 (Level A)",
            Principle::Perceivable,
        )
        .with_code_example(r#"<img src="chart.png">"#)
        .with_recommendation(
            "Add a descriptive alt attribute to every image so assistive technology can convey its content",
        )
        .with_fix_example(r#"<img src="chart.png" alt="Quarterly revenue, up 12% from Q1">"#)
    }

    fn run(&self, snapshot: &Snapshot) -> Result<Option<Violation>, CheckError> {
        let count = snapshot
            .select("img")?
            .iter()
            .filter(|img| {
                img.value()
                    .attr("alt")
                    .map(|alt| alt.trim().is_empty())
                    .unwrap_or(true)
            })
            .count() as u32;

        Ok((count > 0).then(|| self.violation(count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn snapshot(body: &str) -> Snapshot {
        Snapshot::parse(body, Url::parse("https://example.com/").unwrap())
    }

    #[test]
    fn test_missing_and_blank_alt_counted() {
        let snap = snapshot(
            r#"<html><body>
                <img src="a.png">
                <img src="b.png" alt="   ">
                <img src="c.png" alt="described">
            </body></html>"#,
        );
        let violation = AltText.run(&snap).unwrap().unwrap();
        assert_eq!(violation.count, 2);
        assert_eq!(violation.id, "image-alt");
        assert_eq!(violation.impact, Impact::Critical);
    }

    #[test]
    fn test_all_images_described_passes() {
        let snap = snapshot(r#"<html><body><img src="a.png" alt="A chart"></body></html>"#);
        assert!(AltText.run(&snap).unwrap().is_none());
    }

    #[test]
    fn test_no_images_passes() {
        let snap = snapshot("<html><body><p>text only</p></body></html>");
        assert!(AltText.run(&snap).unwrap().is_none());
    }
}
