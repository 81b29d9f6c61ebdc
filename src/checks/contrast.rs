//! Color contrast - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! For every visible element carrying direct text, the computed text
//! color is compared against the effective background color using the
//! WCAG relative-luminance contrast ratio. Normal text requires 4.5:1;
//! large text (18px and up, or bold 14px and up) requires 3:1.

use crate::checks::Check;
use crate::render::{Rgb, Snapshot};
use crate::report::{Impact, Principle, Violation};
use crate::CheckError;
use scraper::ElementRef;

/// Reported occurrences are capped to bound report size.
const MAX_REPORTED: u32 = 25;

/// Tags whose text content is never rendered as page text.
const NON_RENDERED_TAGS: &[&str] = &[
    "html", "head", "script", "style", "title", "meta", "link", "noscript", "template",
];

/// Flags visible text whose contrast ratio against its background falls
/// below the WCAG AA minimum.
pub struct ColorContrast;

impl Check for ColorContrast {
    fn id(&self) -> &'static str {
        "color-contrast"
    }

    fn violation(&self, count: u32) -> Violation {
        Violation::new(
            self.id(),
            "Text must have sufficient contrast against its background",
            Impact::Serious,
            count,
            "1.4.3 (Level AA)",
            Principle::Perceivable,
        )
        .with_code_example(r#"<p style="color: #999999; background-color: #ffffff">hard to read</p>"#)
        .with_recommendation(
            "Increase the contrast ratio to at least 4.5:1 for normal text, or 3:1 for large text",
        )
        .with_fix_example(r#"<p style="color: #595959; background-color: #ffffff">readable</p>"#)
    }

    fn run(&self, snapshot: &Snapshot) -> Result<Option<Violation>, CheckError> {
        let mut count = 0u32;

        for element in snapshot.select("*")? {
            if NON_RENDERED_TAGS.contains(&element.value().name()) {
                continue;
            }
            if !has_direct_text(&element) || !snapshot.is_visible(&element) {
                continue;
            }

            let fg = snapshot.color(&element);
            let bg = snapshot.background_color(&element);
            let ratio = contrast_ratio(fg, bg);

            let size = snapshot.font_size(&element);
            let bold = snapshot.is_bold(&element);
            let required = if size >= 18.0 || (bold && size >= 14.0) {
                3.0
            } else {
                4.5
            };

            if ratio < required {
                count += 1;
                if count == MAX_REPORTED {
                    break;
                }
            }
        }

        Ok((count > 0).then(|| self.violation(count)))
    }
}

/// True if the element has a non-whitespace text node as a direct child.
fn has_direct_text(element: &ElementRef) -> bool {
    element.children().any(|child| {
        child
            .value()
            .as_text()
            .map(|text| !text.trim().is_empty())
            .unwrap_or(false)
    })
}

/// WCAG relative luminance of an sRGB color.
pub fn relative_luminance(color: Rgb) -> f64 {
    let channel = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * channel(color.r) + 0.7152 * channel(color.g) + 0.0722 * channel(color.b)
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}
