//! Keyboard reachability - WCAG 2.1.1 Keyboard (Level A)

use crate::checks::Check;
use crate::render::Snapshot;
use crate::report::{Impact, Principle, Violation};
use crate::CheckError;

/// Mouse handler attributes that imply interactivity.
const MOUSE_HANDLERS: &[&str] = &["onclick", "onmousedown", "onmouseup", "onmouseover"];

/// Keyboard handler attributes that satisfy the mouse handlers above.
const KEYBOARD_HANDLERS: &[&str] = &["onkeydown", "onkeyup", "onkeypress"];

/// Elements that are keyboard-operable natively, handler or not.
const NATIVELY_INTERACTIVE: &[&str] = &["a", "button", "input", "select", "textarea", "summary"];

/// Flags elements removed from the tab order (`tabindex="-1"`) and
/// interactive-looking elements wired for the mouse but not the keyboard.
pub struct KeyboardAccess;

impl Check for KeyboardAccess {
    fn id(&self) -> &'static str {
        "keyboard-access"
    }

    fn violation(&self, count: u32) -> Violation {
        Violation::new(
            self.id(),
            "Interactive elements must be reachable and operable with a keyboard",
            Impact::Serious,
            count,
            "2.1.1 (Level A)",
            Principle::Operable,
        )
        .with_code_example(r#"<div onclick="openMenu()">Menu</div>"#)
        .with_recommendation(
            "Use native interactive elements, or add keyboard handlers and a tabindex of 0 to custom controls",
        )
        .with_fix_example(
            r#"<div role="button" tabindex="0" onclick="openMenu()" onkeydown="openMenu()">Menu</div>"#,
        )
    }

    fn run(&self, snapshot: &Snapshot) -> Result<Option<Violation>, CheckError> {
        let mut count = 0u32;

        // One pass; an element failing both rules still counts once.
        for element in snapshot.select("*")? {
            let el = element.value();

            // Explicitly pulled out of the tab order.
            let removed = el
                .attr("tabindex")
                .and_then(|v| v.trim().parse::<i32>().ok())
                .map(|v| v < 0)
                .unwrap_or(false);

            // Mouse-only handlers on elements with no native keyboard
            // support.
            let mouse_only = !NATIVELY_INTERACTIVE.contains(&el.name())
                && MOUSE_HANDLERS.iter().any(|h| el.attr(h).is_some())
                && !KEYBOARD_HANDLERS.iter().any(|h| el.attr(h).is_some());

            if removed || mouse_only {
                count += 1;
            }
        }

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
    fn test_negative_tabindex_counted() {
        let snap = snapshot(r#"<html><body><button tabindex="-1">hidden</button></body></html>"#);
        let violation = KeyboardAccess.run(&snap).unwrap().unwrap();
        assert_eq!(violation.count, 1);
        assert_eq!(violation.impact, Impact::Serious);
    }

    #[test]
    fn test_mouse_only_div_counted() {
        let snap = snapshot(r#"<html><body><div onclick="go()">click me</div></body></html>"#);
        let violation = KeyboardAccess.run(&snap).unwrap().unwrap();
        assert_eq!(violation.count, 1);
    }

    #[test]
    fn test_matching_keyboard_handler_passes() {
        let snap = snapshot(
            r#"<html><body><div onclick="go()" onkeydown="go()">ok</div></body></html>"#,
        );
        assert!(KeyboardAccess.run(&snap).unwrap().is_none());
    }

    #[test]
    fn test_native_elements_exempt_from_handler_rule() {
        let snap = snapshot(
            r#"<html><body><button onclick="go()">fine</button><a href="/x" onclick="track()">link</a></body></html>"#,
        );
        assert!(KeyboardAccess.run(&snap).unwrap().is_none());
    }

    #[test]
    fn test_zero_tabindex_passes() {
        let snap = snapshot(r#"<html><body><div tabindex="0">reachable</div></body></html>"#);
        assert!(KeyboardAccess.run(&snap).unwrap().is_none());
    }

    #[test]
    fn test_element_failing_both_rules_counted_once() {
        let snap = snapshot(
            r#"<html><body><div tabindex="-1" onclick="go()">both</div></body></html>"#,
        );
        let violation = KeyboardAccess.run(&snap).unwrap().unwrap();
        assert_eq!(violation.count, 1);
    }

    #[test]
    fn test_both_categories_accumulate() {
        let snap = snapshot(
            r#"<html><body>
                <span tabindex="-1">a</span>
                <div onmousedown="drag()">b</div>
            </body></html>"#,
        );
        let violation = KeyboardAccess.run(&snap).unwrap().unwrap();
        assert_eq!(violation.count, 2);
    }
}
