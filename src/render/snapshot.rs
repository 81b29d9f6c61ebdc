//! Read-only snapshot of one rendered page.
//!
//! A [`Snapshot`] wraps the parsed document together with a resolved style
//! index and exposes the query surface the check battery runs against:
//! CSS-selector element queries, attribute and text reads, and computed
//! style lookups (color, background-color, font-size, font-weight,
//! display, visibility). Snapshots are immutable once constructed.

use crate::render::style::{
    inline_declared, is_bold_weight, parse_color, parse_font_size, Rgb, StyleIndex,
};
use crate::CheckError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Default font size browsers apply when nothing is declared.
const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// Read-only view over one rendered page's DOM and computed styles.
#[derive(Debug)]
pub struct Snapshot {
    url: Url,
    document: Html,
    styles: StyleIndex,
}

impl Snapshot {
    /// Parses served markup into a snapshot.
    ///
    /// `url` is the final URL the page was obtained from (after
    /// redirects); relative links discovered later resolve against it.
    pub fn parse(body: &str, url: Url) -> Self {
        let document = Html::parse_document(body);
        let styles = StyleIndex::build(&document);
        Self {
            url,
            document,
            styles,
        }
    }

    /// The URL this snapshot was rendered from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Queries elements by CSS selector, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, CheckError> {
        let parsed = Selector::parse(selector).map_err(|e| CheckError::Selector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.document.select(&parsed).collect())
    }

    /// The document title, trimmed; `None` when absent or empty.
    pub fn title(&self) -> Option<String> {
        let elements = self.select("title").ok()?;
        elements
            .first()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// The declared document language (`lang` or `xml:lang` on the root
    /// element), `None` when absent or empty.
    pub fn language(&self) -> Option<String> {
        let root = self.document.root_element();
        root.value()
            .attr("lang")
            .or_else(|| root.value().attr("xml:lang"))
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
    }

    /// Computed text color: nearest declared value on the element or its
    /// ancestors; defaults to black.
    pub fn color(&self, element: &ElementRef) -> Rgb {
        self.inherited_value(element, "color")
            .and_then(|v| parse_color(&v))
            .unwrap_or(Rgb::BLACK)
    }

    /// Effective background color: nearest non-transparent
    /// `background-color` (or `background` shorthand) on the element or
    /// its ancestors. Defaults to the white document canvas.
    pub fn background_color(&self, element: &ElementRef) -> Rgb {
        let mut current = Some(*element);
        while let Some(el) = current {
            if let Some(value) = self.declared_on(&el, "background-color") {
                if let Some(rgb) = parse_color(&value) {
                    return rgb;
                }
            }
            if let Some(value) = self.declared_on(&el, "background") {
                // Shorthand: the color, when present, is a single token.
                if let Some(rgb) = value.split_whitespace().next().and_then(parse_color) {
                    return rgb;
                }
            }
            current = el.parent().and_then(ElementRef::wrap);
        }
        Rgb::WHITE
    }

    /// Computed font size in CSS pixels, inherited from the nearest
    /// ancestor that declares one; defaults to 16px.
    pub fn font_size(&self, element: &ElementRef) -> f64 {
        self.inherited_value(element, "font-size")
            .and_then(|v| parse_font_size(&v))
            .unwrap_or(DEFAULT_FONT_SIZE_PX)
    }

    /// Whether the computed font weight is bold. `b`/`strong` elements are
    /// bold unless a declaration overrides them.
    pub fn is_bold(&self, element: &ElementRef) -> bool {
        if let Some(value) = self.inherited_value(element, "font-weight") {
            return is_bold_weight(&value);
        }
        matches!(element.value().name(), "b" | "strong")
    }

    /// Whether the element is rendered at all: not `display: none` or
    /// `visibility: hidden` (on itself or an ancestor), and not carrying
    /// the `hidden` attribute.
    pub fn is_visible(&self, element: &ElementRef) -> bool {
        let mut current = Some(*element);
        let mut visibility_decided = false;

        while let Some(el) = current {
            if el.value().attr("hidden").is_some() {
                return false;
            }
            if let Some(display) = self.declared_on(&el, "display") {
                if display.eq_ignore_ascii_case("none") {
                    return false;
                }
            }
            // visibility inherits but can be re-enabled; the nearest
            // declaration decides.
            if !visibility_decided {
                if let Some(visibility) = self.declared_on(&el, "visibility") {
                    if visibility.eq_ignore_ascii_case("hidden") {
                        return false;
                    }
                    visibility_decided = true;
                }
            }
            current = el.parent().and_then(ElementRef::wrap);
        }

        true
    }

    /// Value of `property` declared directly on the element: inline
    /// `style` wins over stylesheet rules.
    fn declared_on(&self, element: &ElementRef, property: &str) -> Option<String> {
        inline_declared(element, property)
            .or_else(|| self.styles.declared(element, property).map(String::from))
    }

    /// Walks the element and its ancestors for the nearest declared value
    /// of an inheritable property.
    fn inherited_value(&self, element: &ElementRef, property: &str) -> Option<String> {
        let mut current = Some(*element);
        while let Some(el) = current {
            if let Some(value) = self.declared_on(&el, property) {
                if !value.eq_ignore_ascii_case("inherit") {
                    return Some(value);
                }
            }
            current = el.parent().and_then(ElementRef::wrap);
        }
        None
    }
}
