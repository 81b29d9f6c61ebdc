//! Computed-style resolution over a parsed document.
//!
//! Pagesight obtains pages as served markup, so "computed style" is
//! resolved from `<style>` blocks and inline `style` attributes: rules are
//! applied in document order (later declarations win) and inline styles win
//! over stylesheet rules. Inheritable properties (color, font-size,
//! font-weight, visibility) fall back to the nearest ancestor value.
//! This deliberately ignores specificity, external stylesheets, and
//! at-rules; it is the fidelity level the check battery is written against.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

/// Style properties the check battery can ask for.
const TRACKED_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "background",
    "font-size",
    "font-weight",
    "display",
    "visibility",
];

/// A resolved RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
}

/// A `property: value` pair with the property lowercased.
type Declaration = (String, String);

/// Per-element declarations accumulated from `<style>` blocks, in rule
/// order so that later declarations override earlier ones.
#[derive(Debug, Default)]
pub(crate) struct StyleIndex {
    by_node: HashMap<NodeId, Vec<Declaration>>,
}

impl StyleIndex {
    /// Builds the index by matching every parseable stylesheet rule
    /// against the document.
    pub(crate) fn build(document: &Html) -> Self {
        let mut index = StyleIndex::default();

        let style_selector = match Selector::parse("style") {
            Ok(s) => s,
            Err(_) => return index,
        };

        for style_el in document.select(&style_selector) {
            let css: String = style_el.text().collect();
            for (selector_text, declarations) in parse_rules(&css) {
                let selector = match Selector::parse(&selector_text) {
                    Ok(s) => s,
                    Err(_) => continue, // unsupported selector, skip the rule
                };
                for element in document.select(&selector) {
                    index
                        .by_node
                        .entry(element.id())
                        .or_default()
                        .extend(declarations.iter().cloned());
                }
            }
        }

        index
    }

    /// Returns the stylesheet value of `property` declared directly on
    /// `element` (later declarations win). Inline styles are resolved
    /// separately and take precedence at the snapshot layer.
    pub(crate) fn declared<'a>(&'a self, element: &ElementRef, property: &str) -> Option<&'a str> {
        let mut value: Option<&str> = None;

        if let Some(declarations) = self.by_node.get(&element.id()) {
            for (prop, val) in declarations {
                if prop == property {
                    value = Some(val.as_str());
                }
            }
        }

        value
    }
}

/// Returns the value of `property` from an element's inline `style`
/// attribute, if declared there.
pub(crate) fn inline_declared(element: &ElementRef, property: &str) -> Option<String> {
    let style = element.value().attr("style")?;
    let mut value = None;
    for (prop, val) in parse_declarations(style) {
        if prop == property {
            value = Some(val);
        }
    }
    value
}

/// Splits raw CSS text into `(selector, declarations)` rules.
///
/// At-rules (`@media`, `@font-face`, ...) are skipped wholesale; nested
/// blocks inside them produce unparseable selectors that the caller
/// discards.
fn parse_rules(css: &str) -> Vec<(String, Vec<Declaration>)> {
    let mut rules = Vec::new();

    for block in css.split('}') {
        let Some((selector, body)) = block.split_once('{') else {
            continue;
        };
        let selector = selector.trim();
        if selector.is_empty() || selector.contains('@') {
            continue;
        }
        let declarations = parse_declarations(body);
        if !declarations.is_empty() {
            rules.push((selector.to_string(), declarations));
        }
    }

    rules
}

/// Parses a declaration body (`color: #fff; font-size: 16px`) keeping only
/// tracked properties.
fn parse_declarations(body: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();

    for declaration in body.split(';') {
        let Some((prop, value)) = declaration.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_lowercase();
        let value = value.trim().to_string();
        if !value.is_empty() && TRACKED_PROPERTIES.contains(&prop.as_str()) {
            declarations.push((prop, value));
        }
    }

    declarations
}

/// Parses a CSS color value into RGB.
///
/// Supports `#rgb`/`#rrggbb` hex, `rgb()`/`rgba()` functional notation,
/// and the CSS named colors the engine encounters in practice. Returns
/// `None` for `transparent`, `inherit`, and anything unrecognized.
pub fn parse_color(value: &str) -> Option<Rgb> {
    let value = value.trim().to_lowercase();
    if value.starts_with('#') {
        parse_hex_color(&value)
    } else if value.starts_with("rgb") {
        parse_rgb_color(&value)
    } else {
        parse_named_color(&value)
    }
}

/// Parses `#rgb` or `#rrggbb` hex notation.
fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Rgb { r, g, b })
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb { r, g, b })
        }
        _ => None,
    }
}

/// Parses `rgb(r, g, b)` or `rgba(r, g, b, a)` notation.
fn parse_rgb_color(value: &str) -> Option<Rgb> {
    let inner = value
        .trim_start_matches("rgba")
        .trim_start_matches("rgb")
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?;

    let mut channels = inner.split(',').map(str::trim);
    let r: u8 = channels.next()?.parse().ok()?;
    let g: u8 = channels.next()?.parse().ok()?;
    let b: u8 = channels.next()?.parse().ok()?;
    Some(Rgb { r, g, b })
}

/// Parses the basic CSS named colors.
fn parse_named_color(name: &str) -> Option<Rgb> {
    let (r, g, b) = match name {
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "lime" => (0, 255, 0),
        "aqua" | "cyan" => (0, 255, 255),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "fuchsia" | "magenta" => (255, 0, 255),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        _ => return None,
    };
    Some(Rgb { r, g, b })
}

/// Parses a font-size value into CSS pixels.
///
/// Handles `px` and `pt` units plus bare numbers; relative units are not
/// resolved and fall back to the inherited/default size.
pub fn parse_font_size(value: &str) -> Option<f64> {
    let value = value.trim().to_lowercase();
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse::<f64>().ok();
    }
    if let Some(pt) = value.strip_suffix("pt") {
        return pt.trim().parse::<f64>().ok().map(|v| v * 96.0 / 72.0);
    }
    value.parse::<f64>().ok()
}

/// Returns true if a font-weight value denotes bold text.
pub fn is_bold_weight(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    match value.as_str() {
        "bold" | "bolder" => true,
        _ => value.parse::<u32>().map(|w| w >= 700).unwrap_or(false),
    }
}
