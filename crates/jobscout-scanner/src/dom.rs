//! Helpers for reading a rendered DOM snapshot the way a visitor sees it.

use crate::error::{Result, ScanError};
use scraper::node::Node;
use scraper::{ElementRef, Selector};
use url::Url;

/// Elements that start a new line of rendered text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Elements whose text is never rendered.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parse a CSS selector, reporting the offending selector on failure.
pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScanError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Approximates `innerText`: block boundaries become newlines, runs of
/// whitespace collapse to one space, blank lines are dropped.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_rendered(element, &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_rendered(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if HIDDEN_ELEMENTS.contains(&name) {
        return;
    }
    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push('\n');
    }
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            push_rendered(child_element, out);
        } else if let Node::Text(text) = child.value() {
            // Source line breaks inside text render as plain spaces.
            out.extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
        }
    }
    if block {
        out.push('\n');
    } else if matches!(name, "td" | "th") {
        out.push(' ');
    }
}

/// First line of already-normalized text.
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

/// Uppercase the first character, leave the rest alone.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolve `href` against the page URL. Only web links survive.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(String::from)
}

/// First element strictly below `element` that matches `selector`.
pub fn find_descendant<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|candidate| selector.matches(candidate))
}

/// First anchor strictly below `element`, with or without an `href`.
pub fn first_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|candidate| candidate.value().name() == "a")
}

/// The element's own `href` if it is an anchor, otherwise the first linked
/// anchor inside it.
pub fn own_or_descendant_href<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    if element.value().name() == "a" {
        return element.value().attr("href");
    }
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|candidate| candidate.value().name() == "a" && candidate.value().attr("href").is_some())
        .and_then(|anchor| anchor.value().attr("href"))
}

/// `href` of the nearest anchor at or above `element`.
pub fn closest_href<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|candidate| candidate.value().name() == "a")
        .and_then(|anchor| anchor.value().attr("href"))
}
