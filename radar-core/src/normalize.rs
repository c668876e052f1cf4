// Reduce fetched markup to bounded plain text

use radar_scanner::FetchedPage;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Only this many characters of a page are ever inspected.
pub const MAX_TEXT_CHARS: usize = 5000;

// Tried in order; the first container that yields text wins.
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    "#content",
    ".content",
    ".post-content",
    ".article-body",
    ".entry-content",
];

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

// Text on either side of these never runs together.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "option", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("content type '{0}' is not markup or text")]
    UnsupportedContentType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Markup,
    PlainText,
}

fn classify(content_type: Option<&str>) -> Result<BodyKind, NormalizeError> {
    let Some(raw) = content_type else {
        return Ok(BodyKind::Markup);
    };

    let mime = raw
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "" | "text/html" | "application/xhtml+xml" => Ok(BodyKind::Markup),
        other if other.starts_with("text/") => Ok(BodyKind::PlainText),
        _ => Err(NormalizeError::UnsupportedContentType(raw.to_string())),
    }
}

/// Normalize a fetched page, refusing bodies that are not markup or text.
pub fn normalize_page(page: &FetchedPage) -> Result<String, NormalizeError> {
    normalize_body(page.content_type.as_deref(), &page.body, MAX_TEXT_CHARS)
}

pub fn normalize_body(
    content_type: Option<&str>,
    body: &str,
    max_chars: usize,
) -> Result<String, NormalizeError> {
    let text = match classify(content_type)? {
        BodyKind::Markup => extract_markup_text(body),
        BodyKind::PlainText => body.to_string(),
    };

    Ok(truncate_chars(&collapse_whitespace(&text), max_chars))
}

/// Text of the primary-content region, else of the body, else of the document.
pub fn extract_markup_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element_text(element);
            if !text.trim().is_empty() {
                return text;
            }
        }
    }

    if let Ok(body_selector) = Selector::parse("body")
        && let Some(body) = document.select(&body_selector).next()
    {
        return element_text(body);
    }

    element_text(document.root_element())
}

fn element_text(element: ElementRef) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }
            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.push(' ');
            }
            collect_text(child_element, out);
            if block {
                out.push(' ');
            }
        }
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep the first `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
