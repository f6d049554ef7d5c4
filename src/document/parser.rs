// src/document/parser.rs
//! Turns a raw SEC filing (SGML envelope around HTML) into a [`Document`].

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::document::classifier;
use crate::document::element::{Document, ElementKind};
use crate::utils::text::clean_extra_whitespace;

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "h1", "h2", "h3", "h4", "h5", "h6", "td", "th",
];

// Leaf block elements carry one span of text each
static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p, div, li, h1, h2, h3, h4, h5, h6, td, th")
        .expect("Failed to compile BLOCK_SELECTOR")
});

static TYPE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<TYPE>\s*([^<\s]+)").expect("Failed to compile TYPE_TAG_RE")
});

/// Reads the filing type from the first `<TYPE>` tag of the envelope.
pub fn extract_filing_type(raw: &str) -> Option<String> {
    TYPE_TAG_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn has_block_descendant(element: ElementRef) -> bool {
    element
        .descendants()
        .skip(1) // the element itself
        .filter_map(ElementRef::wrap)
        .any(|child| BLOCK_TAGS.contains(&child.value().name()))
}

impl Document {
    /// Parses a raw filing. Text outside block elements (the SGML header) is ignored.
    pub fn from_filing(raw: &str) -> Self {
        let filing_type = extract_filing_type(raw);
        let html = Html::parse_document(raw);

        let mut spans = Vec::new();
        for element in html.select(&BLOCK_SELECTOR) {
            if has_block_descendant(element) {
                continue;
            }
            let text = clean_extra_whitespace(&element.text().collect::<String>());
            let Some(kind) = classifier::classify(&text) else {
                continue;
            };
            let kind = if element.value().name() == "li" {
                ElementKind::ListItem
            } else {
                kind
            };
            spans.push((kind, text));
        }

        tracing::debug!(
            "Parsed filing: type {:?}, {} elements",
            filing_type,
            spans.len()
        );
        Document::new(filing_type.as_deref(), spans)
    }

    /// Reads and parses a filing from disk. Bytes that are not valid UTF-8
    /// (Windows-1252 punctuation in older submissions) become U+FFFD.
    pub fn load_filing<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        let raw = String::from_utf8_lossy(&bytes);
        if matches!(raw, Cow::Owned(_)) {
            tracing::warn!(
                "{} is not valid UTF-8, invalid bytes replaced",
                path.as_ref().display()
            );
        }
        Ok(Self::from_filing(&raw))
    }
}
